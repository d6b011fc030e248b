mod common;

use chrono::Utc;
use course_explorer::db::LinkRepository;
use course_explorer::error::AppError;
use course_explorer::models::NewLinkRequest;

#[tokio::test]
async fn created_link_is_listed() {
    let repo = LinkRepository::new(common::memory_store());
    let before = Utc::now();

    repo.create(NewLinkRequest { link: "http://x".to_string() })
        .await
        .expect("Failed to create link");

    let links = repo.list().await.expect("Failed to list links");
    let link = links.iter().find(|l| l.link == "http://x").expect("Link not listed");
    assert!(link.created.timestamp() >= before.timestamp());
}

#[tokio::test]
async fn empty_link_is_rejected() {
    let repo = LinkRepository::new(common::memory_store());

    let result = repo.create(NewLinkRequest::default()).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(repo.list().await.expect("Failed to list links").is_empty());
}
