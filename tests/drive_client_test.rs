mod common;

use course_explorer::drive::{DriveClient, DriveConfig, DriveHttpClient, PAGE_SIZE};
use course_explorer::error::AppError;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FOLDER_ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz0123456";

fn client_for(server: &MockServer) -> DriveHttpClient {
    let mut config = DriveConfig::new("reader@test-project.iam.gserviceaccount.com", common::TEST_KEY_PEM);
    config.token_uri = format!("{}/token", server.uri());
    config.api_base = server.uri();
    DriveHttpClient::new(config).expect("Failed to build drive client")
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-access-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn lists_children_of_folder() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(header("authorization", "Bearer test-access-token"))
        .and(query_param("q", format!("'{}' in parents and trashed = false", FOLDER_ID)))
        .and(query_param("pageSize", PAGE_SIZE.to_string()))
        .and(query_param("fields", "files(id,name,mimeType,thumbnailLink,webViewLink)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                {
                    "id": "sub",
                    "name": "Week 1",
                    "mimeType": "application/vnd.google-apps.folder",
                    "webViewLink": "https://drive.google.com/drive/folders/sub"
                },
                {
                    "id": "doc",
                    "name": "syllabus.pdf",
                    "mimeType": "application/pdf",
                    "thumbnailLink": "https://example.com/thumb"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server)
        .list_children(FOLDER_ID)
        .await
        .expect("Failed to list folder");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Week 1");
    assert_eq!(entries[0].thumbnail_link, None);
    assert_eq!(entries[1].thumbnail_link.as_deref(), Some("https://example.com/thumb"));
}

#[tokio::test]
async fn empty_folder_yields_no_entries() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let entries = client_for(&server)
        .list_children(FOLDER_ID)
        .await
        .expect("Failed to list folder");
    assert!(entries.is_empty());
}

#[tokio::test]
async fn access_token_is_reused_until_expiry() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.list_children(FOLDER_ID).await.expect("first listing failed");
    client.list_children(FOLDER_ID).await.expect("second listing failed");
}

#[tokio::test]
async fn rejected_credential_is_an_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature."
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).list_children(FOLDER_ID).await;
    assert!(matches!(result, Err(AppError::Authentication(_))));
}

#[tokio::test]
async fn drive_unauthorized_is_an_authentication_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client_for(&server).list_children(FOLDER_ID).await;
    assert!(matches!(result, Err(AppError::Authentication(_))));
}

#[tokio::test]
async fn drive_failure_is_a_provider_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let result = client_for(&server).list_children(FOLDER_ID).await;
    assert!(matches!(result, Err(AppError::Provider(_))));
}

#[tokio::test]
async fn unreachable_drive_is_a_provider_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    let mut config = DriveConfig::new("reader@test-project.iam.gserviceaccount.com", common::TEST_KEY_PEM);
    config.token_uri = format!("{}/token", server.uri());
    config.api_base = "http://127.0.0.1:1".to_string();
    let client = DriveHttpClient::new(config).expect("Failed to build drive client");

    let result = client.list_children(FOLDER_ID).await;
    assert!(matches!(result, Err(AppError::Provider(_))));
}
