use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::{CourseRepository, LinkRepository};
use crate::error::AppError;
use crate::models::*;
use crate::services::FolderService;
use crate::state::AppState;

#[derive(Deserialize)]
struct FolderRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    link: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/links", get(list_links).post(create_link))
        .route("/folder", post(list_folder))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let db = state.store.handle().await?;
    sqlx::query("select 1").execute(db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseRepository::new(state.store.clone()).list().await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<NewCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let Json(req) = payload?;
    let course = CourseRepository::new(state.store.clone()).create(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = CourseRepository::new(state.store.clone()).get(&id).await?;
    Ok(Json(course))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<Course>, AppError> {
    let Json(req) = payload?;
    let course = CourseRepository::new(state.store.clone())
        .update(&id, req)
        .await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    CourseRepository::new(state.store.clone()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<Link>>, AppError> {
    let links = LinkRepository::new(state.store.clone()).list().await?;
    Ok(Json(links))
}

async fn create_link(
    State(state): State<AppState>,
    payload: Result<Json<NewLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(req) = payload?;
    LinkRepository::new(state.store.clone()).create(req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

async fn list_folder(
    State(state): State<AppState>,
    payload: Result<Json<FolderRequest>, JsonRejection>,
) -> Result<Json<Vec<FolderItem>>, AppError> {
    let Json(req) = payload?;
    let service = FolderService::new(state.drive.clone());
    let entries = service.list_folder(&req.link).await?;
    Ok(Json(entries.into_iter().map(FolderItem::from).collect()))
}
