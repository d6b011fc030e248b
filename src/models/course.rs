use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub drive_link: String,
    pub name: String,
    pub description: String,
    pub image_link: String,
    pub created_at: DateTime<Utc>,
}

/// Missing fields deserialize as empty so the repository can reject them
/// with a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub drive_link: String,
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub name: String,
    pub description: Option<String>,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_link: Option<String>,
    pub drive_link: Option<String>,
}
