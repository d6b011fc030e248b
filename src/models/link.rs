use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Link {
    pub id: String,
    pub link: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLinkRequest {
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub link: String,
}
