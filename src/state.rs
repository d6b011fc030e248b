use std::sync::Arc;

use crate::db::DocumentStore;
use crate::drive::DriveClient;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub drive: Arc<dyn DriveClient>,
}
