use std::sync::Arc;

use tracing::info;

use crate::drive::{DriveClient, extract_folder_id};
use crate::error::AppError;
use crate::models::DriveEntry;

/// Read-through view of a Drive folder. Nothing is stored or cached.
#[derive(Clone)]
pub struct FolderService {
    drive: Arc<dyn DriveClient>,
}

impl FolderService {
    pub fn new(drive: Arc<dyn DriveClient>) -> Self {
        Self { drive }
    }

    pub async fn list_folder(&self, link: &str) -> Result<Vec<DriveEntry>, AppError> {
        let folder_id = extract_folder_id(link).ok_or(AppError::InvalidLink)?;
        let entries = self.drive.list_children(folder_id).await?;
        info!("listed {} entries in folder {}", entries.len(), folder_id);
        Ok(entries)
    }
}
