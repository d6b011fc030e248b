use serde::{Deserialize, Serialize};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// A file or folder as listed by Drive. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveEntry {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
}

impl DriveEntry {
    pub fn kind(&self) -> EntryKind {
        EntryKind::of(&self.mime_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    Video,
    File,
}

impl EntryKind {
    pub fn of(mime_type: &str) -> Self {
        if mime_type == FOLDER_MIME_TYPE {
            EntryKind::Folder
        } else if mime_type.contains("video") {
            EntryKind::Video
        } else {
            EntryKind::File
        }
    }
}

/// Response item for the folder listing: the entry plus its display kind.
#[derive(Debug, Clone, Serialize)]
pub struct FolderItem {
    #[serde(flatten)]
    pub entry: DriveEntry,
    pub kind: EntryKind,
}

impl From<DriveEntry> for FolderItem {
    fn from(entry: DriveEntry) -> Self {
        let kind = entry.kind();
        Self { entry, kind }
    }
}
