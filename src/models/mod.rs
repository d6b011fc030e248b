use serde::{Deserialize, Deserializer};

pub mod course;
pub mod drive;
pub mod link;

pub use course::{Course, NewCourseRequest, UpdateCourseRequest};
pub use drive::{DriveEntry, EntryKind, FolderItem};
pub use link::{Link, NewLinkRequest};

/// Treats an explicit `null` like an absent field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
