pub mod repository;
pub mod store;

pub use repository::{CourseRepository, LinkRepository};
pub use store::{DocumentStore, StoreConfig};
