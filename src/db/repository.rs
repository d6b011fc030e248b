use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::store::DocumentStore;
use crate::error::AppError;
use crate::models::{Course, Link, NewCourseRequest, NewLinkRequest, UpdateCourseRequest};

const COURSE_COLUMNS: &str = "id, drive_link, name, description, image_link, created_at";

/// Rejects anything that is not a UUID before it reaches the store.
fn parse_id(id: &str) -> Result<String, AppError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| AppError::InvalidId(id.to_string()))
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[derive(Clone)]
pub struct CourseRepository {
    store: Arc<DocumentStore>,
}

impl CourseRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Course>, AppError> {
        let db = self.store.handle().await?;
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses ORDER BY created_at ASC",
            COURSE_COLUMNS
        ))
        .fetch_all(db)
        .await?;
        Ok(courses)
    }

    pub async fn get(&self, id: &str) -> Result<Course, AppError> {
        let id = parse_id(id)?;
        self.find_by_id(&id).await?.ok_or(AppError::NotFound("Course"))
    }

    pub async fn create(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        require(&req.drive_link, "driveLink")?;
        require(&req.name, "name")?;

        let course = Course {
            id: Uuid::new_v4().to_string(),
            drive_link: req.drive_link,
            name: req.name,
            description: req.description.unwrap_or_default(),
            image_link: req.image_link.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let db = self.store.handle().await?;
        sqlx::query(
            "INSERT INTO courses (id, drive_link, name, description, image_link, created_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&course.id)
        .bind(&course.drive_link)
        .bind(&course.name)
        .bind(&course.description)
        .bind(&course.image_link)
        .bind(course.created_at)
        .execute(db)
        .await?;

        info!("created course {}", course.id);
        Ok(course)
    }

    /// Partial merge: only the supplied fields change. Concurrent updates
    /// to the same course are last-write-wins.
    pub async fn update(&self, id: &str, req: UpdateCourseRequest) -> Result<Course, AppError> {
        let id = parse_id(id)?;
        if let Some(name) = &req.name {
            require(name, "name")?;
        }
        if let Some(drive_link) = &req.drive_link {
            require(drive_link, "driveLink")?;
        }

        let mut current = self
            .find_by_id(&id)
            .await?
            .ok_or(AppError::NotFound("Course"))?;

        if let Some(name) = req.name {
            current.name = name;
        }
        if let Some(description) = req.description {
            current.description = description;
        }
        if let Some(image_link) = req.image_link {
            current.image_link = image_link;
        }
        if let Some(drive_link) = req.drive_link {
            current.drive_link = drive_link;
        }

        let db = self.store.handle().await?;
        let affected = sqlx::query(
            "UPDATE courses SET drive_link = ?, name = ?, description = ?, image_link = ? WHERE id = ?"
        )
        .bind(&current.drive_link)
        .bind(&current.name)
        .bind(&current.description)
        .bind(&current.image_link)
        .bind(&id)
        .execute(db)
        .await?
        .rows_affected();

        // deleted between the read and the write
        if affected == 0 {
            return Err(AppError::NotFound("Course"));
        }

        info!("updated course {}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        let db = self.store.handle().await?;
        let affected = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(&id)
            .execute(db)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound("Course"));
        }

        info!("deleted course {}", id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, AppError> {
        let db = self.store.handle().await?;
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = ?",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(course)
    }
}

#[derive(Clone)]
pub struct LinkRepository {
    store: Arc<DocumentStore>,
}

impl LinkRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Link>, AppError> {
        let db = self.store.handle().await?;
        let links = sqlx::query_as::<_, Link>("SELECT id, link, created FROM links ORDER BY created ASC")
            .fetch_all(db)
            .await?;
        Ok(links)
    }

    pub async fn create(&self, req: NewLinkRequest) -> Result<Link, AppError> {
        if req.link.is_empty() {
            return Err(AppError::Validation("Missing link".to_string()));
        }

        let link = Link {
            id: Uuid::new_v4().to_string(),
            link: req.link,
            created: Utc::now(),
        };

        let db = self.store.handle().await?;
        sqlx::query("INSERT INTO links (id, link, created) VALUES (?, ?, ?)")
            .bind(&link.id)
            .bind(&link.link)
            .bind(link.created)
            .execute(db)
            .await?;

        info!("created link {}", link.id);
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid_in_any_case() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(parse_id(&id).unwrap(), id);
        assert_eq!(parse_id(&id.to_uppercase()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("not-an-id"), Err(AppError::InvalidId(_))));
        assert!(matches!(parse_id(""), Err(AppError::InvalidId(_))));
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("x", "name").is_ok());
        assert!(matches!(require("", "name"), Err(AppError::Validation(_))));
        assert!(matches!(require("  ", "name"), Err(AppError::Validation(_))));
    }
}
