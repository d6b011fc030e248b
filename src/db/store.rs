use std::env;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const CREATE_COURSES: &str = r#"
    CREATE TABLE IF NOT EXISTS courses (
        id TEXT PRIMARY KEY,
        drive_link TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        image_link TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL
    )
"#;

const CREATE_LINKS: &str = r#"
    CREATE TABLE IF NOT EXISTS links (
        id TEXT PRIMARY KEY,
        link TEXT NOT NULL,
        created TEXT NOT NULL
    )
"#;

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Result<Self, AppError> {
        let database_url = database_url.into();
        if database_url.trim().is_empty() {
            return Err(AppError::Configuration("DATABASE_URL is not set".to_string()));
        }

        Ok(Self {
            database_url,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        })
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let mut config = Self::new(env::var("DATABASE_URL").unwrap_or_default())?;
        if let Ok(raw) = env::var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = raw.parse().map_err(|_| {
                AppError::Configuration(format!("DATABASE_MAX_CONNECTIONS is not a number: {}", raw))
            })?;
        }
        Ok(config)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        let url = self.database_url.as_str();
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// An in-memory database lives only as long as its connection, so it
    /// gets exactly one that is never recycled.
    fn pool_options(&self) -> SqlitePoolOptions {
        if self.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(self.max_connections)
        }
    }
}

/// Shared handle to the backing store. The pool is opened on first use
/// and reused for the lifetime of the `DocumentStore`.
pub struct DocumentStore {
    config: StoreConfig,
    pool: OnceCell<SqlitePool>,
}

impl DocumentStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    pub async fn handle(&self) -> Result<&SqlitePool, AppError> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> Result<SqlitePool, AppError> {
        let options = SqliteConnectOptions::from_str(&self.config.database_url)
            .map_err(|e| AppError::Configuration(format!("invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true);

        let pool = self.config
            .pool_options()
            .connect_with(options)
            .await
            .map_err(AppError::Connection)?;

        sqlx::query(CREATE_COURSES)
            .execute(&pool)
            .await
            .map_err(AppError::Connection)?;
        sqlx::query(CREATE_LINKS)
            .execute(&pool)
            .await
            .map_err(AppError::Connection)?;

        info!(
            "document store connected (in_memory: {}, max_connections: {})",
            self.config.is_in_memory(),
            self.config.pool_options().get_max_connections()
        );
        Ok(pool)
    }
}
