pub mod dto;

use std::env;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::AppError;
use crate::models::DriveEntry;

pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Listings are a single page; larger folders are truncated.
pub const PAGE_SIZE: u32 = 50;
pub const ENTRY_FIELDS: &str = "files(id,name,mimeType,thumbnailLink,webViewLink)";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

static FOLDER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_A-Za-z0-9]{25,}").expect("Invalid folder id regex"));

/// Pulls a Drive folder id out of a share URL or a bare id: the first run
/// of 25 or more URL-safe characters.
pub fn extract_folder_id(link: &str) -> Option<&str> {
    FOLDER_ID_RE.find(link).map(|m| m.as_str())
}

pub fn children_query(folder_id: &str) -> String {
    format!("'{}' in parents and trashed = false", folder_id)
}

#[derive(Clone, Debug)]
pub struct DriveConfig {
    pub client_email: String,
    pub private_key: String,
    pub scope: String,
    pub token_uri: String,
    pub api_base: String,
}

impl DriveConfig {
    pub fn new(client_email: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client_email: client_email.into(),
            private_key: private_key.into().replace("\\n", "\n"),
            scope: DEFAULT_SCOPE.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let client_email = env::var("GOOGLE_CLIENT_EMAIL")
            .map_err(|_| AppError::Configuration("GOOGLE_CLIENT_EMAIL is not set".to_string()))?;
        let private_key = env::var("GOOGLE_PRIVATE_KEY")
            .map_err(|_| AppError::Configuration("GOOGLE_PRIVATE_KEY is not set".to_string()))?;

        let mut config = Self::new(client_email, private_key);
        if let Ok(scope) = env::var("GOOGLE_DRIVE_SCOPE") {
            config.scope = scope;
        }
        if let Ok(token_uri) = env::var("GOOGLE_TOKEN_URI") {
            config.token_uri = token_uri;
        }
        if let Ok(api_base) = env::var("GOOGLE_DRIVE_API_BASE") {
            config.api_base = api_base;
        }
        Ok(config)
    }
}

#[async_trait]
pub trait DriveClient: Send + Sync {
    /// Immediate, non-trashed children of `folder_id`.
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveEntry>, AppError>;
}

struct CachedToken {
    access_token: String,
    expires_at: i64,
}

pub struct DriveHttpClient {
    client: Client,
    config: DriveConfig,
    key: EncodingKey,
    token: Mutex<Option<CachedToken>>,
}

impl DriveHttpClient {
    pub fn new(config: DriveConfig) -> Result<Self, AppError> {
        let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())
            .map_err(|e| AppError::Configuration(format!("invalid GOOGLE_PRIVATE_KEY: {}", e)))?;
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            config,
            key,
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, AppError> {
        if let Some(cached) = self.token.lock().await.as_ref() {
            if cached.expires_at > Utc::now().timestamp() + 60 {
                return Ok(cached.access_token.clone());
            }
        }

        let now = Utc::now();
        let claims = dto::JwtClaims {
            iss: self.config.client_email.clone(),
            scope: self.config.scope.clone(),
            aud: self.config.token_uri.clone(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| AppError::Authentication(format!("Failed to sign assertion: {}", e)))?;

        let response = self.client
            .post(&self.config.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Authentication(format!("token endpoint returned {}: {}", status, body)));
        }

        let token: dto::TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Authentication(format!("Failed to parse token response: {}", e)))?;

        debug!("obtained drive access token (expires in {}s)", token.expires_in);
        *self.token.lock().await = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Utc::now().timestamp() + token.expires_in,
        });

        Ok(token.access_token)
    }
}

#[async_trait]
impl DriveClient for DriveHttpClient {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveEntry>, AppError> {
        let access_token = self.access_token().await?;
        let q = children_query(folder_id);
        let url = format!("{}/files", self.config.api_base.trim_end_matches('/'));

        let response = self.client
            .get(&url)
            .bearer_auth(&access_token)
            .query(&dto::ListFilesQuery {
                q: &q,
                fields: ENTRY_FIELDS,
                page_size: PAGE_SIZE,
            })
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Drive request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            *self.token.lock().await = None;
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Authentication(format!("Drive API rejected credentials {}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!("Drive API error {}: {}", status, body)));
        }

        let list: dto::FileListResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse Drive response: {}", e)))?;

        Ok(list.files)
    }
}
