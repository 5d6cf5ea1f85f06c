use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Placeholder avatar assigned to every new directory record.
pub const DEFAULT_AVATAR_PLACEHOLDER_URL: &str =
    "https://t4.ftcdn.net/jpg/09/64/89/17/360_F_964891760_h0DymPvgJ0dZtcdWLts0qQIrk9fKWpjG.jpg";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub appwrite_endpoint: String,
    pub appwrite_project_id: String,
    pub appwrite_api_key: String,
    pub appwrite_timeout_secs: u64,
    pub database_id: String,
    pub users_collection_id: String,
    pub avatar_placeholder_url: String,
    pub cookie_secure: bool,
    pub rate_limit_enabled: bool,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            appwrite_endpoint: env::var("APPWRITE_ENDPOINT")
                .context("APPWRITE_ENDPOINT must be set")?,
            appwrite_project_id: env::var("APPWRITE_PROJECT_ID")
                .context("APPWRITE_PROJECT_ID must be set")?,
            appwrite_api_key: env::var("APPWRITE_API_KEY")
                .context("APPWRITE_API_KEY must be set")?,
            appwrite_timeout_secs: env::var("APPWRITE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("APPWRITE_TIMEOUT_SECS must be a valid number")?,
            database_id: env::var("APPWRITE_DATABASE_ID")
                .context("APPWRITE_DATABASE_ID must be set")?,
            users_collection_id: env::var("APPWRITE_USERS_COLLECTION_ID")
                .context("APPWRITE_USERS_COLLECTION_ID must be set")?,
            avatar_placeholder_url: env::var("AVATAR_PLACEHOLDER_URL")
                .unwrap_or_else(|_| DEFAULT_AVATAR_PLACEHOLDER_URL.to_string()),
            cookie_secure: parse_flag("COOKIE_SECURE", true)?,
            rate_limit_enabled: parse_flag("RATE_LIMIT_ENABLED", true)?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
        })
    }
}

fn parse_flag(key: &str, default: bool) -> Result<bool> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be true or false")),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
