use anyhow::{Context, Result};

/// Value shipped in the sample `.env`; treated the same as an unset key.
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// S3 / MinIO settings for resume archival. Present only when every variable is set.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset runs the service on the in-memory profile store.
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub recommendation_cache_ttl_secs: u64,
    pub archive: Option<ArchiveConfig>,
    pub anthropic_api_key: Option<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            redis_url: optional_env("REDIS_URL"),
            recommendation_cache_ttl_secs: parse_env("RECOMMENDATION_CACHE_TTL_SECS", 3600)?,
            archive: archive_from_env(),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY")
                .filter(|key| key != PLACEHOLDER_API_KEY),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration for tests and local tooling: no external services.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            redis_url: None,
            recommendation_cache_ttl_secs: 60,
            archive: None,
            anthropic_api_key: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn archive_from_env() -> Option<ArchiveConfig> {
    Some(ArchiveConfig {
        bucket: optional_env("S3_BUCKET")?,
        endpoint: optional_env("S3_ENDPOINT")?,
        access_key_id: optional_env("AWS_ACCESS_KEY_ID")?,
        secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY")?,
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number")),
        None => Ok(default),
    }
}
