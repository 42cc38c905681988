use anyhow::{Context, Result};
use dotenvy::dotenv;
use extraction::SecretString;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub openai_api_key: Option<SecretString>,
    pub openai_model: Option<String>,
    pub openai_timeout_secs: u64,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_access_token_ttl: i64,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            // A missing key is a startup-time warning, not an error: the
            // server still serves reads, and imports fail per-request.
            openai_api_key: env::var("OPENAI_API_KEY").ok().map(SecretString::from),
            openai_model: env::var("OPENAI_MODEL").ok(),
            openai_timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("OPENAI_TIMEOUT_SECS must be a valid number of seconds")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "caselaw-api".to_string()),
            jwt_access_token_ttl: env::var("JWT_ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .context("JWT_ACCESS_TOKEN_TTL must be a valid number of seconds")?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
