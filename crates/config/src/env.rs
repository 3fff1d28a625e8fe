use linkshield_common::error::{LinkshieldError, LinkshieldResult};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub model_url: String,
    pub model_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads vars with defaults.
    pub fn from_env() -> LinkshieldResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: get_var_or("HOST", "0.0.0.0"),
            port: get_var_or("PORT", "8080")
                .parse()
                .map_err(|e| LinkshieldError::Config(format!("invalid PORT: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            model_url: get_var_or("MODEL_URL", "http://127.0.0.1:5000"),
            model_timeout_secs: get_var_or("MODEL_TIMEOUT_SECS", "30")
                .parse()
                .map_err(|e| LinkshieldError::Config(format!("invalid MODEL_TIMEOUT_SECS: {e}")))?,
            max_upload_bytes: get_var_or("MAX_UPLOAD_BYTES", "16777216")
                .parse()
                .map_err(|e| LinkshieldError::Config(format!("invalid MAX_UPLOAD_BYTES: {e}")))?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
