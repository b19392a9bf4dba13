use std::env;
use std::time::Duration;

/// Deployment environment, controlling log output format and filter level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub env: Environment,
    pub allowed_origins: Vec<String>,
    /// How often queued progress updates are flushed to the store.
    pub progress_flush_interval: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables. Every variable has a
    /// development-friendly default.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {e}"))?;
        let env_kind = Environment::parse(&env::var("APP_ENV").unwrap_or_default());
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let flush_secs = env::var("PROGRESS_FLUSH_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("invalid PROGRESS_FLUSH_SECS: {e}"))?;

        Ok(Self {
            host,
            port,
            env: env_kind,
            allowed_origins,
            progress_flush_interval: Duration::from_secs(flush_secs),
        })
    }
}
