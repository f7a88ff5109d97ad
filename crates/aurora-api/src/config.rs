//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use aurora_core::registry::DEFAULT_IDLE_TIMEOUT;
use aurora_gateway::elevenlabs::ElevenLabsConfig;
use aurora_gateway::gemini::GeminiConfig;

use crate::error::AppError;

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Catalog document (JSON or YAML).
    pub catalog_path: PathBuf,
    /// Generation gateway settings.
    pub gemini: GeminiConfig,
    /// Narration gateway settings.
    pub elevenlabs: ElevenLabsConfig,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
    /// How long a mounted tour or route may sit untouched before it is
    /// evicted.
    pub session_idle_timeout: Duration,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let timeout = match var("GATEWAY_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse().map_err(|e| {
                AppError::Config(format!("GATEWAY_TIMEOUT_SECS must be whole seconds: {e}"))
            })?),
            None => Duration::from_secs(30),
        };
        let session_idle_timeout = match var("AURORA_SESSION_IDLE_SECS") {
            Some(raw) => Duration::from_secs(raw.parse().map_err(|e| {
                AppError::Config(format!("AURORA_SESSION_IDLE_SECS must be whole seconds: {e}"))
            })?),
            None => DEFAULT_IDLE_TIMEOUT,
        };

        let mut gemini = GeminiConfig {
            api_key: var("GEMINI_API_KEY"),
            timeout,
            ..GeminiConfig::default()
        };
        if let Some(model) = var("GEMINI_MODEL") {
            gemini.model = model;
        }
        if let Some(base_url) = var("GEMINI_BASE_URL") {
            gemini.base_url = base_url.trim_end_matches('/').to_owned();
        }

        let mut elevenlabs = ElevenLabsConfig {
            api_key: var("ELEVENLABS_API_KEY"),
            timeout,
            ..ElevenLabsConfig::default()
        };
        if let Some(voice_id) = var("ELEVENLABS_VOICE_ID") {
            elevenlabs.voice_id = voice_id;
        }
        if let Some(base_url) = var("ELEVENLABS_BASE_URL") {
            elevenlabs.base_url = base_url.trim_end_matches('/').to_owned();
        }

        Ok(Self {
            database_url,
            host,
            port,
            catalog_path: var("AURORA_CATALOG_PATH")
                .map_or_else(|| PathBuf::from("data/entities.json"), PathBuf::from),
            gemini,
            elevenlabs,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
            session_idle_timeout,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
