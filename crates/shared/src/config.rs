//! Application configuration management.

use chrono_tz::Tz;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Language-model provider configuration.
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Spreadsheet export configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (the hosted Postgres instance).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Hosted language-model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// Provider access key. Empty disables AI drafting.
    #[serde(default)]
    pub api_key: String,
    /// Model used for `generateContent`.
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// API base URL, without a trailing slash.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1".to_string()
}

/// Spreadsheet export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// IANA timezone used for timestamps and file names.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Brand prefix stripped from entity names in the schedule sheet.
    #[serde(default)]
    pub entity_name_prefix: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            entity_name_prefix: None,
        }
    }
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

impl ExportConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns the unknown name if it is not an IANA timezone.
    pub fn tz(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| self.timezone.clone())
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.export.tz().map_err(|name| {
            config::ConfigError::Message(format!("unknown export timezone: {name}"))
        })?;
        Ok(app)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
