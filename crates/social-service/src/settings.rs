use config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub environment: Option<String>,
    pub database_url: String,
    pub port: Option<u16>,
    /// Per-transaction statement timeout applied to the follow toggle.
    /// Expiry aborts the transaction; it never reads as success.
    pub statement_timeout_ms: Option<u64>,
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let settings = Config::builder();
    let settings = settings.add_source(Environment::default());
    settings.build()?.try_deserialize()
}
