use std::{collections::HashMap, time::Duration};

use config::{Config as ConfigLib, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Legacy variable name the API key was historically read from.
const LEGACY_API_KEY_VAR: &str = "SMARTLEAD_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the external marketing platform.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub lookup_timeout_secs: u64,
    pub submit_timeout_secs: u64,
    /// Where the caller is sent after a successful upload.
    pub redirect_url: String,
}

impl PlatformConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    pub fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLib::builder()
            .set_default("server.host", "localhost")?
            .set_default("server.port", 3000)?
            .set_default("platform.base_url", "https://server.smartlead.ai")?
            .set_default("platform.lookup_timeout_secs", 10)?
            .set_default("platform.submit_timeout_secs", 15)?
            .set_default("platform.redirect_url", "https://leadbird.io")?
            .add_source(File::with_name("config/settings").required(false));

        // If env_vars is provided, we use it instead of system environment
        // This is to avoid systems variables pollution across tests
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            if let Ok(api_key) = std::env::var(LEGACY_API_KEY_VAR) {
                builder = builder.set_default("platform.api_key", api_key)?;
            }
            // Should be in the format APP_SERVER__HOST or APP_PLATFORM__API_KEY
            builder = builder.add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder.build()?.try_deserialize()
    }
}
