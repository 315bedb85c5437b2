use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Insecure fallback carried over from the original deployment. Operators are
/// expected to set `EMPRE__AUTH__SESSION_SECRET` (or legacy `AUTH_SECRET`);
/// startup logs a warning whenever this value is still in use.
pub const DEFAULT_SESSION_SECRET: &str = "empre-default-secret-change-me";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory the built dashboard assets are served from.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_secret: String,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding `usuarios.json` and `empreendimentos.json`.
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (EMPRE__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.static_dir", "public")?
            .set_default("auth.session_secret", DEFAULT_SESSION_SECRET)?
            .set_default("auth.session_ttl_seconds", 60 * 60 * 8)?
            .set_default("auth.cookie_secure", false)?
            .set_default("storage.data_dir", "data")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("EMPRE")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy variable honored by earlier deployments
        if let Ok(secret) = env::var("AUTH_SECRET") {
            builder = builder.set_override("auth.session_secret", secret)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.auth.session_secret.is_empty() {
            return Err("Session secret must not be empty".to_string());
        }
        if self.auth.session_ttl_seconds < 1 {
            return Err("Session TTL must be at least 1 second".to_string());
        }
        if self.storage.data_dir.is_empty() {
            return Err("Storage data_dir must not be empty".to_string());
        }
        Ok(())
    }

    /// True when the session secret is still the insecure built-in fallback.
    pub fn uses_default_secret(&self) -> bool {
        self.auth.session_secret == DEFAULT_SESSION_SECRET
    }
}
