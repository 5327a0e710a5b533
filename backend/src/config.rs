//! Server configuration.
//!
//! Settings come from a TOML file, then selected environment variables
//! override individual fields:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! cors_origin = "http://localhost:8080"
//!
//! [database]
//! url = "sqlite://allowance.db"
//!
//! [auth]
//! jwt_secret = "change-me"
//! token_lifetime_hours = 10
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "ALLOWANCE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "allowance.toml";
/// Secret used when nothing else is configured. Only fit for local runs.
pub const DEV_JWT_SECRET: &str = "allowance-tracker-dev-secret";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin; `*` allows any
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origin: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://allowance.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_lifetime_hours: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_lifetime_hours: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load_config(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: AppConfig = toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Fall back to defaults only when the file does not exist. A file that
    /// exists but fails to parse or validate is an error.
    pub fn load_config_or_default(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("No config file at {:?}, using default config", config_path);
            return Ok(AppConfig::default());
        }

        let config = Self::load_config(config_path)?;
        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Apply `PORT`, `DATABASE_URL` and `JWT_SECRET` overrides.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", port))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret must not be empty"));
        }
        if self.auth.token_lifetime_hours == 0 {
            return Err(anyhow!("auth.token_lifetime_hours must be greater than zero"));
        }
        if self.database.url.trim().is_empty() {
            return Err(anyhow!("database.url must not be empty"));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Load the file named by `ALLOWANCE_CONFIG`, then apply environment overrides.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::from_path_and_env(&path, |key| std::env::var(key).ok())
    }

    pub fn from_path_and_env<F>(config_path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_config_or_default(config_path)?;
        config.apply_env_overrides(lookup)?;
        config.validate()?;

        if config.auth.jwt_secret == DEV_JWT_SECRET {
            warn!("Using the built-in development JWT secret; set JWT_SECRET in production");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn write_config(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("allowance-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = write_config(
            r#"
            [server]
            port = 8081

            [auth]
            jwt_secret = "file-secret"
            "#,
        );

        let config = AppConfig::load_config(&path).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "file-secret");
        assert_eq!(config.auth.token_lifetime_hours, 10);
        assert_eq!(config.database, DatabaseConfig::default());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_files() {
        let empty_secret = write_config("[auth]\njwt_secret = \"\"\n");
        assert!(AppConfig::load_config(&empty_secret).is_err());

        let zero_lifetime = write_config("[auth]\ntoken_lifetime_hours = 0\n");
        assert!(AppConfig::load_config(&zero_lifetime).is_err());

        let broken = write_config("[server\nport = ");
        assert!(AppConfig::load_config(&broken).is_err());

        for path in [empty_secret, zero_lifetime, broken] {
            fs::remove_file(path).unwrap();
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_config_or_default(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(config, AppConfig::default());

        let resolved = AppConfig::from_path_and_env(Path::new("/definitely/not/here.toml"), |_| None).unwrap();
        assert_eq!(resolved.auth.jwt_secret, DEV_JWT_SECRET);
    }

    #[test]
    fn test_invalid_file_is_not_replaced_by_defaults() {
        let path = write_config("[auth]\njwt_secret = \"\"\ntoken_lifetime_hours = 0\n");

        assert!(AppConfig::load_config_or_default(&path).is_err());
        assert!(AppConfig::from_path_and_env(&path, |_| None).is_err());

        // Overrides do not rescue a file that fails to load
        let overridden =
            AppConfig::from_path_and_env(&path, |key| (key == "JWT_SECRET").then(|| "env-secret".to_string()));
        assert!(overridden.is_err());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "9000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "env-secret"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.auth.jwt_secret, "env-secret");

        let mut bad_port = AppConfig::default();
        assert!(bad_port
            .apply_env_overrides(|key| (key == "PORT").then(|| "http".to_string()))
            .is_err());
    }
}
