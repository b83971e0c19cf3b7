//! Configuration management
//!
//! Every operation service reads the same configuration surface: the shared
//! storage root, a bind address and port, and the upload size ceiling.
//! Values come from an optional config.toml with FILEOPS_* environment
//! overrides, loaded once at startup into an immutable value.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration, shared by all four operation binaries
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Directory all operations are confined to (default: ./storage)
    pub storage_root: String,

    /// IP address to bind the HTTP listener (default: 0.0.0.0)
    pub bind_address: String,

    /// Port for the HTTP listener (default: 8080)
    pub port: u16,

    /// Upper bound on an upload body in MiB, enforced before the handler
    /// reads the body (default: 100)
    pub max_upload_size_mb: u64,
}

impl ServiceConfig {
    /// Load configuration from defaults, an optional config.toml, and
    /// FILEOPS_* environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("storage_root", "./storage")?
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("max_upload_size_mb", 100)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("FILEOPS"))
            .build()?;

        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_root.is_empty() {
            return Err(ConfigError::Message("storage_root cannot be empty".into()));
        }

        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.max_upload_size_mb == 0 {
            return Err(ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get the storage root as a PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the upload ceiling in bytes
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_size_mb * 1024 * 1024) as usize
    }
}
