use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub data_dir: String,
    /// Path prefix the interceptor is registered under. Empty means the server root.
    pub scope: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            data_dir: "./data".to_string(),
            scope: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let bind_address = std::env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address);
        let data_dir = std::env::var("DATA_DIR").unwrap_or(defaults.data_dir);
        let scope = std::env::var("INTERCEPT_SCOPE")
            .map(|s| normalize_scope(&s))
            .unwrap_or(defaults.scope);

        let config = Config {
            bind_address,
            data_dir,
            scope,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "BIND_ADDRESS cannot be empty".to_string(),
            ));
        }

        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "DATA_DIR cannot be empty".to_string(),
            ));
        }

        if self.scope.contains(['?', '#']) {
            return Err(ConfigError::ValidationError(format!(
                "INTERCEPT_SCOPE must be a plain path, got '{}'",
                self.scope
            )));
        }

        Ok(())
    }
}

/// Leading slash, no trailing slash; `"/"` and `""` both mean the root.
pub fn normalize_scope(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
