use crate::{env_or_default, ConfigError, FromEnv};

/// Default capacity of the async log queue.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Settings for the asynchronous log pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Maximum number of queued records before new ones are dropped.
    pub buffer_size: usize,
}

impl FromEnv for LoggerConfig {
    /// Reads `LOGGER_BUFFER_SIZE` (default 1024). Zero is rejected.
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("LOGGER_BUFFER_SIZE", &DEFAULT_BUFFER_SIZE.to_string());

        let buffer_size: usize = raw.trim().parse().map_err(|e| ConfigError::ParseError {
            key: "LOGGER_BUFFER_SIZE".to_string(),
            details: format!("{}", e),
        })?;

        if buffer_size == 0 {
            return Err(ConfigError::ParseError {
                key: "LOGGER_BUFFER_SIZE".to_string(),
                details: "buffer size must be greater than zero".to_string(),
            });
        }

        Ok(Self { buffer_size })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
