use core_config::{AppInfo, FromEnv, app_info, logger::LoggerConfig, server::ServerConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub logger: LoggerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HTTP_SERVER_LISTEN_ADDR or HOST/PORT
        let logger = LoggerConfig::from_env()?; // LOGGER_BUFFER_SIZE, default 1024

        Ok(Self {
            app: app_info!(),
            server,
            logger,
            environment,
        })
    }
}
