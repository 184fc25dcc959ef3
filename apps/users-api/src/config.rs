//! Configuration for the Users API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::sql::DatabaseConfig;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
        })
    }
}
