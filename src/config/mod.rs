use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MessagingConfig {
    /// Gym name interpolated into the WhatsApp messages sent to members.
    pub gym_name: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            gym_name: "Fuerza Delta".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://ironclub.db")?
            .set_default("database.max_connections", 10)?
            .set_default("messaging.gym_name", "Fuerza Delta")?
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (with IRONCLUB__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("IRONCLUB").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite://ironclub.db".to_string(),
                max_connections: 10,
            },
            messaging: MessagingConfig::default(),
        }
    }
}
