use std::env;
use std::ops::RangeInclusive;

use auth::PasswordCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// Which repository implementation backs the service.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    InMemory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_days")]
    pub expiration_days: i64,
}

fn default_expiration_days() -> i64 {
    auth::jwt::DEFAULT_TOKEN_LIFETIME_DAYS
}

impl JwtConfig {
    /// Accepted session lifetimes, in days.
    pub const EXPIRATION_DAYS_RANGE: RangeInclusive<i64> = 1..=3650;

    fn validate(&self) -> Result<(), ConfigError> {
        if Self::EXPIRATION_DAYS_RANGE.contains(&self.expiration_days) {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "jwt.expiration_days must be within {}..={}, got {}",
                Self::EXPIRATION_DAYS_RANGE.start(),
                Self::EXPIRATION_DAYS_RANGE.end(),
                self.expiration_days
            )))
        }
    }
}

/// Argon2 cost parameters for stored password hashes.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PasswordConfig {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = PasswordCost::default();
        Self {
            memory_cost_kib: cost.memory_kib,
            time_cost: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

impl From<PasswordConfig> for PasswordCost {
    fn from(config: PasswordConfig) -> Self {
        PasswordCost {
            memory_kib: config.memory_cost_kib,
            iterations: config.time_cost,
            parallelism: config.parallelism,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__BACKEND=in_memory overrides database.backend
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_sources(configuration)
    }

    fn from_sources(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Self = configuration.try_deserialize()?;
        config.jwt.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let sources = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Config::from_sources(sources)
    }

    fn with_expiration(days: i64) -> String {
        format!(
            r#"
            [server]
            http_port = 8080

            [database]
            backend = "in_memory"

            [jwt]
            secret = "a_secret_crect"
            expiration_days = {}
            "#,
            days
        )
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config = parse(
            r#"
            [server]
            http_port = 8080

            [database]
            backend = "in_memory"

            [jwt]
            secret = "a_secret_crect"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.backend, StorageBackend::InMemory);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.expiration_days, 7);
        assert_eq!(
            PasswordCost::from(config.password).memory_kib,
            PasswordCost::default().memory_kib
        );
    }

    #[test]
    fn test_expiration_days_bounds() {
        assert_eq!(parse(&with_expiration(1)).unwrap().jwt.expiration_days, 1);
        assert_eq!(parse(&with_expiration(3650)).unwrap().jwt.expiration_days, 3650);

        for days in [0, -1, 3651, i64::MAX] {
            let err = parse(&with_expiration(days)).unwrap_err();
            assert!(
                err.to_string().contains("jwt.expiration_days"),
                "unexpected error for {}: {}",
                days,
                err
            );
        }
    }
}
