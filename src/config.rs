use crate::utils::error::ConfigError;
use std::env;
use std::str::FromStr;

/// Configuração do serviço lida do ambiente (e do `.env`, se existir)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Roda as migrations no startup do servidor
    pub auto_migrate: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Settings {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 5000)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://users.db".to_string()),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            auto_migrate: parse_or(&lookup, "DB_AUTO_MIGRATE", false)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}
