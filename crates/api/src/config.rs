//! Environment-driven configuration.

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

use barbermatch_auth::DEFAULT_TOKEN_TTL_HOURS;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable '{0}'")]
    Missing(&'static str),

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Where repositories keep their rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    InMemory,
    Postgres { database_url: String, max_connections: u32 },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub persistence: Persistence,
}

impl ApiConfig {
    /// In-memory configuration with the given signing secret.
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            persistence: Persistence::InMemory,
        }
    }

    /// Read the process environment, loading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", e))?;

        let jwt_secret = match get("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let ttl_hours = match get("TOKEN_TTL_HOURS") {
            Some(raw) => raw.parse::<i64>().map_err(|e| invalid("TOKEN_TTL_HOURS", e))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };
        if ttl_hours <= 0 {
            return Err(invalid("TOKEN_TTL_HOURS", "must be positive"));
        }

        let persistent = match get("USE_PERSISTENT_STORES") {
            Some(raw) => raw.parse::<bool>().map_err(|e| invalid("USE_PERSISTENT_STORES", e))?,
            None => false,
        };
        let persistence = if persistent {
            let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|e| invalid("DATABASE_MAX_CONNECTIONS", e))?,
                None => DEFAULT_MAX_CONNECTIONS,
            };
            Persistence::Postgres {
                database_url,
                max_connections,
            }
        } else {
            Persistence::InMemory
        };

        tracing::info!(%bind_addr, persistent, "configuration loaded");
        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl: Duration::hours(ttl_hours),
            persistence,
        })
    }
}

fn invalid(name: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_in_memory_with_one_day_tokens() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.token_ttl, Duration::days(1));
        assert_eq!(config.persistence, Persistence::InMemory);
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
    }

    #[test]
    fn persistent_stores_need_a_database_url() {
        let err = ApiConfig::from_lookup(lookup(&[("USE_PERSISTENT_STORES", "true")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));

        let config = ApiConfig::from_lookup(lookup(&[
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://localhost/barbermatch"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(
            config.persistence,
            Persistence::Postgres {
                database_url: "postgres://localhost/barbermatch".into(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        for pairs in [
            vec![("BIND_ADDR", "not-an-addr")],
            vec![("TOKEN_TTL_HOURS", "soon")],
            vec![("TOKEN_TTL_HOURS", "0")],
            vec![("USE_PERSISTENT_STORES", "yes")],
        ] {
            assert!(matches!(
                ApiConfig::from_lookup(lookup(&pairs)),
                Err(ConfigError::Invalid { .. })
            ));
        }
    }
}
