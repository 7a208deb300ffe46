use bcrypt::DEFAULT_COST;
use std::{net::SocketAddr, path::PathBuf};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_DIR: &str = "../LaCebolla";

/// Cost range bcrypt accepts; anything else fails at hash time.
const HASH_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// Hosted Data Store reached over its REST endpoint.
    Postgrest { url: String, key: String },
    /// Process-local store; data is gone on restart.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub frontend_dir: PathBuf,
    pub store: StoreBackend,
    pub hash_cost: u32,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let store = match lookup("DATA_STORE").as_deref() {
            None | Some("postgrest") | Some("supabase") => StoreBackend::Postgrest {
                url: required("SUPABASE_URL")?,
                key: required("SUPABASE_KEY")?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "DATA_STORE",
                    value: other.to_owned(),
                });
            }
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let hash_cost = match lookup("BCRYPT_COST") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(cost) if HASH_COST_RANGE.contains(&cost) => cost,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "BCRYPT_COST",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_COST,
        };

        let frontend_dir = lookup("FRONTEND_DIR")
            .unwrap_or_else(|| DEFAULT_FRONTEND_DIR.to_owned())
            .into();

        Ok(Self {
            bind_addr,
            frontend_dir,
            store,
            hash_cost,
        })
    }
}
