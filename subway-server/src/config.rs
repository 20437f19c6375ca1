//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::loader::LoadPolicy;
use crate::network::ChainPolicy;

/// Default network file, relative to the working directory.
pub const DEFAULT_NETWORK_FILE: &str = "data/wuhan.txt";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Segment file to load at startup
    pub network_file: PathBuf,

    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// How the loader treats a segment that doesn't continue its line
    pub chain_policy: ChainPolicy,

    /// How the loader treats a bad row
    pub load_policy: LoadPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network_file: PathBuf::from(DEFAULT_NETWORK_FILE),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            chain_policy: ChainPolicy::Strict,
            load_policy: LoadPolicy::Abort,
        }
    }
}

impl ServerConfig {
    /// Reads `SUBWAY_NETWORK_FILE`, `SUBWAY_BIND_ADDR`,
    /// `SUBWAY_CHAIN_POLICY` and `SUBWAY_LOAD_POLICY`, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env) but with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SUBWAY_NETWORK_FILE") {
            config.network_file = PathBuf::from(path);
        }

        if let Some(addr) = lookup("SUBWAY_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|_| ConfigError::InvalidValue {
                var: "SUBWAY_BIND_ADDR",
                value: addr.clone(),
            })?;
        }

        if let Some(policy) = lookup("SUBWAY_CHAIN_POLICY") {
            config.chain_policy = match policy.to_ascii_lowercase().as_str() {
                "strict" => ChainPolicy::Strict,
                "lenient" => ChainPolicy::Lenient,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "SUBWAY_CHAIN_POLICY",
                        value: policy,
                    });
                }
            };
        }

        if let Some(policy) = lookup("SUBWAY_LOAD_POLICY") {
            config.load_policy = match policy.to_ascii_lowercase().as_str() {
                "abort" => LoadPolicy::Abort,
                "skip" | "skip_invalid" => LoadPolicy::SkipInvalid,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "SUBWAY_LOAD_POLICY",
                        value: policy,
                    });
                }
            };
        }

        Ok(config)
    }
}
