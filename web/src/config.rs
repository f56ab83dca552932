use std::net::SocketAddr;

use site_core::{ApiConfig, ExecutionContext};
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const ADDR_VAR: &str = "SITE_ADDR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {ADDR_VAR} {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Api(#[from] site_core::ConfigError),
}

/// Site server settings: the listen address plus the content API settings
/// for server-side rendering.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub addr: SocketAddr,
    pub api: ApiConfig,
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = std::env::var(ADDR_VAR).ok();
        Ok(Self {
            addr: parse_addr(addr.as_deref())?,
            api: ApiConfig::from_env(ExecutionContext::Server)?,
        })
    }
}

fn parse_addr(raw: Option<&str>) -> Result<SocketAddr, ConfigError> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_ADDR);
    value.parse().map_err(|source| ConfigError::InvalidAddr {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_addr_uses_default() {
        assert_eq!(parse_addr(None).unwrap().port(), 3000);
        assert_eq!(parse_addr(Some("  ")).unwrap().to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn explicit_addr_wins() {
        assert_eq!(parse_addr(Some("0.0.0.0:8080")).unwrap().port(), 8080);
    }

    #[test]
    fn malformed_addr_is_rejected() {
        let err = parse_addr(Some("localhost")).unwrap_err();
        assert!(err.to_string().starts_with("invalid SITE_ADDR \"localhost\""));
    }
}
