// src/config.rs
use crate::predictor::DEFAULT_MODEL_PATH;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3030";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_vars(
            env::var("PREDICTOR_BIND_ADDR").ok(),
            env::var("PREDICTOR_MODEL_PATH").ok(),
        )
    }

    fn from_vars(
        bind_addr: Option<String>,
        model_path: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| format!("Invalid PREDICTOR_BIND_ADDR '{}': {}", bind_addr, e))?;
        Ok(Self {
            bind_addr,
            model_path: PathBuf::from(model_path.unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3030".parse().unwrap());
        assert_eq!(config.model_path, PathBuf::from("stock_price_predictor.pkl"));
    }

    #[test]
    fn overrides_are_used() {
        let config = Config::from_vars(
            Some("0.0.0.0:8080".into()),
            Some("/models/v2.pkl".into()),
        )
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.model_path, PathBuf::from("/models/v2.pkl"));
    }

    #[test]
    fn bad_bind_addr_is_an_error() {
        let err = Config::from_vars(Some("localhost".into()), None).unwrap_err();
        assert!(err.to_string().contains("PREDICTOR_BIND_ADDR"));
    }
}
