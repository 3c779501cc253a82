use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::Context;

const DEFAULT_DATABASE_PATH: &str = "patients.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_path = lookup("DATABASE_PATH").unwrap_or(DEFAULT_DATABASE_PATH.to_string());
        let bind_addr = lookup("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            database_path: PathBuf::from(database_path),
            bind_addr: bind_addr
                .parse()
                .with_context(|| format!("invalid BIND_ADDR '{bind_addr}'"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_path, PathBuf::from("patients.db"));
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("DATABASE_PATH", "/var/lib/patients/records.db"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/patients/records.db")
        );
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn test_invalid_bind_addr() {
        let result = Config::from_lookup(|key| (key == "BIND_ADDR").then(|| "nowhere".to_string()));
        assert!(result.is_err());
    }
}
