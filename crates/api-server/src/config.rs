//! Server configuration read from the environment

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".todo-data";
const DEFAULT_PORT: u16 = 5000;

/// Which task store backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub store: StoreKind,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = var("TODO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let db_path = var("TODO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("db.sqlite"));

        let store = match var("TODO_STORE").map(|raw| raw.to_ascii_lowercase()) {
            None => StoreKind::Sqlite,
            Some(raw) => match raw.as_str() {
                "sqlite" => StoreKind::Sqlite,
                "memory" => StoreKind::Memory,
                _ => {
                    tracing::warn!("Unknown TODO_STORE '{}', using sqlite", raw);
                    StoreKind::Sqlite
                }
            },
        };

        let host = var("TODO_HOST")
            .and_then(|raw| match raw.parse::<IpAddr>() {
                Ok(host) => Some(host),
                Err(_) => {
                    tracing::warn!("Invalid TODO_HOST '{}', using 0.0.0.0", raw);
                    None
                }
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = var("TODO_PORT")
            .and_then(|raw| match raw.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!("Invalid TODO_PORT '{}', using {}", raw, DEFAULT_PORT);
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        Self {
            db_path,
            store,
            addr: SocketAddr::new(host, port),
        }
    }
}
