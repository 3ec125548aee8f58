use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use tracing::warn;

pub(crate) const DEFAULT_PORT: u16 = 5000;
pub(crate) const DEFAULT_DATASET_PATH: &str = "./data/clean_data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) host: IpAddr,
    pub(crate) port: u16,
    pub(crate) dataset_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

fn parse_or_default<T: FromStr>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring {name}={value:?}, unable to parse it");
            default
        }),
    }
}

impl Config {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `HOST`, `PORT` and `DATASET_PATH` through `lookup`.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: parse_or_default("HOST", lookup("HOST"), defaults.host),
            port: parse_or_default("PORT", lookup("PORT"), defaults.port),
            dataset_path: lookup("DATASET_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
        }
    }

    pub(crate) fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
