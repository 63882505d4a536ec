//! Server configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! the bare `PORT` / `UNSPLASH_API_KEY` environment variables, then
//! `PHOTOGATE_*` variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Default config file, read when present
pub const DEFAULT_CONFIG_FILE: &str = "photogate.toml";

/// Default Unsplash API endpoint
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Interface to listen on
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Unsplash access key
    pub api_key: Option<String>,
    /// Unsplash API base URL
    pub api_url: String,
    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from `path` (or `photogate.toml`) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// The layered provider stack behind `load`
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::raw().only(&["port"]))
            .merge(
                // UNPLASH_API_KEY is the historical spelling
                Env::raw()
                    .only(&["unplash_api_key", "unsplash_api_key"])
                    .map(|_| "api_key".into()),
            )
            .merge(Env::prefixed("PHOTOGATE_"))
    }

    /// Address the listener binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Override host and port from a full socket address
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.host = addr.ip();
        self.port = addr.port();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
