//! Server configuration from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use td_core::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Artificial latency added to task and auth handlers
    pub simulated_delay: Duration,
    pub seed_on_start: bool,
    /// Front-end directory served at `/`
    pub public_dir: Option<PathBuf>,
    pub default_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            simulated_delay: Duration::ZERO,
            seed_on_start: true,
            public_dir: None,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unparsable values keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            host: var("TD_HOST")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.host),
            port: var("TD_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            simulated_delay: var("TD_SIMULATED_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulated_delay),
            seed_on_start: var("TD_SEED_ON_START")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_on_start),
            public_dir: var("TD_PUBLIC_DIR").map(PathBuf::from),
            default_page_size: var("TD_DEFAULT_PAGE_SIZE")
                .and_then(|v| v.parse::<usize>().ok())
                .map(|size| size.clamp(1, MAX_PAGE_SIZE))
                .unwrap_or(defaults.default_page_size),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
