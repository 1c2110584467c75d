//! Runtime configuration, read from the environment.

use std::net::SocketAddr;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `SITEERP_BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `SITEERP_SEED`: start from the bundled demo data.
    pub seed: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed: true,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys use defaults; invalid values
    /// are logged and replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = match lookup("SITEERP_BIND_ADDR") {
            None => defaults.bind_addr,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_BIND_ADDR, "invalid SITEERP_BIND_ADDR; using default");
                defaults.bind_addr
            }),
        };

        let seed = match lookup("SITEERP_SEED") {
            None => defaults.seed,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!(value = %raw, default = defaults.seed, "invalid SITEERP_SEED; using default");
                defaults.seed
            }),
        };

        Self { bind_addr, seed }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
