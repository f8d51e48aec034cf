//! HTTP server configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Listener and reverse-proxy settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,

    /// TCP port for the HTTP listener
    pub port: u16,

    /// Peers whose `X-Forwarded-Proto` / `X-Forwarded-Host` headers are honored
    pub trusted_proxies: Vec<String>,

    /// Verbose logging
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            trusted_proxies: Vec::new(),
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Parsed trusted proxy addresses; entries that do not parse are skipped.
    ///
    /// Invalid entries are already reported by `validate`.
    pub fn trusted_proxy_addrs(&self) -> Vec<IpAddr> {
        self.trusted_proxies
            .iter()
            .filter_map(|p| p.trim().parse().ok())
            .collect()
    }
}

impl ConfigSection for ServerConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::parses_as::<IpAddr>(&self.bind_address, "server.bind_address"),
            Validator::port(self.port, "server.port"),
        ];

        for (i, proxy) in self.trusted_proxies.iter().enumerate() {
            results.push(Validator::parses_as::<IpAddr>(
                proxy,
                &format!("server.trusted_proxies[{}]", i),
            ));
        }

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "server"
    }
}
