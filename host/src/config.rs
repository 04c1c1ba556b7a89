//! Command-line and environment configuration for the host binary.

use std::net::SocketAddr;

use clap::Parser;
use fwx_core::AppConfig;

/// Serve the demo fwx application over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "fwx-host", version)]
pub struct Settings {
    /// Interface to bind.
    #[arg(long, env = "FWX_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Send `X-Content-Type-Options: nosniff` with typed responses.
    #[arg(long, env = "FWX_NOSNIFF")]
    pub nosniff: bool,
}

impl Settings {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            nosniff: self.nosniff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::try_parse_from(["fwx-host"]).unwrap();
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.bind_addr().unwrap().to_string(), "127.0.0.1:5000");
        assert!(!settings.app_config().nosniff);
    }

    #[test]
    fn flags_override_defaults() {
        let settings =
            Settings::try_parse_from(["fwx-host", "--host", "0.0.0.0", "--port", "8080", "--nosniff"])
                .unwrap();
        assert_eq!(settings.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(settings.app_config().nosniff);
    }

    #[test]
    fn bad_host_is_reported() {
        let settings = Settings::try_parse_from(["fwx-host", "--host", "not a host"]).unwrap();
        assert!(settings.bind_addr().is_err());
    }
}
