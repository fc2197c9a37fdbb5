//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing and request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Order database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Missing .env is fine.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults_with_database_url() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.database.database_url, "postgres://localhost/storefront");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert!(!config.observability.otel.enabled, "export is opt-in");
        assert!(!config.logging.log_sql, "sql logging is opt-in");

        Ok(())
    }

    #[test]
    fn otel_flags_populate_the_otel_group() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--otel-enabled",
            "--otel-service-name",
            "storefront-json-canary",
            "--otel-trace-sample-ratio",
            "0.5",
        ])?;

        let otel = &config.observability.otel;

        assert!(otel.enabled, "--otel-enabled sets enabled");
        assert_eq!(otel.service_name, "storefront-json-canary");
        assert!((otel.sample_ratio - 0.5).abs() < f64::EPSILON, "ratio");

        Ok(())
    }

    #[test]
    fn out_of_range_sample_ratio_is_a_config_error() {
        let result = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--otel-trace-sample-ratio",
            "2",
        ]);

        assert!(result.is_err(), "ratio above 1 must be rejected");
    }
}
