//! Logging, tracing and request logging config

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    Compact,

    /// One JSON object per event, with the active span list attached.
    Json,
}

/// Dependencies that are chatty at `info` and below.
const QUIET_TARGETS: [&str; 5] = ["h2", "hyper", "tower", "tonic", "opentelemetry"];

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` holds no directives
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log every statement sent to the order database
    #[arg(long, env = "LOG_SQL", default_value_t = false)]
    pub log_sql: bool,
}

impl LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset.
    pub fn default_directives(&self) -> String {
        let sqlx = if self.log_sql { "info" } else { "warn" };

        let mut directives = vec![self.log_level.clone()];

        directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));
        directives.push(format!("sqlx={sqlx}"));

        directives.join(",")
    }
}

/// OpenTelemetry export settings.
#[derive(Debug, Args)]
pub struct OtelConfig {
    /// Export spans to an OTLP collector
    #[arg(long = "otel-enabled", env = "OTEL_ENABLED", default_value_t = false)]
    pub enabled: bool,

    /// Continue traces from incoming `traceparent` headers
    #[arg(
        long = "otel-parent-propagation-enabled",
        env = "OTEL_PARENT_PROPAGATION_ENABLED",
        default_value_t = false
    )]
    pub parent_propagation: bool,

    /// OTLP gRPC endpoint
    #[arg(
        long = "otel-exporter-otlp-endpoint",
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub endpoint: String,

    /// OTLP export timeout in seconds
    #[arg(
        long = "otel-exporter-otlp-timeout-seconds",
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3
    )]
    pub timeout_seconds: u64,

    /// Reported `service.name`
    #[arg(
        long = "otel-service-name",
        env = "OTEL_SERVICE_NAME",
        default_value = "storefront-json"
    )]
    pub service_name: String,

    /// Reported `service.version`
    #[arg(
        long = "otel-service-version",
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub service_version: String,

    /// Reported `deployment.environment.name`
    #[arg(
        long = "otel-deployment-environment",
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: String,

    /// Share of root traces to sample, between 0 and 1
    #[arg(
        long = "otel-trace-sample-ratio",
        env = "OTEL_TRACE_SAMPLE_RATIO",
        default_value_t = 1.0,
        value_parser = parse_sample_ratio
    )]
    pub sample_ratio: f64,
}

/// Observability settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Span export.
    #[command(flatten)]
    pub otel: OtelConfig,

    /// Requests slower than this are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

fn parse_sample_ratio(raw: &str) -> Result<f64, String> {
    let ratio: f64 = raw
        .parse()
        .map_err(|error| format!("`{raw}` is not a number: {error}"))?;

    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("`{raw}` is outside 0.0..=1.0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, log_sql: bool) -> LoggingConfig {
        LoggingConfig {
            log_level: level.to_string(),
            log_format: LogFormat::Compact,
            log_sql,
        }
    }

    #[test]
    fn default_directives_keep_sql_quiet() {
        assert_eq!(
            logging("debug", false).default_directives(),
            "debug,h2=warn,hyper=warn,tower=warn,tonic=warn,opentelemetry=warn,sqlx=warn"
        );
    }

    #[test]
    fn log_sql_raises_sqlx_to_info() {
        let directives = logging("info", true).default_directives();

        assert!(directives.ends_with("sqlx=info"), "{directives}");
    }

    fn parses_to(raw: &str, expected: f64) -> bool {
        parse_sample_ratio(raw).is_ok_and(|ratio| (ratio - expected).abs() < f64::EPSILON)
    }

    #[test]
    fn sample_ratio_accepts_unit_range() {
        assert!(parses_to("0", 0.0), "zero");
        assert!(parses_to("0.25", 0.25), "quarter");
        assert!(parses_to("1", 1.0), "one");
    }

    #[test]
    fn sample_ratio_rejects_out_of_range_and_nan() {
        for raw in ["1.5", "-0.1", "NaN", "all"] {
            assert!(parse_sample_ratio(raw).is_err(), "{raw} should be rejected");
        }
    }
}
