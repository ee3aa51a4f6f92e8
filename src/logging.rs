//! Structured logging setup
//!
//! The resolver, codec and composer emit `tracing` events with structured
//! fields (`method`, `path`, `intent`, `status`, `detail`). This module installs
//! a `tracing-subscriber` registry that renders them:
//! - JSON for production, pretty-print for development
//! - Level and per-target filtering (`RUST_LOG` wins when set)
//! - Optional non-blocking output through `tracing-appender`
//!
//! Installing a subscriber is optional. Applications that already configure
//! `tracing` simply receive this crate's events.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Write through a background thread instead of blocking the caller
    pub async_logging: bool,
    /// Extra filter directives (comma-separated), e.g. `jsonapi_router::request=debug`
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl LogConfig {
    /// Read configuration from `JSONAPI_LOG_*` environment variables with defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `JSONAPI_LOG_LEVEL` | `info` |
    /// | `JSONAPI_LOG_FORMAT` | `json` |
    /// | `JSONAPI_LOG_ASYNC` | `false` |
    /// | `JSONAPI_LOG_TARGET_FILTER` | unset |
    /// | `JSONAPI_LOG_INCLUDE_LOCATION` | `false` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(false)
        };

        Self {
            log_level: lookup("JSONAPI_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: LogFormat::parse(&lookup("JSONAPI_LOG_FORMAT").unwrap_or_default()),
            async_logging: flag("JSONAPI_LOG_ASYNC"),
            target_filter: lookup("JSONAPI_LOG_TARGET_FILTER").filter(|s| !s.trim().is_empty()),
            include_location: flag("JSONAPI_LOG_INCLUDE_LOCATION"),
        }
    }

    /// Configuration for local development and tests
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: true,
        }
    }

    /// Configuration for production
    #[must_use]
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            async_logging: true,
            target_filter: None,
            include_location: false,
        }
    }

    /// The configured level, `INFO` when unrecognized.
    #[must_use]
    pub fn level(&self) -> Level {
        match self.log_level.trim().to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Build the filter for this configuration.
    ///
    /// `RUST_LOG` replaces the configured level when set. Target directives
    /// are always added on top.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for directive in target_filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                let directive = directive
                    .parse()
                    .with_context(|| format!("Invalid log filter directive: {directive}"))?;
                filter = filter.add_directive(directive);
            }
        }
        Ok(filter)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Install the global subscriber.
///
/// With `async_logging` the returned guard owns the background writer; keep it
/// alive for the lifetime of the application, dropping it flushes pending
/// events.
///
/// # Example
///
/// ```no_run
/// use jsonapi_router::logging::{init_logging_with_config, LogConfig};
///
/// let _guard = init_logging_with_config(&LogConfig::from_env())
///     .expect("Failed to initialize logging");
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = config.env_filter()?;

    let (writer, guard) = if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stdout), None)
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
