//! Structured logging initialisation.
//!
//! Configured from environment variables:
//!
//! - `SPA_ROUTER_LOG_LEVEL` - trace/debug/info/warn/error (default `info`)
//! - `SPA_ROUTER_LOG_FORMAT` - `pretty` or `json` (default `pretty`)
//! - `SPA_ROUTER_LOG_TARGET_FILTER` - extra comma-separated filter directives
//! - `SPA_ROUTER_LOG_INCLUDE_LOCATION` - include file:line (default `false`)
//!
//! `RUST_LOG`, when set, takes precedence over the level. Logs go to stderr so
//! `render` and `routes` output stays clean on stdout.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for machines, pretty-print for a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Module filter (comma-separated directives)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("SPA_ROUTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("SPA_ROUTER_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
            target_filter: env::var("SPA_ROUTER_LOG_TARGET_FILTER").ok(),
            include_location: env::var("SPA_ROUTER_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Level parsed from [`LogConfig::log_level`], `INFO` when unrecognised
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        // Client disconnects are logged by may_minihttp at info; keep them out.
        if let Ok(directive) = "may_minihttp=warn".parse() {
            env_filter = env_filter.add_directive(directive);
        }

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }
        env_filter
    }
}

/// Initialise logging from the environment.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LogConfig::from_env())
}

/// Initialise logging with an explicit configuration.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
