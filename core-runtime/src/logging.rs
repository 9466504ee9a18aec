//! # Logging & Tracing Infrastructure
//!
//! Structured logging with the `tracing` crate, supporting:
//! - Pretty, JSON, and compact output formats
//! - Module-level filtering via env-filter syntax
//! - A redaction helper for token-like values
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_level(tracing::Level::DEBUG);
//!
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("Migration run started");
//! ```

use std::io;

use tracing::Level;
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::{Error, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level for workspace crates
    pub level: Level,
    /// Custom filter string (e.g. "core_migrate=trace,provider_spotify=debug")
    pub filter: Option<String>,
    /// Display target module in logs
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            filter: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Initialize the logging system.
///
/// Call once during startup; subsequent calls return an error.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;

    let registry = tracing_subscriber::registry().with(filter);

    let init_result = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(config.display_target)
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(config.display_target)
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(config.display_target)
                    .with_writer(io::stdout),
            )
            .try_init(),
    };

    init_result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let base_level = match config.level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    };

    let filter_string = if let Some(custom_filter) = &config.filter {
        custom_filter.clone()
    } else {
        // Workspace crates at the configured level, noisy dependencies at warn
        format!(
            "core_runtime={lvl},core_auth={lvl},core_library={lvl},core_migrate={lvl},\
             provider_spotify={lvl},bridge_reqwest={lvl},h2=warn,hyper=warn,reqwest=warn",
            lvl = base_level
        )
    };

    EnvFilter::try_new(filter_string)
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))
}

/// Redact token-like values before logging them.
///
/// ```
/// use core_runtime::logging::redact_if_sensitive;
///
/// assert_eq!(redact_if_sensitive("access_token", "abc123"), "[REDACTED]");
/// assert_eq!(redact_if_sensitive("playlist", "Thumbs Up"), "Thumbs Up");
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    const SENSITIVE_FIELDS: &[&str] = &[
        "token",
        "access_token",
        "refresh_token",
        "password",
        "secret",
        "api_key",
        "authorization",
        "bearer",
    ];

    let field_lower = field_name.to_lowercase();
    if SENSITIVE_FIELDS.iter().any(|&f| field_lower.contains(f)) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_level(Level::DEBUG)
            .with_filter("core_migrate=trace")
            .with_target(false);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.filter, Some("core_migrate=trace".to_string()));
        assert!(!config.display_target);
    }

    #[test]
    fn test_redact_if_sensitive() {
        assert_eq!(
            redact_if_sensitive("access_token", "secret123"),
            "[REDACTED]"
        );
        assert_eq!(redact_if_sensitive("client_secret", "abc"), "[REDACTED]");
        assert_eq!(redact_if_sensitive("track_id", "12345"), "12345");
        assert_eq!(redact_if_sensitive("name", "Song Name"), "Song Name");
    }

    #[test]
    fn test_build_filter_from_level() {
        let config = LoggingConfig::default().with_level(Level::DEBUG);
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn test_build_custom_filter() {
        let config = LoggingConfig::default().with_filter("core_migrate=trace,hyper=error");
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("core_migrate=trace"));
    }
}
