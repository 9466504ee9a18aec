//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the migration toolkit:
//! - Logging and tracing setup
//! - Run configuration with fail-fast validation
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other crates depend on.
//! It establishes the logging conventions and the single validated
//! configuration object a migration run is driven by.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{MigrationConfig, MigrationConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
