//! # Migration Configuration
//!
//! Settings for a migration run, built with fail-fast validation.
//!
//! ## Overview
//!
//! `MigrationConfig` holds everything the pipeline needs that is not a
//! service connector: the market hint for catalog searches, the upload
//! batch limit, the resolver concurrency window, and the defaults applied
//! when a destination playlist has to be created. Use the builder and call
//! `build()` to get a validated config; every rejection carries an
//! actionable message.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::MigrationConfig;
//!
//! let config = MigrationConfig::builder()
//!     .market("DK")
//!     .resolve_window(4)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.batch_limit, 99);
//! ```

use crate::error::{Error, Result};

/// Hard provider limit on items per playlist-add call. The configured batch
/// limit must stay strictly below this.
const PROVIDER_ADD_LIMIT: usize = 100;

/// Upper bound on the resolver concurrency window. Resolution is
/// provider-rate-limited; anything wider than this only queues requests.
const MAX_RESOLVE_WINDOW: usize = 8;

/// Validated settings for one migration run.
///
/// Use [`MigrationConfig::builder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Market/region code scoping catalog searches (e.g. "DK"). Searches
    /// fall back to an unscoped retry when the scoped search is empty.
    pub market: Option<String>,

    /// Maximum track ids per playlist-add call. Default 99, always < 100.
    pub batch_limit: usize,

    /// Number of catalog resolutions allowed in flight at once. Default 1
    /// (fully sequential); only the read-only resolver is ever concurrent.
    pub resolve_window: usize,

    /// Visibility for playlists the reconciler has to create.
    pub playlist_public: bool,

    /// Description for playlists the reconciler has to create.
    pub playlist_description: String,
}

impl MigrationConfig {
    /// Creates a new builder.
    pub fn builder() -> MigrationConfigBuilder {
        MigrationConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.batch_limit == 0 {
            return Err(Error::Config(
                "Batch limit must be greater than zero".to_string(),
            ));
        }

        if self.batch_limit >= PROVIDER_ADD_LIMIT {
            return Err(Error::Config(format!(
                "Batch limit {} must stay strictly below the provider's {}-item add limit",
                self.batch_limit, PROVIDER_ADD_LIMIT
            )));
        }

        if self.resolve_window == 0 {
            return Err(Error::Config(
                "Resolve window must be at least 1 (sequential)".to_string(),
            ));
        }

        if self.resolve_window > MAX_RESOLVE_WINDOW {
            return Err(Error::Config(format!(
                "Resolve window {} exceeds maximum of {}; the catalog is rate limited and wider \
                 windows only amplify throttling",
                self.resolve_window, MAX_RESOLVE_WINDOW
            )));
        }

        if let Some(market) = &self.market {
            if market.is_empty() {
                return Err(Error::Config(
                    "Market code cannot be empty; omit it instead".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            market: None,
            batch_limit: 99,
            resolve_window: 1,
            playlist_public: false,
            playlist_description: "Imported from a takeout archive".to_string(),
        }
    }
}

/// Builder for [`MigrationConfig`].
#[derive(Debug, Default)]
pub struct MigrationConfigBuilder {
    market: Option<String>,
    batch_limit: Option<usize>,
    resolve_window: Option<usize>,
    playlist_public: Option<bool>,
    playlist_description: Option<String>,
}

impl MigrationConfigBuilder {
    /// Sets the market/region code for catalog searches.
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Sets the maximum number of track ids per playlist-add call.
    ///
    /// Default: 99. Must stay strictly below the provider's 100-item limit.
    pub fn batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    /// Sets the resolver concurrency window.
    ///
    /// Default: 1 (sequential). Only catalog resolution is concurrent;
    /// reconciliation of a single playlist is always sequential.
    pub fn resolve_window(mut self, window: usize) -> Self {
        self.resolve_window = Some(window);
        self
    }

    /// Sets the visibility of playlists created during reconciliation.
    ///
    /// Default: false (private).
    pub fn playlist_public(mut self, public: bool) -> Self {
        self.playlist_public = Some(public);
        self
    }

    /// Sets the description applied to playlists created during
    /// reconciliation.
    pub fn playlist_description(mut self, description: impl Into<String>) -> Self {
        self.playlist_description = Some(description.into());
        self
    }

    /// Builds and validates the final configuration.
    pub fn build(self) -> Result<MigrationConfig> {
        let defaults = MigrationConfig::default();

        let config = MigrationConfig {
            market: self.market,
            batch_limit: self.batch_limit.unwrap_or(defaults.batch_limit),
            resolve_window: self.resolve_window.unwrap_or(defaults.resolve_window),
            playlist_public: self.playlist_public.unwrap_or(defaults.playlist_public),
            playlist_description: self
                .playlist_description
                .unwrap_or(defaults.playlist_description),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MigrationConfig::builder().build().unwrap();
        assert_eq!(config.batch_limit, 99);
        assert_eq!(config.resolve_window, 1);
        assert!(!config.playlist_public);
        assert!(config.market.is_none());
    }

    #[test]
    fn test_rejects_batch_limit_at_provider_cap() {
        let result = MigrationConfig::builder().batch_limit(100).build();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("strictly below"));
    }

    #[test]
    fn test_rejects_zero_batch_limit() {
        let result = MigrationConfig::builder().batch_limit(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_resolve_window() {
        let result = MigrationConfig::builder().resolve_window(0).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn test_rejects_excessive_resolve_window() {
        let result = MigrationConfig::builder().resolve_window(64).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("rate limited"));
    }

    #[test]
    fn test_rejects_empty_market() {
        let result = MigrationConfig::builder().market("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_values() {
        let config = MigrationConfig::builder()
            .market("DK")
            .batch_limit(50)
            .resolve_window(4)
            .playlist_public(true)
            .playlist_description("Moved over")
            .build()
            .unwrap();

        assert_eq!(config.market.as_deref(), Some("DK"));
        assert_eq!(config.batch_limit, 50);
        assert_eq!(config.resolve_window, 4);
        assert!(config.playlist_public);
        assert_eq!(config.playlist_description, "Moved over");
    }
}
