//! Catalog Search Abstraction
//!
//! Read-only search against the destination service's track catalog.

use async_trait::async_trait;

use crate::error::Result;

/// One ranked result from a catalog track search.
///
/// Carries exactly the fields the resolver needs for match classification:
/// the provider track id, the returned track name, the album name, and the
/// primary artist name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogHit {
    /// Provider-assigned track identifier
    pub id: String,

    /// Track name as the catalog spells it
    pub name: String,

    /// Album name
    pub album_name: String,

    /// Primary artist name
    pub artist_name: String,
}

/// Track search against an external music catalog.
///
/// Searches are read-only and side-effect free. A zero-result response is a
/// normal outcome, not an error; implementations must only fail on
/// transport-level problems (network, authentication).
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search the catalog for tracks matching `query`, ranked best-first.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text query, passed to the provider verbatim
    /// * `market` - Optional market/region code restricting the result set
    /// * `limit` - Maximum number of hits to return
    async fn search_tracks(
        &self,
        query: &str,
        market: Option<&str>,
        limit: u32,
    ) -> Result<Vec<CatalogHit>>;
}
