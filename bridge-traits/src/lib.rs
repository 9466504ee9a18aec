//! # Service Bridge Traits
//!
//! Contracts between the migration core and its external collaborators.
//!
//! ## Overview
//!
//! The core pipeline never talks to the network directly. Everything it
//! consumes is expressed as a trait defined here and injected as a trait
//! object, so the same engine runs against the real provider connector,
//! a different provider, or a mock in tests.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP transport with retry and
//!   timeout handling (connectors build on this)
//! - [`CatalogSearch`](catalog::CatalogSearch) - read-only track search on
//!   the destination catalog
//! - [`PlaylistService`](playlist::PlaylistService) - playlist listing,
//!   creation, membership reads, and batched additions
//!
//! ## Error Handling
//!
//! All traits use [`BridgeError`](error::BridgeError). Implementations must
//! map an invalid or expired credential to `BridgeError::Unauthorized`;
//! callers treat that as fatal for the whole run, while any other transport
//! error only fails the unit of work in flight.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` so they can be shared across async
//! tasks behind an `Arc`.

pub mod catalog;
pub mod error;
pub mod http;
pub mod playlist;

pub use error::BridgeError;

// Re-export commonly used types
pub use catalog::{CatalogHit, CatalogSearch};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use playlist::{PlaylistService, RemotePlaylist, MAX_TRACKS_PER_ADD};
