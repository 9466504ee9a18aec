//! # Spotify Provider
//!
//! Spotify Web API connector for catalog search and playlist reconciliation.
//!
//! ## Overview
//!
//! - **Connector** (`connector`): [`SpotifyConnector`] implementing the
//!   `CatalogSearch` and `PlaylistService` traits
//! - **Types** (`types`): serde models for the Web API's JSON
//! - **Errors** (`error`): [`SpotifyError`] and its mapping onto
//!   `BridgeError`
//!
//! The connector issues each request exactly once; retry and backoff live in
//! the HTTP client implementation behind the `HttpClient` trait.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::SpotifyConnector;
pub use error::{Result, SpotifyError};
