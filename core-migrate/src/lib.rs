//! # Migration Engine
//!
//! Resolves a normalized music library against a destination catalog and
//! reconciles the destination playlists to match it.
//!
//! ## Overview
//!
//! - **Resolver** (`resolver`): one catalog search per track, market-scoped
//!   with a single unscoped fallback; match quality derived, never stored
//! - **Reconciler** (`reconcile`): idempotent per-playlist convergence with
//!   order-preserving diffs and batched uploads
//! - **Pipeline** (`pipeline`): drives whole runs and produces a
//!   [`MigrationReport`]
//!
//! All provider access goes through the `CatalogSearch` and
//! `PlaylistService` traits; the engine holds no credentials and performs no
//! retries of its own.

pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod resolver;

pub use error::{MigrateError, Result};
pub use pipeline::{MigrationPipeline, MigrationReport, PlaylistReport};
pub use reconcile::{PlaylistReconciler, ReconcileOutcome};
pub use resolver::{MatchStatus, ResolvedTrack, TrackResolver};
