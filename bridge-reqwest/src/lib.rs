//! # Reqwest Bridge
//!
//! The default [`HttpClient`](bridge_traits::HttpClient) implementation,
//! backed by reqwest with rustls TLS.
//!
//! Retry/backoff policy for the whole pipeline lives here: the resolver and
//! reconciler above issue each logical request once and rely on this layer
//! for 429/5xx/transport retries.

mod http;

pub use http::ReqwestHttpClient;
