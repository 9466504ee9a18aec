//! # Authentication Module
//!
//! Credential handling for the destination streaming service.
//!
//! ## Overview
//!
//! Credentials are resolved exactly once per run, before any catalog or
//! playlist call:
//!
//! - [`Credentials`] loads application credentials from the environment
//! - [`Session::client_credentials`] exchanges them for a catalog-search
//!   token (OAuth 2.0 client-credentials grant)
//! - [`Session::with_user_token`] wraps a user-authorized token, which is
//!   what playlist modification requires
//!
//! The resulting [`Session`] is handed to the provider connector; nothing
//! in this workspace keeps ambient/global client state.

pub mod error;
pub mod session;
pub mod types;

pub use error::{AuthError, Result};
pub use session::Session;
pub use types::{AccessToken, Credentials};
