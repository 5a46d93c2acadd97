//! # trawl-auth
//!
//! Bearer token acquisition for the log query API via the OAuth
//! client-credentials grant. Any failure here is fatal and happens before
//! the first page is fetched.

pub mod client_credentials;
pub mod error;

pub use client_credentials::{ClientCredentials, fetch_token};
pub use error::AuthError;
