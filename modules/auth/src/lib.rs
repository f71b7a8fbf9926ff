//! Authentication: password hashing, JWT issue/verify, bearer middleware and
//! the `/auth` endpoints.
//!
//! Accounts live elsewhere; a [`contract::CredentialStore`] registered in the
//! client hub supplies them.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod module;

pub use config::{AuthConfig, BootstrapAdmin};
pub use domain::{jwt, password};
pub use error::AuthError;
pub use module::AuthModule;
