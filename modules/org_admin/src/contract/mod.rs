pub mod client;
pub mod error;
pub mod model;

pub use client::OrgAdminApi;
pub use error::OrgAdminError;
pub use model::*;
