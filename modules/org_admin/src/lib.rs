//! Organization administration: establishments, their addresses, contacts,
//! phones, members and social media links, plus employees, employee roles and
//! social media platforms.
//!
//! Other modules should depend on [`contract`] only.

pub mod contract;

pub use contract::{client, error, model};

pub mod module;
pub use module::{OrgAdminModule, MODULE_NAME};

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
