//! One file per resource; handlers only translate between HTTP and [`Service`].
//!
//! [`Service`]: crate::domain::service::Service

pub mod addresses;
pub mod contacts;
pub mod employees;
pub mod establishments;
pub mod members;
pub mod phones;
pub mod platforms;
pub mod roles;
pub mod social_links;
