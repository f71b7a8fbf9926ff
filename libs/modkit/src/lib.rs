//! # ModKit
//!
//! Module contracts and the glue the server uses to wire modules together.
//!
//! Modules are registered explicitly in a [`ModuleRegistry`] and driven through
//! ordered phases: init → DB → REST → start → stop.
//!
//! ```rust,ignore
//! let registry = ModuleRegistry::builder()
//!     .register(ModuleEntry::new("org_admin", org.clone()).with_db(org.clone()).with_rest(org))
//!     .register(ModuleEntry::new("api_ingress", host.clone()).with_rest_host(host.clone()).with_stateful(host))
//!     .build()?;
//! ```

pub use anyhow::Result;
pub use async_trait::async_trait;

pub mod api;
pub mod client_hub;
pub mod context;
pub mod contracts;
pub mod registry;
pub mod shutdown;

pub use api::{
    bad_request, conflict, internal_error, not_found, unauthorized, Page, PageLimits, PageParams,
    PageRequest, Problem, ProblemResponse, ValidationError,
};
pub use client_hub::{ClientHub, ClientHubError};
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};
pub use contracts::*;
pub use registry::{ModuleEntry, ModuleRegistry, RegistryError};
