//! SeaORM entities, one module per table.
//!
//! Relations are enforced by the migration's foreign keys and by the service;
//! the entities stay flat.

pub mod address;
pub mod contact;
pub mod employee;
pub mod establishment;
pub mod member;
pub mod phone;
pub mod platform;
pub mod role;
pub mod social_link;
