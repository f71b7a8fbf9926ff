//! Domain service with business rules for the organization resources.
//!
//! Depends only on the storage ports. Every mutating call opens one
//! transaction via [`UnitOfWork::begin`], performs all of its reads and writes
//! through it and commits last; any early `?` drops (and rolls back) the
//! transaction. Queries go through the plain reader.

mod addresses;
mod contacts;
mod employees;
mod establishments;
mod members;
mod phones;
mod platforms;
mod roles;
mod social_links;

use std::sync::Arc;

use modkit::api::{Page, PageLimits, PageParams, PageRequest};
use uuid::Uuid;

use crate::contract::model::{Employee, EmployeeRole, Establishment, SocialMediaPlatform};
use crate::domain::error::DomainError;
use crate::domain::repo::{
    EmployeeRepo, EstablishmentRepo, OrgRepo, PlatformRepo, RoleRepo, Rows, UniqueViolation,
    UnitOfWork,
};
use crate::domain::values::Name;

pub(crate) const ESTABLISHMENT: &str = "establishment";
pub(crate) const EMPLOYEE: &str = "employee";
pub(crate) const EMPLOYEE_ROLE: &str = "employee_role";
pub(crate) const PLATFORM: &str = "social_media_platform";
pub(crate) const ADDRESS: &str = "establishment_address";
pub(crate) const CONTACT: &str = "establishment_contact";
pub(crate) const PHONE: &str = "establishment_phone";
pub(crate) const MEMBER: &str = "establishment_member";
pub(crate) const SOCIAL_LINK: &str = "establishment_social_media";

/// Role granted to the bootstrap administrator.
pub const ADMINISTRATOR_ROLE: &str = "Administrator";

#[derive(Clone)]
pub struct Service {
    uow: Arc<dyn UnitOfWork>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            default_page_size: 50,
            max_page_size: 1000,
        }
    }
}

impl Service {
    pub fn new(uow: Arc<dyn UnitOfWork>, config: ServiceConfig) -> Self {
        Self { uow, config }
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_limit: self.config.default_page_size,
            max_limit: self.config.max_page_size,
        }
    }

    /// Applies the configured defaults and caps to raw `limit`/`offset`.
    pub fn resolve_page(&self, params: &PageParams) -> Result<PageRequest, DomainError> {
        params
            .resolve(self.page_limits())
            .map_err(|e| DomainError::validation("limit", e.to_string()))
    }

    fn reader(&self) -> &dyn OrgRepo {
        self.uow.reader()
    }

    fn name(&self, field: &str, raw: &str) -> Result<Name, DomainError> {
        Name::parse(field, raw, self.config.max_name_length)
    }
}

/// A write the unique index rejected is the same conflict the pre-check reports;
/// it means a concurrent writer got there first.
fn on_duplicate(
    entity: &'static str,
    field: &'static str,
    value: impl Into<String>,
) -> impl FnOnce(anyhow::Error) -> DomainError {
    let value = value.into();
    move |e| {
        if e.is::<UniqueViolation>() {
            DomainError::conflict(entity, field, value)
        } else {
            e.into()
        }
    }
}

fn page_of<T>((items, total): Rows<T>, page: PageRequest) -> Page<T> {
    Page::new(items, total, page)
}

async fn require_establishment<R>(repo: &R, id: Uuid) -> Result<Establishment, DomainError>
where
    R: EstablishmentRepo + ?Sized,
{
    repo.establishment_find(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ESTABLISHMENT, id))
}

async fn require_employee<R>(repo: &R, id: Uuid) -> Result<Employee, DomainError>
where
    R: EmployeeRepo + ?Sized,
{
    repo.employee_find(id)
        .await?
        .ok_or_else(|| DomainError::not_found(EMPLOYEE, id))
}

async fn require_role<R>(repo: &R, id: Uuid) -> Result<EmployeeRole, DomainError>
where
    R: RoleRepo + ?Sized,
{
    repo.role_find(id)
        .await?
        .ok_or_else(|| DomainError::not_found(EMPLOYEE_ROLE, id))
}

async fn require_platform<R>(repo: &R, id: Uuid) -> Result<SocialMediaPlatform, DomainError>
where
    R: PlatformRepo + ?Sized,
{
    repo.platform_find(id)
        .await?
        .ok_or_else(|| DomainError::not_found(PLATFORM, id))
}

/// A child row read under another establishment is reported as missing.
fn owned_by<T>(
    row: Option<T>,
    establishment_id: Uuid,
    owner: impl Fn(&T) -> Uuid,
    entity: &'static str,
    id: Uuid,
) -> Result<T, DomainError> {
    row.filter(|r| owner(r) == establishment_id)
        .ok_or_else(|| DomainError::not_found(entity, id))
}

#[cfg(test)]
mod tests;
