//! Storage ports of the organization domain.
//!
//! One trait per table keeps the method sets readable; [`OrgRepo`] bundles them
//! so the service can hold a single object. Lookups that back uniqueness rules
//! take values already normalized by [`crate::domain::values`]; names match
//! case-insensitively through [`match_key`].

use async_trait::async_trait;
use modkit::api::PageRequest;
use uuid::Uuid;

use crate::contract::model::{
    Employee, EmployeeCredentials, EmployeeRole, Establishment, EstablishmentAddress,
    EstablishmentContact, EstablishmentMember, EstablishmentPhone, EstablishmentSocialMedia,
    SocialMediaPlatform,
};
use crate::domain::values::match_key;

/// A window of rows plus the total row count.
pub type Rows<T> = (Vec<T>, u64);

/// A write was rejected by a unique index.
///
/// Storage adapters raise this instead of a plain database error so the
/// service can report the same conflict its own checks would have.
#[derive(Debug, thiserror::Error)]
#[error("{op}: unique constraint violated ({detail})")]
pub struct UniqueViolation {
    pub op: &'static str,
    pub detail: String,
}

#[async_trait]
pub trait PlatformRepo: Send + Sync {
    async fn platform_find(&self, id: Uuid) -> anyhow::Result<Option<SocialMediaPlatform>>;
    async fn platform_find_by_name(&self, name: &str)
        -> anyhow::Result<Option<SocialMediaPlatform>>;
    async fn platform_list(&self, page: PageRequest) -> anyhow::Result<Rows<SocialMediaPlatform>>;
    async fn platform_insert(&self, row: &SocialMediaPlatform) -> anyhow::Result<()>;
    async fn platform_update(&self, row: &SocialMediaPlatform) -> anyhow::Result<()>;
    async fn platform_delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Establishment links pointing at the platform.
    async fn platform_link_count(&self, id: Uuid) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait RoleRepo: Send + Sync {
    async fn role_find(&self, id: Uuid) -> anyhow::Result<Option<EmployeeRole>>;
    async fn role_find_by_name(&self, name: &str) -> anyhow::Result<Option<EmployeeRole>>;
    async fn role_list(&self, page: PageRequest) -> anyhow::Result<Rows<EmployeeRole>>;
    async fn role_insert(&self, row: &EmployeeRole) -> anyhow::Result<()>;
    async fn role_update(&self, row: &EmployeeRole) -> anyhow::Result<()>;
    async fn role_delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Employees plus establishment members holding the role.
    async fn role_usage_count(&self, id: Uuid) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait EmployeeRepo: Send + Sync {
    async fn employee_find(&self, id: Uuid) -> anyhow::Result<Option<Employee>>;
    async fn employee_find_by_email(&self, email: &str) -> anyhow::Result<Option<Employee>>;
    async fn employee_credentials(&self, email: &str)
        -> anyhow::Result<Option<EmployeeCredentials>>;
    async fn employee_list(&self, page: PageRequest) -> anyhow::Result<Rows<Employee>>;
    async fn employee_insert(
        &self,
        row: &Employee,
        password_hash: Option<&str>,
    ) -> anyhow::Result<()>;
    /// Writes every column except the password hash.
    async fn employee_update(&self, row: &Employee) -> anyhow::Result<()>;
    async fn employee_set_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<()>;
    async fn employee_delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn employee_membership_count(&self, id: Uuid) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait EstablishmentRepo: Send + Sync {
    async fn establishment_find(&self, id: Uuid) -> anyhow::Result<Option<Establishment>>;
    async fn establishment_find_by_name(&self, name: &str)
        -> anyhow::Result<Option<Establishment>>;
    async fn establishment_list(&self, page: PageRequest) -> anyhow::Result<Rows<Establishment>>;
    async fn establishment_insert(&self, row: &Establishment) -> anyhow::Result<()>;
    async fn establishment_update(&self, row: &Establishment) -> anyhow::Result<()>;
    async fn establishment_delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Removes addresses, contacts, phones, members and social links; returns rows removed.
    async fn establishment_delete_children(&self, id: Uuid) -> anyhow::Result<u64>;
}

/// Natural key of an address within its establishment.
#[derive(Debug, Clone, Copy)]
pub struct AddressKey<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub postal_code: &'a str,
    pub country: &'a str,
}

impl<'a> From<&'a EstablishmentAddress> for AddressKey<'a> {
    fn from(a: &'a EstablishmentAddress) -> Self {
        Self {
            street: &a.street,
            city: &a.city,
            postal_code: &a.postal_code,
            country: &a.country,
        }
    }
}

impl AddressKey<'_> {
    /// Case-folded key compared against the stored `match_key` column.
    pub fn match_key(&self) -> String {
        [self.street, self.city, self.postal_code, self.country]
            .map(match_key)
            .join("\u{1f}")
    }
}

#[async_trait]
pub trait AddressRepo: Send + Sync {
    async fn address_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentAddress>>;
    async fn address_find_by_key(
        &self,
        establishment_id: Uuid,
        key: AddressKey<'_>,
    ) -> anyhow::Result<Option<EstablishmentAddress>>;
    async fn address_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentAddress>>;
    async fn address_count(&self, establishment_id: Uuid) -> anyhow::Result<u64>;
    /// Sets `is_primary = false` on every address of the establishment except `keep`.
    async fn address_clear_primary(
        &self,
        establishment_id: Uuid,
        keep: Option<Uuid>,
    ) -> anyhow::Result<()>;
    async fn address_insert(&self, row: &EstablishmentAddress) -> anyhow::Result<()>;
    async fn address_update(&self, row: &EstablishmentAddress) -> anyhow::Result<()>;
    async fn address_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn contact_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentContact>>;
    async fn contact_find_by_email(
        &self,
        establishment_id: Uuid,
        email: &str,
    ) -> anyhow::Result<Option<EstablishmentContact>>;
    async fn contact_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentContact>>;
    async fn contact_count(&self, establishment_id: Uuid) -> anyhow::Result<u64>;
    async fn contact_clear_primary(
        &self,
        establishment_id: Uuid,
        keep: Option<Uuid>,
    ) -> anyhow::Result<()>;
    async fn contact_insert(&self, row: &EstablishmentContact) -> anyhow::Result<()>;
    async fn contact_update(&self, row: &EstablishmentContact) -> anyhow::Result<()>;
    async fn contact_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait PhoneRepo: Send + Sync {
    async fn phone_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentPhone>>;
    async fn phone_find_by_number(
        &self,
        establishment_id: Uuid,
        phone_number: &str,
    ) -> anyhow::Result<Option<EstablishmentPhone>>;
    async fn phone_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentPhone>>;
    async fn phone_count(&self, establishment_id: Uuid) -> anyhow::Result<u64>;
    async fn phone_clear_primary(
        &self,
        establishment_id: Uuid,
        keep: Option<Uuid>,
    ) -> anyhow::Result<()>;
    async fn phone_insert(&self, row: &EstablishmentPhone) -> anyhow::Result<()>;
    async fn phone_update(&self, row: &EstablishmentPhone) -> anyhow::Result<()>;
    async fn phone_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait MemberRepo: Send + Sync {
    async fn member_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentMember>>;
    async fn member_find_by_employee(
        &self,
        establishment_id: Uuid,
        employee_id: Uuid,
    ) -> anyhow::Result<Option<EstablishmentMember>>;
    async fn member_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentMember>>;
    async fn member_insert(&self, row: &EstablishmentMember) -> anyhow::Result<()>;
    async fn member_update(&self, row: &EstablishmentMember) -> anyhow::Result<()>;
    async fn member_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait SocialLinkRepo: Send + Sync {
    async fn social_link_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentSocialMedia>>;
    async fn social_link_find_by_platform(
        &self,
        establishment_id: Uuid,
        platform_id: Uuid,
    ) -> anyhow::Result<Option<EstablishmentSocialMedia>>;
    async fn social_link_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentSocialMedia>>;
    async fn social_link_insert(&self, row: &EstablishmentSocialMedia) -> anyhow::Result<()>;
    async fn social_link_update(&self, row: &EstablishmentSocialMedia) -> anyhow::Result<()>;
    async fn social_link_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Every table of the organization schema.
pub trait OrgRepo:
    PlatformRepo
    + RoleRepo
    + EmployeeRepo
    + EstablishmentRepo
    + AddressRepo
    + ContactRepo
    + PhoneRepo
    + MemberRepo
    + SocialLinkRepo
{
}

impl<T> OrgRepo for T where
    T: PlatformRepo
        + RoleRepo
        + EmployeeRepo
        + EstablishmentRepo
        + AddressRepo
        + ContactRepo
        + PhoneRepo
        + MemberRepo
        + SocialLinkRepo
        + ?Sized
{
}

/// An open transaction. Dropping it without [`OrgTx::commit`] rolls back.
#[async_trait]
pub trait OrgTx: OrgRepo {
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
}

/// Source of transactions for mutating calls and a plain reader for queries.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn reader(&self) -> &dyn OrgRepo;

    async fn begin(&self) -> anyhow::Result<Box<dyn OrgTx>>;
}
