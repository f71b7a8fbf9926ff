//! SeaORM-backed implementation of the organization storage ports.
//!
//! [`SeaOrmOrgRepository`] is generic over `C: ConnectionTrait`, so the same
//! queries run on the pool (reads) and inside a `DatabaseTransaction`
//! (everything the service mutates). [`SeaOrmUnitOfWork`] hands out both.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use modkit::api::PageRequest;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::contract::model::{
    Employee, EmployeeCredentials, EmployeeRole, Establishment, EstablishmentAddress,
    EstablishmentContact, EstablishmentMember, EstablishmentPhone, EstablishmentSocialMedia,
    SocialMediaPlatform,
};
use crate::domain::repo::{
    AddressKey, AddressRepo, ContactRepo, EmployeeRepo, EstablishmentRepo, MemberRepo, OrgRepo,
    OrgTx, PhoneRepo, PlatformRepo, RoleRepo, Rows, SocialLinkRepo, UniqueViolation, UnitOfWork,
};
use crate::domain::values::match_key;
use crate::infra::storage::entity::{
    address, contact, employee, establishment, member, phone, platform, role, social_link,
};
use crate::infra::storage::mapper::{
    address_am, contact_am, employee_am, establishment_am, member_am, phone_am, platform_am,
    role_am, social_link_am,
};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Unique-index rejections become [`UniqueViolation`]; anything else keeps `op` as context.
fn write_error(op: &'static str) -> impl FnOnce(DbErr) -> anyhow::Error {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => UniqueViolation { op, detail }.into(),
        _ => anyhow::Error::new(err).context(op),
    }
}

/// Runs `select` as a counted window, converting rows with `Into`.
async fn fetch_page<E, C, T>(
    conn: &C,
    select: Select<E>,
    page: PageRequest,
) -> anyhow::Result<Rows<T>>
where
    E: EntityTrait,
    E::Model: Sync + Into<T>,
    C: ConnectionTrait,
{
    let total = select
        .clone()
        .count(conn)
        .await
        .context("count failed")?;
    let rows = select
        .limit(page.limit)
        .offset(page.offset)
        .all(conn)
        .await
        .context("list failed")?;
    Ok((rows.into_iter().map(Into::into).collect(), total))
}

#[async_trait]
impl<C> PlatformRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn platform_find(&self, id: Uuid) -> anyhow::Result<Option<SocialMediaPlatform>> {
        let found = platform::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("platform_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn platform_find_by_name(
        &self,
        name: &str,
    ) -> anyhow::Result<Option<SocialMediaPlatform>> {
        let found = platform::Entity::find()
            .filter(platform::Column::NameKey.eq(match_key(name)))
            .one(&self.conn)
            .await
            .context("platform_find_by_name failed")?;
        Ok(found.map(Into::into))
    }

    async fn platform_list(&self, page: PageRequest) -> anyhow::Result<Rows<SocialMediaPlatform>> {
        let select = platform::Entity::find()
            .order_by_asc(platform::Column::CreatedAt)
            .order_by_asc(platform::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn platform_insert(&self, row: &SocialMediaPlatform) -> anyhow::Result<()> {
        platform_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("platform_insert failed"))?;
        Ok(())
    }

    async fn platform_update(&self, row: &SocialMediaPlatform) -> anyhow::Result<()> {
        platform_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("platform_update failed"))?;
        Ok(())
    }

    async fn platform_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = platform::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("platform_delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn platform_link_count(&self, id: Uuid) -> anyhow::Result<u64> {
        social_link::Entity::find()
            .filter(social_link::Column::PlatformId.eq(id))
            .count(&self.conn)
            .await
            .context("platform_link_count failed")
    }
}

#[async_trait]
impl<C> RoleRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn role_find(&self, id: Uuid) -> anyhow::Result<Option<EmployeeRole>> {
        let found = role::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("role_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn role_find_by_name(&self, name: &str) -> anyhow::Result<Option<EmployeeRole>> {
        let found = role::Entity::find()
            .filter(role::Column::NameKey.eq(match_key(name)))
            .one(&self.conn)
            .await
            .context("role_find_by_name failed")?;
        Ok(found.map(Into::into))
    }

    async fn role_list(&self, page: PageRequest) -> anyhow::Result<Rows<EmployeeRole>> {
        let select = role::Entity::find()
            .order_by_asc(role::Column::CreatedAt)
            .order_by_asc(role::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn role_insert(&self, row: &EmployeeRole) -> anyhow::Result<()> {
        role_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("role_insert failed"))?;
        Ok(())
    }

    async fn role_update(&self, row: &EmployeeRole) -> anyhow::Result<()> {
        role_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("role_update failed"))?;
        Ok(())
    }

    async fn role_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = role::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("role_delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn role_usage_count(&self, id: Uuid) -> anyhow::Result<u64> {
        let employees = employee::Entity::find()
            .filter(employee::Column::RoleId.eq(id))
            .count(&self.conn)
            .await
            .context("role_usage_count (employees) failed")?;
        let members = member::Entity::find()
            .filter(member::Column::RoleId.eq(id))
            .count(&self.conn)
            .await
            .context("role_usage_count (members) failed")?;
        Ok(employees + members)
    }
}

#[async_trait]
impl<C> EmployeeRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn employee_find(&self, id: Uuid) -> anyhow::Result<Option<Employee>> {
        let found = employee::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("employee_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn employee_find_by_email(&self, email: &str) -> anyhow::Result<Option<Employee>> {
        let found = employee::Entity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("employee_find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn employee_credentials(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<EmployeeCredentials>> {
        let found = employee::Entity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("employee_credentials failed")?;
        Ok(found.map(Into::into))
    }

    async fn employee_list(&self, page: PageRequest) -> anyhow::Result<Rows<Employee>> {
        let select = employee::Entity::find()
            .order_by_asc(employee::Column::CreatedAt)
            .order_by_asc(employee::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn employee_insert(
        &self,
        row: &Employee,
        password_hash: Option<&str>,
    ) -> anyhow::Result<()> {
        let mut am = employee_am(row);
        am.password_hash = Set(password_hash.map(str::to_owned));
        am.insert(&self.conn)
            .await
            .map_err(write_error("employee_insert failed"))?;
        Ok(())
    }

    async fn employee_update(&self, row: &Employee) -> anyhow::Result<()> {
        employee_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("employee_update failed"))?;
        Ok(())
    }

    async fn employee_set_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<()> {
        let am = employee::ActiveModel {
            id: Set(id),
            password_hash: Set(Some(password_hash.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        am.update(&self.conn)
            .await
            .context("employee_set_password failed")?;
        Ok(())
    }

    async fn employee_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = employee::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("employee_delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn employee_membership_count(&self, id: Uuid) -> anyhow::Result<u64> {
        member::Entity::find()
            .filter(member::Column::EmployeeId.eq(id))
            .count(&self.conn)
            .await
            .context("employee_membership_count failed")
    }
}

#[async_trait]
impl<C> EstablishmentRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn establishment_find(&self, id: Uuid) -> anyhow::Result<Option<Establishment>> {
        let found = establishment::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("establishment_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn establishment_find_by_name(
        &self,
        name: &str,
    ) -> anyhow::Result<Option<Establishment>> {
        let found = establishment::Entity::find()
            .filter(establishment::Column::NameKey.eq(match_key(name)))
            .one(&self.conn)
            .await
            .context("establishment_find_by_name failed")?;
        Ok(found.map(Into::into))
    }

    async fn establishment_list(&self, page: PageRequest) -> anyhow::Result<Rows<Establishment>> {
        let select = establishment::Entity::find()
            .order_by_asc(establishment::Column::CreatedAt)
            .order_by_asc(establishment::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn establishment_insert(&self, row: &Establishment) -> anyhow::Result<()> {
        establishment_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("establishment_insert failed"))?;
        Ok(())
    }

    async fn establishment_update(&self, row: &Establishment) -> anyhow::Result<()> {
        establishment_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("establishment_update failed"))?;
        Ok(())
    }

    async fn establishment_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = establishment::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("establishment_delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn establishment_delete_children(&self, id: Uuid) -> anyhow::Result<u64> {
        let mut removed = 0;
        removed += address::Entity::delete_many()
            .filter(address::Column::EstablishmentId.eq(id))
            .exec(&self.conn)
            .await
            .context("delete addresses failed")?
            .rows_affected;
        removed += contact::Entity::delete_many()
            .filter(contact::Column::EstablishmentId.eq(id))
            .exec(&self.conn)
            .await
            .context("delete contacts failed")?
            .rows_affected;
        removed += phone::Entity::delete_many()
            .filter(phone::Column::EstablishmentId.eq(id))
            .exec(&self.conn)
            .await
            .context("delete phones failed")?
            .rows_affected;
        removed += member::Entity::delete_many()
            .filter(member::Column::EstablishmentId.eq(id))
            .exec(&self.conn)
            .await
            .context("delete members failed")?
            .rows_affected;
        removed += social_link::Entity::delete_many()
            .filter(social_link::Column::EstablishmentId.eq(id))
            .exec(&self.conn)
            .await
            .context("delete social links failed")?
            .rows_affected;
        Ok(removed)
    }
}

#[async_trait]
impl<C> AddressRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn address_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentAddress>> {
        let found = address::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("address_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn address_find_by_key(
        &self,
        establishment_id: Uuid,
        key: AddressKey<'_>,
    ) -> anyhow::Result<Option<EstablishmentAddress>> {
        let found = address::Entity::find()
            .filter(address::Column::EstablishmentId.eq(establishment_id))
            .filter(address::Column::MatchKey.eq(key.match_key()))
            .one(&self.conn)
            .await
            .context("address_find_by_key failed")?;
        Ok(found.map(Into::into))
    }

    async fn address_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentAddress>> {
        let select = address::Entity::find()
            .filter(address::Column::EstablishmentId.eq(establishment_id))
            .order_by_asc(address::Column::CreatedAt)
            .order_by_asc(address::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn address_count(&self, establishment_id: Uuid) -> anyhow::Result<u64> {
        address::Entity::find()
            .filter(address::Column::EstablishmentId.eq(establishment_id))
            .count(&self.conn)
            .await
            .context("address_count failed")
    }

    async fn address_clear_primary(
        &self,
        establishment_id: Uuid,
        keep: Option<Uuid>,
    ) -> anyhow::Result<()> {
        let mut q = address::Entity::update_many()
            .col_expr(address::Column::IsPrimary, Expr::value(false))
            .filter(address::Column::EstablishmentId.eq(establishment_id))
            .filter(address::Column::IsPrimary.eq(true));
        if let Some(keep) = keep {
            q = q.filter(address::Column::Id.ne(keep));
        }
        q.exec(&self.conn)
            .await
            .context("address_clear_primary failed")?;
        Ok(())
    }

    async fn address_insert(&self, row: &EstablishmentAddress) -> anyhow::Result<()> {
        address_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("address_insert failed"))?;
        Ok(())
    }

    async fn address_update(&self, row: &EstablishmentAddress) -> anyhow::Result<()> {
        address_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("address_update failed"))?;
        Ok(())
    }

    async fn address_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = address::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("address_delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait]
impl<C> ContactRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn contact_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentContact>> {
        let found = contact::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("contact_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn contact_find_by_email(
        &self,
        establishment_id: Uuid,
        email: &str,
    ) -> anyhow::Result<Option<EstablishmentContact>> {
        let found = contact::Entity::find()
            .filter(contact::Column::EstablishmentId.eq(establishment_id))
            .filter(contact::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("contact_find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn contact_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentContact>> {
        let select = contact::Entity::find()
            .filter(contact::Column::EstablishmentId.eq(establishment_id))
            .order_by_asc(contact::Column::CreatedAt)
            .order_by_asc(contact::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn contact_count(&self, establishment_id: Uuid) -> anyhow::Result<u64> {
        contact::Entity::find()
            .filter(contact::Column::EstablishmentId.eq(establishment_id))
            .count(&self.conn)
            .await
            .context("contact_count failed")
    }

    async fn contact_clear_primary(
        &self,
        establishment_id: Uuid,
        keep: Option<Uuid>,
    ) -> anyhow::Result<()> {
        let mut q = contact::Entity::update_many()
            .col_expr(contact::Column::IsPrimary, Expr::value(false))
            .filter(contact::Column::EstablishmentId.eq(establishment_id))
            .filter(contact::Column::IsPrimary.eq(true));
        if let Some(keep) = keep {
            q = q.filter(contact::Column::Id.ne(keep));
        }
        q.exec(&self.conn)
            .await
            .context("contact_clear_primary failed")?;
        Ok(())
    }

    async fn contact_insert(&self, row: &EstablishmentContact) -> anyhow::Result<()> {
        contact_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("contact_insert failed"))?;
        Ok(())
    }

    async fn contact_update(&self, row: &EstablishmentContact) -> anyhow::Result<()> {
        contact_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("contact_update failed"))?;
        Ok(())
    }

    async fn contact_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = contact::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("contact_delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait]
impl<C> PhoneRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn phone_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentPhone>> {
        let found = phone::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("phone_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn phone_find_by_number(
        &self,
        establishment_id: Uuid,
        phone_number: &str,
    ) -> anyhow::Result<Option<EstablishmentPhone>> {
        let found = phone::Entity::find()
            .filter(phone::Column::EstablishmentId.eq(establishment_id))
            .filter(phone::Column::PhoneNumber.eq(phone_number))
            .one(&self.conn)
            .await
            .context("phone_find_by_number failed")?;
        Ok(found.map(Into::into))
    }

    async fn phone_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentPhone>> {
        let select = phone::Entity::find()
            .filter(phone::Column::EstablishmentId.eq(establishment_id))
            .order_by_asc(phone::Column::CreatedAt)
            .order_by_asc(phone::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn phone_count(&self, establishment_id: Uuid) -> anyhow::Result<u64> {
        phone::Entity::find()
            .filter(phone::Column::EstablishmentId.eq(establishment_id))
            .count(&self.conn)
            .await
            .context("phone_count failed")
    }

    async fn phone_clear_primary(
        &self,
        establishment_id: Uuid,
        keep: Option<Uuid>,
    ) -> anyhow::Result<()> {
        let mut q = phone::Entity::update_many()
            .col_expr(phone::Column::IsPrimary, Expr::value(false))
            .filter(phone::Column::EstablishmentId.eq(establishment_id))
            .filter(phone::Column::IsPrimary.eq(true));
        if let Some(keep) = keep {
            q = q.filter(phone::Column::Id.ne(keep));
        }
        q.exec(&self.conn)
            .await
            .context("phone_clear_primary failed")?;
        Ok(())
    }

    async fn phone_insert(&self, row: &EstablishmentPhone) -> anyhow::Result<()> {
        phone_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("phone_insert failed"))?;
        Ok(())
    }

    async fn phone_update(&self, row: &EstablishmentPhone) -> anyhow::Result<()> {
        phone_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("phone_update failed"))?;
        Ok(())
    }

    async fn phone_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = phone::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("phone_delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait]
impl<C> MemberRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn member_find(&self, id: Uuid) -> anyhow::Result<Option<EstablishmentMember>> {
        let found = member::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("member_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn member_find_by_employee(
        &self,
        establishment_id: Uuid,
        employee_id: Uuid,
    ) -> anyhow::Result<Option<EstablishmentMember>> {
        let found = member::Entity::find()
            .filter(member::Column::EstablishmentId.eq(establishment_id))
            .filter(member::Column::EmployeeId.eq(employee_id))
            .one(&self.conn)
            .await
            .context("member_find_by_employee failed")?;
        Ok(found.map(Into::into))
    }

    async fn member_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentMember>> {
        let select = member::Entity::find()
            .filter(member::Column::EstablishmentId.eq(establishment_id))
            .order_by_asc(member::Column::CreatedAt)
            .order_by_asc(member::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn member_insert(&self, row: &EstablishmentMember) -> anyhow::Result<()> {
        member_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("member_insert failed"))?;
        Ok(())
    }

    async fn member_update(&self, row: &EstablishmentMember) -> anyhow::Result<()> {
        member_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("member_update failed"))?;
        Ok(())
    }

    async fn member_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = member::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("member_delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait]
impl<C> SocialLinkRepo for SeaOrmOrgRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn social_link_find(
        &self,
        id: Uuid,
    ) -> anyhow::Result<Option<EstablishmentSocialMedia>> {
        let found = social_link::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("social_link_find failed")?;
        Ok(found.map(Into::into))
    }

    async fn social_link_find_by_platform(
        &self,
        establishment_id: Uuid,
        platform_id: Uuid,
    ) -> anyhow::Result<Option<EstablishmentSocialMedia>> {
        let found = social_link::Entity::find()
            .filter(social_link::Column::EstablishmentId.eq(establishment_id))
            .filter(social_link::Column::PlatformId.eq(platform_id))
            .one(&self.conn)
            .await
            .context("social_link_find_by_platform failed")?;
        Ok(found.map(Into::into))
    }

    async fn social_link_list(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Rows<EstablishmentSocialMedia>> {
        let select = social_link::Entity::find()
            .filter(social_link::Column::EstablishmentId.eq(establishment_id))
            .order_by_asc(social_link::Column::CreatedAt)
            .order_by_asc(social_link::Column::Id);
        fetch_page(&self.conn, select, page).await
    }

    async fn social_link_insert(&self, row: &EstablishmentSocialMedia) -> anyhow::Result<()> {
        social_link_am(row)
            .insert(&self.conn)
            .await
            .map_err(write_error("social_link_insert failed"))?;
        Ok(())
    }

    async fn social_link_update(&self, row: &EstablishmentSocialMedia) -> anyhow::Result<()> {
        social_link_am(row)
            .update(&self.conn)
            .await
            .map_err(write_error("social_link_update failed"))?;
        Ok(())
    }

    async fn social_link_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = social_link::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("social_link_delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait]
impl OrgTx for SeaOrmOrgRepository<DatabaseTransaction> {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let repo = *self;
        repo.conn.commit().await.context("commit failed")
    }
}

/// Pool-backed reader plus transactions begun from the same pool.
pub struct SeaOrmUnitOfWork {
    reader: SeaOrmOrgRepository<DatabaseConnection>,
}

impl SeaOrmUnitOfWork {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            reader: SeaOrmOrgRepository::new(conn),
        }
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn reader(&self) -> &dyn OrgRepo {
        &self.reader
    }

    async fn begin(&self) -> anyhow::Result<Box<dyn OrgTx>> {
        let tx = self
            .reader
            .conn
            .begin()
            .await
            .context("begin transaction failed")?;
        Ok(Box::new(SeaOrmOrgRepository::new(tx)))
    }
}
