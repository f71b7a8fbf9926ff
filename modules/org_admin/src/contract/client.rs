use async_trait::async_trait;
use modkit::api::{Page, PageRequest};
use uuid::Uuid;

use crate::contract::model::{Employee, EmployeeRole, Establishment, EstablishmentMember};

/// Read-side API other modules use to look at the organization.
///
/// Failures are [`crate::contract::OrgAdminError`] wrapped in `anyhow::Error`.
#[async_trait]
pub trait OrgAdminApi: Send + Sync {
    async fn get_establishment(&self, id: Uuid) -> anyhow::Result<Establishment>;

    async fn list_establishments(&self, page: PageRequest) -> anyhow::Result<Page<Establishment>>;

    async fn get_employee(&self, id: Uuid) -> anyhow::Result<Employee>;

    async fn find_employee_by_email(&self, email: &str) -> anyhow::Result<Option<Employee>>;

    async fn get_employee_role(&self, id: Uuid) -> anyhow::Result<EmployeeRole>;

    async fn list_members(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Page<EstablishmentMember>>;
}
