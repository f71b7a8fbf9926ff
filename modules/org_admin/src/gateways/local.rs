use async_trait::async_trait;
use modkit::api::{Page, PageRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::OrgAdminApi,
    error::OrgAdminError,
    model::{Employee, EmployeeRole, Establishment, EstablishmentMember},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the OrgAdminApi trait that delegates to the domain service
pub struct OrgAdminLocalClient {
    service: Arc<Service>,
}

impl OrgAdminLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

fn to_anyhow(e: DomainError) -> anyhow::Error {
    anyhow::Error::new(OrgAdminError::from(e))
}

#[async_trait]
impl OrgAdminApi for OrgAdminLocalClient {
    async fn get_establishment(&self, id: Uuid) -> anyhow::Result<Establishment> {
        self.service.get_establishment(id).await.map_err(to_anyhow)
    }

    async fn list_establishments(&self, page: PageRequest) -> anyhow::Result<Page<Establishment>> {
        self.service
            .list_establishments(page)
            .await
            .map_err(to_anyhow)
    }

    async fn get_employee(&self, id: Uuid) -> anyhow::Result<Employee> {
        self.service.get_employee(id).await.map_err(to_anyhow)
    }

    async fn find_employee_by_email(&self, email: &str) -> anyhow::Result<Option<Employee>> {
        self.service
            .find_employee_by_email(email)
            .await
            .map_err(to_anyhow)
    }

    async fn get_employee_role(&self, id: Uuid) -> anyhow::Result<EmployeeRole> {
        self.service.get_role(id).await.map_err(to_anyhow)
    }

    async fn list_members(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Page<EstablishmentMember>> {
        self.service
            .list_members(establishment_id, page)
            .await
            .map_err(to_anyhow)
    }
}
