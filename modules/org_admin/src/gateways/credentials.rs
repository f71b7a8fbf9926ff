//! Employees as the account source for `auth`.

use async_trait::async_trait;
use auth::contract::{AdminSeed, CredentialStore, Credentials};
use std::sync::Arc;

use crate::domain::service::Service;

pub struct EmployeeCredentialStore {
    service: Arc<Service>,
}

impl EmployeeCredentialStore {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CredentialStore for EmployeeCredentialStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Credentials>> {
        let found = self.service.find_credentials(email).await?;
        Ok(found.map(|c| Credentials {
            subject: c.employee_id,
            email: c.email,
            password_hash: c.password_hash,
            is_active: c.is_active,
        }))
    }

    async fn ensure_admin(&self, seed: AdminSeed) -> anyhow::Result<bool> {
        let created = self
            .service
            .bootstrap_admin(
                &seed.email,
                &seed.first_name,
                &seed.last_name,
                &seed.password_hash,
            )
            .await?;
        Ok(created)
    }
}
