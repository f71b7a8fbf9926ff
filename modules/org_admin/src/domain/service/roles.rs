use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{on_duplicate, page_of, require_role, Service, EMPLOYEE_ROLE};
use crate::contract::model::{EmployeeRole, EmployeeRolePatch, NewEmployeeRole};
use crate::domain::error::DomainError;
use crate::domain::repo::RoleRepo;
use crate::domain::values::OptionalText;

impl Service {
    #[instrument(name = "org_admin.service.create_role", skip(self, new), fields(name = %new.name))]
    pub async fn create_role(&self, new: NewEmployeeRole) -> Result<EmployeeRole, DomainError> {
        info!("Creating employee role");
        let name = self.name("name", &new.name)?.into_inner();
        let description = OptionalText::parse("description", new.description.as_deref())?;

        let tx = self.uow.begin().await?;
        if tx.role_find_by_name(&name).await?.is_some() {
            return Err(DomainError::conflict(EMPLOYEE_ROLE, "name", name));
        }

        let now = Utc::now();
        let role = EmployeeRole {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: now,
            updated_at: now,
        };
        tx.role_insert(&role)
            .await
            .map_err(on_duplicate(EMPLOYEE_ROLE, "name", &role.name))?;
        tx.commit().await?;

        info!(id = %role.id, "Created employee role");
        Ok(role)
    }

    #[instrument(name = "org_admin.service.get_role", skip(self), fields(id = %id))]
    pub async fn get_role(&self, id: Uuid) -> Result<EmployeeRole, DomainError> {
        debug!("Getting employee role");
        require_role(self.reader(), id).await
    }

    #[instrument(name = "org_admin.service.list_roles", skip(self))]
    pub async fn list_roles(&self, page: PageRequest) -> Result<Page<EmployeeRole>, DomainError> {
        let rows = self.reader().role_list(page).await?;
        debug!(count = rows.0.len(), "Listed employee roles");
        Ok(page_of(rows, page))
    }

    #[instrument(name = "org_admin.service.update_role", skip(self, patch), fields(id = %id))]
    pub async fn update_role(
        &self,
        id: Uuid,
        patch: EmployeeRolePatch,
    ) -> Result<EmployeeRole, DomainError> {
        info!("Updating employee role");
        let name = patch
            .name
            .as_deref()
            .map(|n| self.name("name", n))
            .transpose()?;
        let description = patch
            .description
            .map(|d| OptionalText::parse("description", d.as_deref()))
            .transpose()?;

        let tx = self.uow.begin().await?;
        let mut current = require_role(&*tx, id).await?;

        if let Some(name) = name {
            if let Some(other) = tx.role_find_by_name(name.as_str()).await? {
                if other.id != id {
                    return Err(DomainError::conflict(
                        EMPLOYEE_ROLE,
                        "name",
                        name.into_inner(),
                    ));
                }
            }
            current.name = name.into_inner();
        }
        if let Some(description) = description {
            current.description = description;
        }
        current.updated_at = Utc::now();

        tx.role_update(&current)
            .await
            .map_err(on_duplicate(EMPLOYEE_ROLE, "name", &current.name))?;
        tx.commit().await?;
        info!("Updated employee role");
        Ok(current)
    }

    /// Refused while employees or establishment members hold the role.
    #[instrument(name = "org_admin.service.delete_role", skip(self), fields(id = %id))]
    pub async fn delete_role(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting employee role");
        let tx = self.uow.begin().await?;
        require_role(&*tx, id).await?;
        if tx.role_usage_count(id).await? > 0 {
            return Err(DomainError::in_use(
                EMPLOYEE_ROLE,
                id,
                "employees or establishment members",
            ));
        }
        tx.role_delete(id).await?;
        tx.commit().await?;
        info!("Deleted employee role");
        Ok(())
    }
}
