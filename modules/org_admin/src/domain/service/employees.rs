use auth::password;
use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    on_duplicate, page_of, require_employee, require_role, Service, ADMINISTRATOR_ROLE, EMPLOYEE,
    EMPLOYEE_ROLE,
};
use crate::contract::model::{
    Employee, EmployeeCredentials, EmployeePatch, EmployeeRole, NewEmployee,
};
use crate::domain::error::DomainError;
use crate::domain::repo::{EmployeeRepo, RoleRepo};
use crate::domain::values::{Email, Password, PhoneNumber};

impl Service {
    #[instrument(
        name = "org_admin.service.create_employee",
        skip(self, new),
        fields(email = %new.email, role_id = %new.role_id)
    )]
    pub async fn create_employee(&self, new: NewEmployee) -> Result<Employee, DomainError> {
        info!("Creating employee");
        let first_name = self.name("first_name", &new.first_name)?.into_inner();
        let last_name = self.name("last_name", &new.last_name)?.into_inner();
        let email = Email::parse("email", &new.email)?.into_inner();
        let phone = new
            .phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| PhoneNumber::parse("phone", p).map(PhoneNumber::into_inner))
            .transpose()?;

        let tx = self.uow.begin().await?;
        require_role(&*tx, new.role_id).await?;
        if tx.employee_find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict(EMPLOYEE, "email", email));
        }

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            phone,
            role_id: new.role_id,
            is_active: new.is_active,
            has_password: false,
            created_at: now,
            updated_at: now,
        };
        tx.employee_insert(&employee, None)
            .await
            .map_err(on_duplicate(EMPLOYEE, "email", &employee.email))?;
        tx.commit().await?;

        info!(id = %employee.id, "Created employee");
        Ok(employee)
    }

    #[instrument(name = "org_admin.service.get_employee", skip(self), fields(id = %id))]
    pub async fn get_employee(&self, id: Uuid) -> Result<Employee, DomainError> {
        debug!("Getting employee");
        require_employee(self.reader(), id).await
    }

    #[instrument(name = "org_admin.service.find_employee_by_email", skip(self))]
    pub async fn find_employee_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Employee>, DomainError> {
        let email = Email::parse("email", email)?;
        Ok(self.reader().employee_find_by_email(email.as_str()).await?)
    }

    #[instrument(name = "org_admin.service.list_employees", skip(self))]
    pub async fn list_employees(&self, page: PageRequest) -> Result<Page<Employee>, DomainError> {
        let rows = self.reader().employee_list(page).await?;
        debug!(count = rows.0.len(), "Listed employees");
        Ok(page_of(rows, page))
    }

    #[instrument(name = "org_admin.service.update_employee", skip(self, patch), fields(id = %id))]
    pub async fn update_employee(
        &self,
        id: Uuid,
        patch: EmployeePatch,
    ) -> Result<Employee, DomainError> {
        info!("Updating employee");
        let first_name = patch
            .first_name
            .as_deref()
            .map(|n| self.name("first_name", n))
            .transpose()?;
        let last_name = patch
            .last_name
            .as_deref()
            .map(|n| self.name("last_name", n))
            .transpose()?;
        let email = patch
            .email
            .as_deref()
            .map(|e| Email::parse("email", e))
            .transpose()?;
        let phone = match patch.phone {
            None => None,
            Some(None) => Some(None),
            Some(Some(p)) if p.trim().is_empty() => Some(None),
            Some(Some(p)) => Some(Some(PhoneNumber::parse("phone", &p)?.into_inner())),
        };

        let tx = self.uow.begin().await?;
        let mut current = require_employee(&*tx, id).await?;

        if let Some(role_id) = patch.role_id {
            require_role(&*tx, role_id).await?;
            current.role_id = role_id;
        }
        if let Some(email) = email {
            if let Some(other) = tx.employee_find_by_email(email.as_str()).await? {
                if other.id != id {
                    return Err(DomainError::conflict(EMPLOYEE, "email", email.into_inner()));
                }
            }
            current.email = email.into_inner();
        }
        if let Some(first_name) = first_name {
            current.first_name = first_name.into_inner();
        }
        if let Some(last_name) = last_name {
            current.last_name = last_name.into_inner();
        }
        if let Some(phone) = phone {
            current.phone = phone;
        }
        if let Some(is_active) = patch.is_active {
            current.is_active = is_active;
        }
        current.updated_at = Utc::now();

        tx.employee_update(&current)
            .await
            .map_err(on_duplicate(EMPLOYEE, "email", &current.email))?;
        tx.commit().await?;
        info!("Updated employee");
        Ok(current)
    }

    /// Refused while the employee is a member of any establishment.
    #[instrument(name = "org_admin.service.delete_employee", skip(self), fields(id = %id))]
    pub async fn delete_employee(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting employee");
        let tx = self.uow.begin().await?;
        require_employee(&*tx, id).await?;
        if tx.employee_membership_count(id).await? > 0 {
            return Err(DomainError::in_use(EMPLOYEE, id, "establishment members"));
        }
        tx.employee_delete(id).await?;
        tx.commit().await?;
        info!("Deleted employee");
        Ok(())
    }

    #[instrument(
        name = "org_admin.service.set_employee_password",
        skip(self, plain),
        fields(id = %id)
    )]
    pub async fn set_employee_password(&self, id: Uuid, plain: &str) -> Result<(), DomainError> {
        let plain = Password::parse(plain)?;
        let hash = password::hash_password(plain.expose())
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let tx = self.uow.begin().await?;
        require_employee(&*tx, id).await?;
        tx.employee_set_password(id, &hash).await?;
        tx.commit().await?;
        info!("Employee password set");
        Ok(())
    }

    /// Login lookup; unknown or malformed emails are simply absent.
    #[instrument(name = "org_admin.service.find_credentials", skip(self))]
    pub async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<EmployeeCredentials>, DomainError> {
        let Ok(email) = Email::parse("email", email) else {
            return Ok(None);
        };
        Ok(self.reader().employee_credentials(email.as_str()).await?)
    }

    /// Creates an active employee with the given password hash unless one with
    /// the email already exists. The `Administrator` role is created on demand.
    /// Returns whether an employee was created.
    #[instrument(
        name = "org_admin.service.bootstrap_admin",
        skip(self, first_name, last_name, password_hash)
    )]
    pub async fn bootstrap_admin(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let email = Email::parse("email", email)?.into_inner();
        let first_name = self.name("first_name", first_name)?.into_inner();
        let last_name = self.name("last_name", last_name)?.into_inner();

        let tx = self.uow.begin().await?;
        if tx.employee_find_by_email(&email).await?.is_some() {
            debug!("Administrator already present");
            return Ok(false);
        }

        let now = Utc::now();
        let role = match tx.role_find_by_name(ADMINISTRATOR_ROLE).await? {
            Some(role) => role,
            None => {
                let role = EmployeeRole {
                    id: Uuid::new_v4(),
                    name: ADMINISTRATOR_ROLE.to_owned(),
                    description: Some("Full access to the administration API".to_owned()),
                    created_at: now,
                    updated_at: now,
                };
                tx.role_insert(&role)
                    .await
                    .map_err(on_duplicate(EMPLOYEE_ROLE, "name", &role.name))?;
                info!(role_id = %role.id, "Created administrator role");
                role
            }
        };

        let employee = Employee {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            phone: None,
            role_id: role.id,
            is_active: true,
            has_password: true,
            created_at: now,
            updated_at: now,
        };
        tx.employee_insert(&employee, Some(password_hash))
            .await
            .map_err(on_duplicate(EMPLOYEE, "email", &employee.email))?;
        tx.commit().await?;

        info!(id = %employee.id, "Created administrator employee");
        Ok(true)
    }
}
