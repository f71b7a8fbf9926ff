use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    on_duplicate, owned_by, page_of, require_employee, require_establishment, require_role,
    Service, MEMBER,
};
use crate::contract::model::{
    EstablishmentMember, EstablishmentMemberPatch, NewEstablishmentMember,
};
use crate::domain::error::DomainError;
use crate::domain::repo::MemberRepo;

impl Service {
    #[instrument(
        name = "org_admin.service.create_member",
        skip(self, new),
        fields(establishment_id = %establishment_id, employee_id = %new.employee_id)
    )]
    pub async fn create_member(
        &self,
        establishment_id: Uuid,
        new: NewEstablishmentMember,
    ) -> Result<EstablishmentMember, DomainError> {
        info!("Adding establishment member");
        let tx = self.uow.begin().await?;
        require_establishment(&*tx, establishment_id).await?;
        require_employee(&*tx, new.employee_id).await?;
        require_role(&*tx, new.role_id).await?;
        if tx
            .member_find_by_employee(establishment_id, new.employee_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                MEMBER,
                "employee_id",
                new.employee_id.to_string(),
            ));
        }

        let now = Utc::now();
        let member = EstablishmentMember {
            id: Uuid::new_v4(),
            establishment_id,
            employee_id: new.employee_id,
            role_id: new.role_id,
            created_at: now,
            updated_at: now,
        };
        tx.member_insert(&member)
            .await
            .map_err(on_duplicate(MEMBER, "employee_id", member.employee_id.to_string()))?;
        tx.commit().await?;

        info!(id = %member.id, "Added establishment member");
        Ok(member)
    }

    #[instrument(
        name = "org_admin.service.get_member",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn get_member(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<EstablishmentMember, DomainError> {
        debug!("Getting establishment member");
        let found = self.reader().member_find(id).await?;
        owned_by(found, establishment_id, |m| m.establishment_id, MEMBER, id)
    }

    #[instrument(
        name = "org_admin.service.list_members",
        skip(self),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn list_members(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<EstablishmentMember>, DomainError> {
        let reader = self.reader();
        require_establishment(reader, establishment_id).await?;
        let rows = reader.member_list(establishment_id, page).await?;
        debug!(count = rows.0.len(), "Listed establishment members");
        Ok(page_of(rows, page))
    }

    /// Only the member's role can change; moving an employee means delete + create.
    #[instrument(
        name = "org_admin.service.update_member",
        skip(self, patch),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn update_member(
        &self,
        establishment_id: Uuid,
        id: Uuid,
        patch: EstablishmentMemberPatch,
    ) -> Result<EstablishmentMember, DomainError> {
        info!("Updating establishment member");
        let tx = self.uow.begin().await?;
        let found = tx.member_find(id).await?;
        let mut current = owned_by(found, establishment_id, |m| m.establishment_id, MEMBER, id)?;

        if let Some(role_id) = patch.role_id {
            require_role(&*tx, role_id).await?;
            current.role_id = role_id;
        }
        current.updated_at = Utc::now();

        tx.member_update(&current)
            .await
            .map_err(on_duplicate(MEMBER, "employee_id", current.employee_id.to_string()))?;
        tx.commit().await?;
        info!("Updated establishment member");
        Ok(current)
    }

    #[instrument(
        name = "org_admin.service.delete_member",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn delete_member(&self, establishment_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        info!("Removing establishment member");
        let tx = self.uow.begin().await?;
        let found = tx.member_find(id).await?;
        owned_by(found, establishment_id, |m| m.establishment_id, MEMBER, id)?;
        tx.member_delete(id).await?;
        tx.commit().await?;
        info!("Removed establishment member");
        Ok(())
    }
}
