use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{on_duplicate, owned_by, page_of, require_establishment, Service, CONTACT};
use crate::contract::model::{
    EstablishmentContact, EstablishmentContactPatch, NewEstablishmentContact,
};
use crate::domain::error::DomainError;
use crate::domain::repo::ContactRepo;
use crate::domain::values::{Email, OptionalText};

impl Service {
    #[instrument(
        name = "org_admin.service.create_contact",
        skip(self, new),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn create_contact(
        &self,
        establishment_id: Uuid,
        new: NewEstablishmentContact,
    ) -> Result<EstablishmentContact, DomainError> {
        info!("Creating establishment contact");
        let now = Utc::now();
        let mut contact = EstablishmentContact {
            id: Uuid::new_v4(),
            establishment_id,
            name: self.name("name", &new.name)?.into_inner(),
            email: Email::parse("email", &new.email)?.into_inner(),
            position: OptionalText::parse("position", new.position.as_deref())?,
            is_primary: new.is_primary,
            created_at: now,
            updated_at: now,
        };

        let tx = self.uow.begin().await?;
        require_establishment(&*tx, establishment_id).await?;
        if tx
            .contact_find_by_email(establishment_id, &contact.email)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(CONTACT, "email", contact.email));
        }

        if tx.contact_count(establishment_id).await? == 0 {
            contact.is_primary = true;
        }
        if contact.is_primary {
            tx.contact_clear_primary(establishment_id, None).await?;
        }
        tx.contact_insert(&contact)
            .await
            .map_err(on_duplicate(CONTACT, "email", &contact.email))?;
        tx.commit().await?;

        info!(id = %contact.id, is_primary = contact.is_primary, "Created establishment contact");
        Ok(contact)
    }

    #[instrument(
        name = "org_admin.service.get_contact",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn get_contact(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<EstablishmentContact, DomainError> {
        debug!("Getting establishment contact");
        let found = self.reader().contact_find(id).await?;
        owned_by(found, establishment_id, |c| c.establishment_id, CONTACT, id)
    }

    #[instrument(
        name = "org_admin.service.list_contacts",
        skip(self),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn list_contacts(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<EstablishmentContact>, DomainError> {
        let reader = self.reader();
        require_establishment(reader, establishment_id).await?;
        let rows = reader.contact_list(establishment_id, page).await?;
        debug!(count = rows.0.len(), "Listed establishment contacts");
        Ok(page_of(rows, page))
    }

    #[instrument(
        name = "org_admin.service.update_contact",
        skip(self, patch),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn update_contact(
        &self,
        establishment_id: Uuid,
        id: Uuid,
        patch: EstablishmentContactPatch,
    ) -> Result<EstablishmentContact, DomainError> {
        info!("Updating establishment contact");
        let name = patch
            .name
            .as_deref()
            .map(|v| self.name("name", v))
            .transpose()?;
        let email = patch
            .email
            .as_deref()
            .map(|v| Email::parse("email", v))
            .transpose()?;
        let position = patch
            .position
            .map(|p| OptionalText::parse("position", p.as_deref()))
            .transpose()?;

        let tx = self.uow.begin().await?;
        let found = tx.contact_find(id).await?;
        let mut current = owned_by(found, establishment_id, |c| c.establishment_id, CONTACT, id)?;

        if let Some(email) = email {
            if let Some(other) = tx
                .contact_find_by_email(establishment_id, email.as_str())
                .await?
            {
                if other.id != id {
                    return Err(DomainError::conflict(CONTACT, "email", email.into_inner()));
                }
            }
            current.email = email.into_inner();
        }
        if let Some(name) = name {
            current.name = name.into_inner();
        }
        if let Some(position) = position {
            current.position = position;
        }
        if let Some(is_primary) = patch.is_primary {
            if is_primary {
                tx.contact_clear_primary(establishment_id, Some(id)).await?;
            }
            current.is_primary = is_primary;
        }
        current.updated_at = Utc::now();

        tx.contact_update(&current)
            .await
            .map_err(on_duplicate(CONTACT, "email", &current.email))?;
        tx.commit().await?;
        info!(is_primary = current.is_primary, "Updated establishment contact");
        Ok(current)
    }

    #[instrument(
        name = "org_admin.service.delete_contact",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn delete_contact(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<(), DomainError> {
        info!("Deleting establishment contact");
        let tx = self.uow.begin().await?;
        let found = tx.contact_find(id).await?;
        owned_by(found, establishment_id, |c| c.establishment_id, CONTACT, id)?;
        tx.contact_delete(id).await?;
        tx.commit().await?;
        info!("Deleted establishment contact");
        Ok(())
    }
}
