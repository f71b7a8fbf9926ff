use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{on_duplicate, owned_by, page_of, require_establishment, Service, PHONE};
use crate::contract::model::{EstablishmentPhone, EstablishmentPhonePatch, NewEstablishmentPhone};
use crate::domain::error::DomainError;
use crate::domain::repo::PhoneRepo;
use crate::domain::values::{OptionalText, PhoneNumber};

impl Service {
    #[instrument(
        name = "org_admin.service.create_phone",
        skip(self, new),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn create_phone(
        &self,
        establishment_id: Uuid,
        new: NewEstablishmentPhone,
    ) -> Result<EstablishmentPhone, DomainError> {
        info!("Creating establishment phone");
        let now = Utc::now();
        let mut phone = EstablishmentPhone {
            id: Uuid::new_v4(),
            establishment_id,
            phone_number: PhoneNumber::parse("phone_number", &new.phone_number)?.into_inner(),
            label: OptionalText::parse("label", new.label.as_deref())?,
            is_primary: new.is_primary,
            created_at: now,
            updated_at: now,
        };

        let tx = self.uow.begin().await?;
        require_establishment(&*tx, establishment_id).await?;
        if tx
            .phone_find_by_number(establishment_id, &phone.phone_number)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(PHONE, "phone_number", phone.phone_number));
        }

        if tx.phone_count(establishment_id).await? == 0 {
            phone.is_primary = true;
        }
        if phone.is_primary {
            tx.phone_clear_primary(establishment_id, None).await?;
        }
        tx.phone_insert(&phone)
            .await
            .map_err(on_duplicate(PHONE, "phone_number", &phone.phone_number))?;
        tx.commit().await?;

        info!(id = %phone.id, is_primary = phone.is_primary, "Created establishment phone");
        Ok(phone)
    }

    #[instrument(
        name = "org_admin.service.get_phone",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn get_phone(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<EstablishmentPhone, DomainError> {
        debug!("Getting establishment phone");
        let found = self.reader().phone_find(id).await?;
        owned_by(found, establishment_id, |p| p.establishment_id, PHONE, id)
    }

    #[instrument(
        name = "org_admin.service.list_phones",
        skip(self),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn list_phones(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<EstablishmentPhone>, DomainError> {
        let reader = self.reader();
        require_establishment(reader, establishment_id).await?;
        let rows = reader.phone_list(establishment_id, page).await?;
        debug!(count = rows.0.len(), "Listed establishment phones");
        Ok(page_of(rows, page))
    }

    #[instrument(
        name = "org_admin.service.update_phone",
        skip(self, patch),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn update_phone(
        &self,
        establishment_id: Uuid,
        id: Uuid,
        patch: EstablishmentPhonePatch,
    ) -> Result<EstablishmentPhone, DomainError> {
        info!("Updating establishment phone");
        let number = patch
            .phone_number
            .as_deref()
            .map(|v| PhoneNumber::parse("phone_number", v))
            .transpose()?;
        let label = patch
            .label
            .map(|l| OptionalText::parse("label", l.as_deref()))
            .transpose()?;

        let tx = self.uow.begin().await?;
        let found = tx.phone_find(id).await?;
        let mut current = owned_by(found, establishment_id, |p| p.establishment_id, PHONE, id)?;

        if let Some(number) = number {
            if let Some(other) = tx
                .phone_find_by_number(establishment_id, number.as_str())
                .await?
            {
                if other.id != id {
                    return Err(DomainError::conflict(
                        PHONE,
                        "phone_number",
                        number.into_inner(),
                    ));
                }
            }
            current.phone_number = number.into_inner();
        }
        if let Some(label) = label {
            current.label = label;
        }
        if let Some(is_primary) = patch.is_primary {
            if is_primary {
                tx.phone_clear_primary(establishment_id, Some(id)).await?;
            }
            current.is_primary = is_primary;
        }
        current.updated_at = Utc::now();

        tx.phone_update(&current)
            .await
            .map_err(on_duplicate(PHONE, "phone_number", &current.phone_number))?;
        tx.commit().await?;
        info!(is_primary = current.is_primary, "Updated establishment phone");
        Ok(current)
    }

    #[instrument(
        name = "org_admin.service.delete_phone",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn delete_phone(&self, establishment_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting establishment phone");
        let tx = self.uow.begin().await?;
        let found = tx.phone_find(id).await?;
        owned_by(found, establishment_id, |p| p.establishment_id, PHONE, id)?;
        tx.phone_delete(id).await?;
        tx.commit().await?;
        info!("Deleted establishment phone");
        Ok(())
    }
}
