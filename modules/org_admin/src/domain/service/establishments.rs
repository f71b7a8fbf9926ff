use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{on_duplicate, page_of, require_establishment, Service, ESTABLISHMENT};
use crate::contract::model::{Establishment, EstablishmentPatch, NewEstablishment};
use crate::domain::error::DomainError;
use crate::domain::repo::EstablishmentRepo;
use crate::domain::values::{OptionalText, WebUrl};

impl Service {
    #[instrument(
        name = "org_admin.service.create_establishment",
        skip(self, new),
        fields(name = %new.name)
    )]
    pub async fn create_establishment(
        &self,
        new: NewEstablishment,
    ) -> Result<Establishment, DomainError> {
        info!("Creating establishment");
        let name = self.name("name", &new.name)?.into_inner();
        let description = OptionalText::parse("description", new.description.as_deref())?;
        let website = WebUrl::parse_optional("website", new.website.as_deref())?;

        let tx = self.uow.begin().await?;
        if tx.establishment_find_by_name(&name).await?.is_some() {
            return Err(DomainError::conflict(ESTABLISHMENT, "name", name));
        }

        let now = Utc::now();
        let establishment = Establishment {
            id: Uuid::new_v4(),
            name,
            description,
            website,
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
        };
        tx.establishment_insert(&establishment)
            .await
            .map_err(on_duplicate(ESTABLISHMENT, "name", &establishment.name))?;
        tx.commit().await?;

        info!(id = %establishment.id, "Created establishment");
        Ok(establishment)
    }

    #[instrument(name = "org_admin.service.get_establishment", skip(self), fields(id = %id))]
    pub async fn get_establishment(&self, id: Uuid) -> Result<Establishment, DomainError> {
        debug!("Getting establishment");
        require_establishment(self.reader(), id).await
    }

    #[instrument(name = "org_admin.service.list_establishments", skip(self))]
    pub async fn list_establishments(
        &self,
        page: PageRequest,
    ) -> Result<Page<Establishment>, DomainError> {
        let rows = self.reader().establishment_list(page).await?;
        debug!(count = rows.0.len(), "Listed establishments");
        Ok(page_of(rows, page))
    }

    #[instrument(
        name = "org_admin.service.update_establishment",
        skip(self, patch),
        fields(id = %id)
    )]
    pub async fn update_establishment(
        &self,
        id: Uuid,
        patch: EstablishmentPatch,
    ) -> Result<Establishment, DomainError> {
        info!("Updating establishment");
        let name = patch
            .name
            .as_deref()
            .map(|n| self.name("name", n))
            .transpose()?;
        let description = patch
            .description
            .map(|d| OptionalText::parse("description", d.as_deref()))
            .transpose()?;
        let website = patch
            .website
            .map(|w| WebUrl::parse_optional("website", w.as_deref()))
            .transpose()?;

        let tx = self.uow.begin().await?;
        let mut current = require_establishment(&*tx, id).await?;

        if let Some(name) = name {
            if let Some(other) = tx.establishment_find_by_name(name.as_str()).await? {
                if other.id != id {
                    return Err(DomainError::conflict(
                        ESTABLISHMENT,
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
        if let Some(website) = website {
            current.website = website;
        }
        if let Some(is_active) = patch.is_active {
            current.is_active = is_active;
        }
        current.updated_at = Utc::now();

        tx.establishment_update(&current)
            .await
            .map_err(on_duplicate(ESTABLISHMENT, "name", &current.name))?;
        tx.commit().await?;
        info!("Updated establishment");
        Ok(current)
    }

    /// Removes the establishment together with every row that hangs off it.
    #[instrument(name = "org_admin.service.delete_establishment", skip(self), fields(id = %id))]
    pub async fn delete_establishment(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting establishment");
        let tx = self.uow.begin().await?;
        require_establishment(&*tx, id).await?;
        let children = tx.establishment_delete_children(id).await?;
        tx.establishment_delete(id).await?;
        tx.commit().await?;
        info!(children, "Deleted establishment");
        Ok(())
    }
}
