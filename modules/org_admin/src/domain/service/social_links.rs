use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    on_duplicate, owned_by, page_of, require_establishment, require_platform, Service, SOCIAL_LINK,
};
use crate::contract::model::{
    EstablishmentSocialMedia, EstablishmentSocialMediaPatch, NewEstablishmentSocialMedia,
};
use crate::domain::error::DomainError;
use crate::domain::repo::SocialLinkRepo;

impl Service {
    #[instrument(
        name = "org_admin.service.create_social_link",
        skip(self, new),
        fields(establishment_id = %establishment_id, platform_id = %new.platform_id)
    )]
    pub async fn create_social_link(
        &self,
        establishment_id: Uuid,
        new: NewEstablishmentSocialMedia,
    ) -> Result<EstablishmentSocialMedia, DomainError> {
        info!("Linking establishment social media");
        let handle = self.name("handle", &new.handle)?.into_inner();

        let tx = self.uow.begin().await?;
        require_establishment(&*tx, establishment_id).await?;
        require_platform(&*tx, new.platform_id).await?;
        if tx
            .social_link_find_by_platform(establishment_id, new.platform_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                SOCIAL_LINK,
                "platform_id",
                new.platform_id.to_string(),
            ));
        }

        let now = Utc::now();
        let link = EstablishmentSocialMedia {
            id: Uuid::new_v4(),
            establishment_id,
            platform_id: new.platform_id,
            handle,
            created_at: now,
            updated_at: now,
        };
        tx.social_link_insert(&link)
            .await
            .map_err(on_duplicate(SOCIAL_LINK, "platform_id", link.platform_id.to_string()))?;
        tx.commit().await?;

        info!(id = %link.id, "Linked establishment social media");
        Ok(link)
    }

    #[instrument(
        name = "org_admin.service.get_social_link",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn get_social_link(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<EstablishmentSocialMedia, DomainError> {
        debug!("Getting establishment social media link");
        let found = self.reader().social_link_find(id).await?;
        owned_by(found, establishment_id, |l| l.establishment_id, SOCIAL_LINK, id)
    }

    #[instrument(
        name = "org_admin.service.list_social_links",
        skip(self),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn list_social_links(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<EstablishmentSocialMedia>, DomainError> {
        let reader = self.reader();
        require_establishment(reader, establishment_id).await?;
        let rows = reader.social_link_list(establishment_id, page).await?;
        debug!(count = rows.0.len(), "Listed establishment social media links");
        Ok(page_of(rows, page))
    }

    #[instrument(
        name = "org_admin.service.update_social_link",
        skip(self, patch),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn update_social_link(
        &self,
        establishment_id: Uuid,
        id: Uuid,
        patch: EstablishmentSocialMediaPatch,
    ) -> Result<EstablishmentSocialMedia, DomainError> {
        info!("Updating establishment social media link");
        let handle = patch
            .handle
            .as_deref()
            .map(|h| self.name("handle", h))
            .transpose()?;

        let tx = self.uow.begin().await?;
        let found = tx.social_link_find(id).await?;
        let mut current =
            owned_by(found, establishment_id, |l| l.establishment_id, SOCIAL_LINK, id)?;

        if let Some(platform_id) = patch.platform_id {
            require_platform(&*tx, platform_id).await?;
            if let Some(other) = tx
                .social_link_find_by_platform(establishment_id, platform_id)
                .await?
            {
                if other.id != id {
                    return Err(DomainError::conflict(
                        SOCIAL_LINK,
                        "platform_id",
                        platform_id.to_string(),
                    ));
                }
            }
            current.platform_id = platform_id;
        }
        if let Some(handle) = handle {
            current.handle = handle.into_inner();
        }
        current.updated_at = Utc::now();

        tx.social_link_update(&current)
            .await
            .map_err(on_duplicate(SOCIAL_LINK, "platform_id", current.platform_id.to_string()))?;
        tx.commit().await?;
        info!("Updated establishment social media link");
        Ok(current)
    }

    #[instrument(
        name = "org_admin.service.delete_social_link",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn delete_social_link(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<(), DomainError> {
        info!("Unlinking establishment social media");
        let tx = self.uow.begin().await?;
        let found = tx.social_link_find(id).await?;
        owned_by(found, establishment_id, |l| l.establishment_id, SOCIAL_LINK, id)?;
        tx.social_link_delete(id).await?;
        tx.commit().await?;
        info!("Unlinked establishment social media");
        Ok(())
    }
}
