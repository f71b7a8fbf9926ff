use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{on_duplicate, page_of, require_platform, Service, PLATFORM};
use crate::contract::model::{
    NewSocialMediaPlatform, SocialMediaPlatform, SocialMediaPlatformPatch,
};
use crate::domain::error::DomainError;
use crate::domain::repo::PlatformRepo;
use crate::domain::values::WebUrl;

impl Service {
    #[instrument(
        name = "org_admin.service.create_platform",
        skip(self, new),
        fields(name = %new.name)
    )]
    pub async fn create_platform(
        &self,
        new: NewSocialMediaPlatform,
    ) -> Result<SocialMediaPlatform, DomainError> {
        info!("Creating social media platform");
        let name = self.name("name", &new.name)?.into_inner();
        let base_url = WebUrl::parse_optional("base_url", new.base_url.as_deref())?;

        let tx = self.uow.begin().await?;
        if tx.platform_find_by_name(&name).await?.is_some() {
            return Err(DomainError::conflict(PLATFORM, "name", name));
        }

        let now = Utc::now();
        let platform = SocialMediaPlatform {
            id: Uuid::new_v4(),
            name,
            base_url,
            created_at: now,
            updated_at: now,
        };
        tx.platform_insert(&platform)
            .await
            .map_err(on_duplicate(PLATFORM, "name", &platform.name))?;
        tx.commit().await?;

        info!(id = %platform.id, "Created social media platform");
        Ok(platform)
    }

    #[instrument(name = "org_admin.service.get_platform", skip(self), fields(id = %id))]
    pub async fn get_platform(&self, id: Uuid) -> Result<SocialMediaPlatform, DomainError> {
        debug!("Getting social media platform");
        require_platform(self.reader(), id).await
    }

    #[instrument(name = "org_admin.service.list_platforms", skip(self))]
    pub async fn list_platforms(
        &self,
        page: PageRequest,
    ) -> Result<Page<SocialMediaPlatform>, DomainError> {
        let rows = self.reader().platform_list(page).await?;
        debug!(count = rows.0.len(), "Listed social media platforms");
        Ok(page_of(rows, page))
    }

    #[instrument(name = "org_admin.service.update_platform", skip(self, patch), fields(id = %id))]
    pub async fn update_platform(
        &self,
        id: Uuid,
        patch: SocialMediaPlatformPatch,
    ) -> Result<SocialMediaPlatform, DomainError> {
        info!("Updating social media platform");
        let name = patch
            .name
            .as_deref()
            .map(|n| self.name("name", n))
            .transpose()?;
        let base_url = patch
            .base_url
            .map(|u| WebUrl::parse_optional("base_url", u.as_deref()))
            .transpose()?;

        let tx = self.uow.begin().await?;
        let mut current = require_platform(&*tx, id).await?;

        if let Some(name) = name {
            if let Some(other) = tx.platform_find_by_name(name.as_str()).await? {
                if other.id != id {
                    return Err(DomainError::conflict(PLATFORM, "name", name.into_inner()));
                }
            }
            current.name = name.into_inner();
        }
        if let Some(base_url) = base_url {
            current.base_url = base_url;
        }
        current.updated_at = Utc::now();

        tx.platform_update(&current)
            .await
            .map_err(on_duplicate(PLATFORM, "name", &current.name))?;
        tx.commit().await?;
        info!("Updated social media platform");
        Ok(current)
    }

    #[instrument(name = "org_admin.service.delete_platform", skip(self), fields(id = %id))]
    pub async fn delete_platform(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting social media platform");
        let tx = self.uow.begin().await?;
        require_platform(&*tx, id).await?;
        if tx.platform_link_count(id).await? > 0 {
            return Err(DomainError::in_use(
                PLATFORM,
                id,
                "establishment social media links",
            ));
        }
        tx.platform_delete(id).await?;
        tx.commit().await?;
        info!("Deleted social media platform");
        Ok(())
    }
}
