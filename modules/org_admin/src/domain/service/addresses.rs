use chrono::Utc;
use modkit::api::{Page, PageRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{on_duplicate, owned_by, page_of, require_establishment, Service, ADDRESS};
use crate::contract::model::{
    EstablishmentAddress, EstablishmentAddressPatch, NewEstablishmentAddress,
};
use crate::domain::error::DomainError;
use crate::domain::repo::{AddressKey, AddressRepo};
use crate::domain::values::OptionalText;

fn describe(a: &EstablishmentAddress) -> String {
    format!("{}, {} {}, {}", a.street, a.postal_code, a.city, a.country)
}

impl Service {
    #[instrument(
        name = "org_admin.service.create_address",
        skip(self, new),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn create_address(
        &self,
        establishment_id: Uuid,
        new: NewEstablishmentAddress,
    ) -> Result<EstablishmentAddress, DomainError> {
        info!("Creating establishment address");
        let now = Utc::now();
        let mut address = EstablishmentAddress {
            id: Uuid::new_v4(),
            establishment_id,
            street: self.name("street", &new.street)?.into_inner(),
            city: self.name("city", &new.city)?.into_inner(),
            state: OptionalText::parse("state", new.state.as_deref())?,
            postal_code: self.name("postal_code", &new.postal_code)?.into_inner(),
            country: self.name("country", &new.country)?.into_inner(),
            is_primary: new.is_primary,
            created_at: now,
            updated_at: now,
        };

        let tx = self.uow.begin().await?;
        require_establishment(&*tx, establishment_id).await?;
        if tx
            .address_find_by_key(establishment_id, AddressKey::from(&address))
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(ADDRESS, "address", describe(&address)));
        }

        if tx.address_count(establishment_id).await? == 0 {
            address.is_primary = true;
        }
        if address.is_primary {
            tx.address_clear_primary(establishment_id, None).await?;
        }
        tx.address_insert(&address)
            .await
            .map_err(on_duplicate(ADDRESS, "address", describe(&address)))?;
        tx.commit().await?;

        info!(id = %address.id, is_primary = address.is_primary, "Created establishment address");
        Ok(address)
    }

    #[instrument(
        name = "org_admin.service.get_address",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn get_address(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<EstablishmentAddress, DomainError> {
        debug!("Getting establishment address");
        let found = self.reader().address_find(id).await?;
        owned_by(found, establishment_id, |a| a.establishment_id, ADDRESS, id)
    }

    #[instrument(
        name = "org_admin.service.list_addresses",
        skip(self),
        fields(establishment_id = %establishment_id)
    )]
    pub async fn list_addresses(
        &self,
        establishment_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<EstablishmentAddress>, DomainError> {
        let reader = self.reader();
        require_establishment(reader, establishment_id).await?;
        let rows = reader.address_list(establishment_id, page).await?;
        debug!(count = rows.0.len(), "Listed establishment addresses");
        Ok(page_of(rows, page))
    }

    #[instrument(
        name = "org_admin.service.update_address",
        skip(self, patch),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn update_address(
        &self,
        establishment_id: Uuid,
        id: Uuid,
        patch: EstablishmentAddressPatch,
    ) -> Result<EstablishmentAddress, DomainError> {
        info!("Updating establishment address");
        let street = patch
            .street
            .as_deref()
            .map(|v| self.name("street", v))
            .transpose()?;
        let city = patch
            .city
            .as_deref()
            .map(|v| self.name("city", v))
            .transpose()?;
        let postal_code = patch
            .postal_code
            .as_deref()
            .map(|v| self.name("postal_code", v))
            .transpose()?;
        let country = patch
            .country
            .as_deref()
            .map(|v| self.name("country", v))
            .transpose()?;
        let state = patch
            .state
            .map(|s| OptionalText::parse("state", s.as_deref()))
            .transpose()?;

        let tx = self.uow.begin().await?;
        let found = tx.address_find(id).await?;
        let mut current = owned_by(found, establishment_id, |a| a.establishment_id, ADDRESS, id)?;

        let key_changed =
            street.is_some() || city.is_some() || postal_code.is_some() || country.is_some();
        if let Some(v) = street {
            current.street = v.into_inner();
        }
        if let Some(v) = city {
            current.city = v.into_inner();
        }
        if let Some(v) = postal_code {
            current.postal_code = v.into_inner();
        }
        if let Some(v) = country {
            current.country = v.into_inner();
        }
        if let Some(state) = state {
            current.state = state;
        }
        if key_changed {
            if let Some(other) = tx
                .address_find_by_key(establishment_id, AddressKey::from(&current))
                .await?
            {
                if other.id != id {
                    return Err(DomainError::conflict(ADDRESS, "address", describe(&current)));
                }
            }
        }
        if let Some(is_primary) = patch.is_primary {
            if is_primary {
                tx.address_clear_primary(establishment_id, Some(id)).await?;
            }
            current.is_primary = is_primary;
        }
        current.updated_at = Utc::now();

        tx.address_update(&current)
            .await
            .map_err(on_duplicate(ADDRESS, "address", describe(&current)))?;
        tx.commit().await?;
        info!(is_primary = current.is_primary, "Updated establishment address");
        Ok(current)
    }

    /// Deleting the primary address leaves the establishment without one.
    #[instrument(
        name = "org_admin.service.delete_address",
        skip(self),
        fields(establishment_id = %establishment_id, id = %id)
    )]
    pub async fn delete_address(
        &self,
        establishment_id: Uuid,
        id: Uuid,
    ) -> Result<(), DomainError> {
        info!("Deleting establishment address");
        let tx = self.uow.begin().await?;
        let found = tx.address_find(id).await?;
        owned_by(found, establishment_id, |a| a.establishment_id, ADDRESS, id)?;
        tx.address_delete(id).await?;
        tx.commit().await?;
        info!("Deleted establishment address");
        Ok(())
    }
}
