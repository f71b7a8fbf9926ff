use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{AddressDto, CreateAddressReq, UpdateAddressReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_addresses(
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<AddressDto>>, ProblemResponse> {
    info!(
        "Listing addresses of establishment {} with query: {:?}",
        establishment_id, params
    );

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_addresses(establishment_id, page).await {
        Ok(rows) => Ok(Json(rows.map(AddressDto::from))),
        Err(e) => {
            error!(
                "Failed to list addresses of establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_address(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<Json<AddressDto>, ProblemResponse> {
    info!("Getting address {} of establishment {}", id, establishment_id);

    match svc.get_address(establishment_id, id).await {
        Ok(row) => Ok(Json(AddressDto::from(row))),
        Err(e) => {
            error!("Failed to get address {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_address(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Json(req_body): Json<CreateAddressReq>,
) -> Result<(StatusCode, Json<AddressDto>), ProblemResponse> {
    info!(
        "Creating address for establishment {}: {:?}",
        establishment_id, req_body
    );

    match svc.create_address(establishment_id, req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(AddressDto::from(row)))),
        Err(e) => {
            error!(
                "Failed to create address for establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_address(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    Json(req_body): Json<UpdateAddressReq>,
) -> Result<Json<AddressDto>, ProblemResponse> {
    info!("Updating address {} with: {:?}", id, req_body);

    match svc
        .update_address(establishment_id, id, req_body.into())
        .await
    {
        Ok(row) => Ok(Json(AddressDto::from(row))),
        Err(e) => {
            error!("Failed to update address {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_address(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting address {} of establishment {}", id, establishment_id);

    match svc.delete_address(establishment_id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete address {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
