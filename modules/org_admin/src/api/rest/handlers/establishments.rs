use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateEstablishmentReq, EstablishmentDto, UpdateEstablishmentReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_establishments(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<EstablishmentDto>>, ProblemResponse> {
    info!("Listing establishments with query: {:?}", params);

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_establishments(page).await {
        Ok(rows) => Ok(Json(rows.map(EstablishmentDto::from))),
        Err(e) => {
            error!("Failed to list establishments: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_establishment(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<EstablishmentDto>, ProblemResponse> {
    info!("Getting establishment with id: {}", id);

    match svc.get_establishment(id).await {
        Ok(row) => Ok(Json(EstablishmentDto::from(row))),
        Err(e) => {
            error!("Failed to get establishment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_establishment(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req_body): Json<CreateEstablishmentReq>,
) -> Result<(StatusCode, Json<EstablishmentDto>), ProblemResponse> {
    info!("Creating establishment: {:?}", req_body);

    match svc.create_establishment(req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(EstablishmentDto::from(row)))),
        Err(e) => {
            error!("Failed to create establishment: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_establishment(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req_body): Json<UpdateEstablishmentReq>,
) -> Result<Json<EstablishmentDto>, ProblemResponse> {
    info!("Updating establishment {} with: {:?}", id, req_body);

    match svc.update_establishment(id, req_body.into()).await {
        Ok(row) => Ok(Json(EstablishmentDto::from(row))),
        Err(e) => {
            error!("Failed to update establishment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_establishment(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting establishment: {}", id);

    match svc.delete_establishment(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete establishment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
