use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreatePlatformReq, PlatformDto, UpdatePlatformReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_platforms(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<PlatformDto>>, ProblemResponse> {
    info!("Listing platforms with query: {:?}", params);

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_platforms(page).await {
        Ok(rows) => Ok(Json(rows.map(PlatformDto::from))),
        Err(e) => {
            error!("Failed to list platforms: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_platform(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<PlatformDto>, ProblemResponse> {
    info!("Getting platform with id: {}", id);

    match svc.get_platform(id).await {
        Ok(row) => Ok(Json(PlatformDto::from(row))),
        Err(e) => {
            error!("Failed to get platform {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_platform(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req_body): Json<CreatePlatformReq>,
) -> Result<(StatusCode, Json<PlatformDto>), ProblemResponse> {
    info!("Creating platform: {:?}", req_body);

    match svc.create_platform(req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(PlatformDto::from(row)))),
        Err(e) => {
            error!("Failed to create platform: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_platform(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req_body): Json<UpdatePlatformReq>,
) -> Result<Json<PlatformDto>, ProblemResponse> {
    info!("Updating platform {} with: {:?}", id, req_body);

    match svc.update_platform(id, req_body.into()).await {
        Ok(row) => Ok(Json(PlatformDto::from(row))),
        Err(e) => {
            error!("Failed to update platform {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_platform(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting platform: {}", id);

    match svc.delete_platform(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete platform {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
