use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateRoleReq, RoleDto, UpdateRoleReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_roles(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<RoleDto>>, ProblemResponse> {
    info!("Listing employee roles with query: {:?}", params);

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_roles(page).await {
        Ok(rows) => Ok(Json(rows.map(RoleDto::from))),
        Err(e) => {
            error!("Failed to list employee roles: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_role(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<RoleDto>, ProblemResponse> {
    info!("Getting employee role with id: {}", id);

    match svc.get_role(id).await {
        Ok(row) => Ok(Json(RoleDto::from(row))),
        Err(e) => {
            error!("Failed to get employee role {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_role(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req_body): Json<CreateRoleReq>,
) -> Result<(StatusCode, Json<RoleDto>), ProblemResponse> {
    info!("Creating employee role: {:?}", req_body);

    match svc.create_role(req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(RoleDto::from(row)))),
        Err(e) => {
            error!("Failed to create employee role: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_role(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req_body): Json<UpdateRoleReq>,
) -> Result<Json<RoleDto>, ProblemResponse> {
    info!("Updating employee role {} with: {:?}", id, req_body);

    match svc.update_role(id, req_body.into()).await {
        Ok(row) => Ok(Json(RoleDto::from(row))),
        Err(e) => {
            error!("Failed to update employee role {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_role(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting employee role: {}", id);

    match svc.delete_role(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete employee role {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
