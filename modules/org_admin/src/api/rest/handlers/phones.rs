use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreatePhoneReq, PhoneDto, UpdatePhoneReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_phones(
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<PhoneDto>>, ProblemResponse> {
    info!(
        "Listing phones of establishment {} with query: {:?}",
        establishment_id, params
    );

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_phones(establishment_id, page).await {
        Ok(rows) => Ok(Json(rows.map(PhoneDto::from))),
        Err(e) => {
            error!(
                "Failed to list phones of establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_phone(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<Json<PhoneDto>, ProblemResponse> {
    info!("Getting phone {} of establishment {}", id, establishment_id);

    match svc.get_phone(establishment_id, id).await {
        Ok(row) => Ok(Json(PhoneDto::from(row))),
        Err(e) => {
            error!("Failed to get phone {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_phone(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Json(req_body): Json<CreatePhoneReq>,
) -> Result<(StatusCode, Json<PhoneDto>), ProblemResponse> {
    info!(
        "Creating phone for establishment {}: {:?}",
        establishment_id, req_body
    );

    match svc.create_phone(establishment_id, req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(PhoneDto::from(row)))),
        Err(e) => {
            error!(
                "Failed to create phone for establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_phone(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    Json(req_body): Json<UpdatePhoneReq>,
) -> Result<Json<PhoneDto>, ProblemResponse> {
    info!("Updating phone {} with: {:?}", id, req_body);

    match svc
        .update_phone(establishment_id, id, req_body.into())
        .await
    {
        Ok(row) => Ok(Json(PhoneDto::from(row))),
        Err(e) => {
            error!("Failed to update phone {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_phone(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting phone {} of establishment {}", id, establishment_id);

    match svc.delete_phone(establishment_id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete phone {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
