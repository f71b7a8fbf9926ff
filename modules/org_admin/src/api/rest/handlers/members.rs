use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateMemberReq, MemberDto, UpdateMemberReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_members(
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<MemberDto>>, ProblemResponse> {
    info!(
        "Listing members of establishment {} with query: {:?}",
        establishment_id, params
    );

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_members(establishment_id, page).await {
        Ok(rows) => Ok(Json(rows.map(MemberDto::from))),
        Err(e) => {
            error!(
                "Failed to list members of establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_member(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<Json<MemberDto>, ProblemResponse> {
    info!("Getting member {} of establishment {}", id, establishment_id);

    match svc.get_member(establishment_id, id).await {
        Ok(row) => Ok(Json(MemberDto::from(row))),
        Err(e) => {
            error!("Failed to get member {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_member(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Json(req_body): Json<CreateMemberReq>,
) -> Result<(StatusCode, Json<MemberDto>), ProblemResponse> {
    info!(
        "Creating member for establishment {}: {:?}",
        establishment_id, req_body
    );

    match svc.create_member(establishment_id, req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(MemberDto::from(row)))),
        Err(e) => {
            error!(
                "Failed to create member for establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_member(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    Json(req_body): Json<UpdateMemberReq>,
) -> Result<Json<MemberDto>, ProblemResponse> {
    info!("Updating member {} with: {:?}", id, req_body);

    match svc
        .update_member(establishment_id, id, req_body.into())
        .await
    {
        Ok(row) => Ok(Json(MemberDto::from(row))),
        Err(e) => {
            error!("Failed to update member {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_member(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting member {} of establishment {}", id, establishment_id);

    match svc.delete_member(establishment_id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete member {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
