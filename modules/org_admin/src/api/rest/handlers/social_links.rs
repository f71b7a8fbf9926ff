use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateSocialLinkReq, SocialLinkDto, UpdateSocialLinkReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_social_links(
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<SocialLinkDto>>, ProblemResponse> {
    info!(
        "Listing social media links of establishment {} with query: {:?}",
        establishment_id, params
    );

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_social_links(establishment_id, page).await {
        Ok(rows) => Ok(Json(rows.map(SocialLinkDto::from))),
        Err(e) => {
            error!(
                "Failed to list social media links of establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_social_link(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<Json<SocialLinkDto>, ProblemResponse> {
    info!("Getting social media link {} of establishment {}", id, establishment_id);

    match svc.get_social_link(establishment_id, id).await {
        Ok(row) => Ok(Json(SocialLinkDto::from(row))),
        Err(e) => {
            error!("Failed to get social media link {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_social_link(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Json(req_body): Json<CreateSocialLinkReq>,
) -> Result<(StatusCode, Json<SocialLinkDto>), ProblemResponse> {
    info!(
        "Creating social media link for establishment {}: {:?}",
        establishment_id, req_body
    );

    match svc.create_social_link(establishment_id, req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(SocialLinkDto::from(row)))),
        Err(e) => {
            error!(
                "Failed to create social media link for establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_social_link(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    Json(req_body): Json<UpdateSocialLinkReq>,
) -> Result<Json<SocialLinkDto>, ProblemResponse> {
    info!("Updating social media link {} with: {:?}", id, req_body);

    match svc
        .update_social_link(establishment_id, id, req_body.into())
        .await
    {
        Ok(row) => Ok(Json(SocialLinkDto::from(row))),
        Err(e) => {
            error!("Failed to update social media link {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_social_link(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting social media link {} of establishment {}", id, establishment_id);

    match svc.delete_social_link(establishment_id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete social media link {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
