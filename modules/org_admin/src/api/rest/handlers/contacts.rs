use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{ContactDto, CreateContactReq, UpdateContactReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_contacts(
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<ContactDto>>, ProblemResponse> {
    info!(
        "Listing contacts of establishment {} with query: {:?}",
        establishment_id, params
    );

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_contacts(establishment_id, page).await {
        Ok(rows) => Ok(Json(rows.map(ContactDto::from))),
        Err(e) => {
            error!(
                "Failed to list contacts of establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_contact(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<Json<ContactDto>, ProblemResponse> {
    info!("Getting contact {} of establishment {}", id, establishment_id);

    match svc.get_contact(establishment_id, id).await {
        Ok(row) => Ok(Json(ContactDto::from(row))),
        Err(e) => {
            error!("Failed to get contact {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_contact(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(establishment_id): Path<Uuid>,
    Json(req_body): Json<CreateContactReq>,
) -> Result<(StatusCode, Json<ContactDto>), ProblemResponse> {
    info!(
        "Creating contact for establishment {}: {:?}",
        establishment_id, req_body
    );

    match svc.create_contact(establishment_id, req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(ContactDto::from(row)))),
        Err(e) => {
            error!(
                "Failed to create contact for establishment {}: {}",
                establishment_id, e
            );
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_contact(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    Json(req_body): Json<UpdateContactReq>,
) -> Result<Json<ContactDto>, ProblemResponse> {
    info!("Updating contact {} with: {:?}", id, req_body);

    match svc
        .update_contact(establishment_id, id, req_body.into())
        .await
    {
        Ok(row) => Ok(Json(ContactDto::from(row))),
        Err(e) => {
            error!("Failed to update contact {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_contact(
    Extension(svc): Extension<Arc<Service>>,
    Path((establishment_id, id)): Path<(Uuid, Uuid)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting contact {} of establishment {}", id, establishment_id);

    match svc.delete_contact(establishment_id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete contact {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
