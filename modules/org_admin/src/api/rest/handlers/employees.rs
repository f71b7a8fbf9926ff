use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateEmployeeReq, EmployeeDto, SetPasswordReq, UpdateEmployeeReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;
use modkit::{Page, PageParams, ProblemResponse};

pub async fn list_employees(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<EmployeeDto>>, ProblemResponse> {
    info!("Listing employees with query: {:?}", params);

    let page = svc
        .resolve_page(&params)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.list_employees(page).await {
        Ok(rows) => Ok(Json(rows.map(EmployeeDto::from))),
        Err(e) => {
            error!("Failed to list employees: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_employee(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<EmployeeDto>, ProblemResponse> {
    info!("Getting employee with id: {}", id);

    match svc.get_employee(id).await {
        Ok(row) => Ok(Json(EmployeeDto::from(row))),
        Err(e) => {
            error!("Failed to get employee {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_employee(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req_body): Json<CreateEmployeeReq>,
) -> Result<(StatusCode, Json<EmployeeDto>), ProblemResponse> {
    info!("Creating employee: {:?}", req_body);

    match svc.create_employee(req_body.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, Json(EmployeeDto::from(row)))),
        Err(e) => {
            error!("Failed to create employee: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_employee(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req_body): Json<UpdateEmployeeReq>,
) -> Result<Json<EmployeeDto>, ProblemResponse> {
    info!("Updating employee {} with: {:?}", id, req_body);

    match svc.update_employee(id, req_body.into()).await {
        Ok(row) => Ok(Json(EmployeeDto::from(row))),
        Err(e) => {
            error!("Failed to update employee {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_employee(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting employee: {}", id);

    match svc.delete_employee(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete employee {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Stores a new password hash for the employee; the body is never logged.
pub async fn set_employee_password(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req_body): Json<SetPasswordReq>,
) -> Result<StatusCode, ProblemResponse> {
    info!("Setting password for employee {}", id);

    match svc.set_employee_password(id, &req_body.password).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to set password for employee {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
