use axum::{http::Uri, response::Json, Extension};
use std::sync::Arc;
use tracing::info;

use crate::api::rest::dto::{LoginReq, MeDto, TokenDto};
use crate::api::rest::error::map_auth_error;
use crate::contract::AuthenticatedUser;
use crate::domain::service::AuthService;
use modkit::ProblemResponse;

pub async fn login(
    Extension(svc): Extension<Arc<AuthService>>,
    uri: Uri,
    Json(req): Json<LoginReq>,
) -> Result<Json<TokenDto>, ProblemResponse> {
    info!(email = %req.email, "login attempt");
    svc.login(&req.email, &req.password)
        .await
        .map(|t| Json(TokenDto::from(t)))
        .map_err(|e| map_auth_error(&e, uri.path()))
}

pub async fn me(user: AuthenticatedUser) -> Json<MeDto> {
    Json(MeDto {
        user_id: user.user_id.to_string(),
        email: user.email,
        claims: user.claims,
    })
}
