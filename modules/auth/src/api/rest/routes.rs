use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::AuthService;

pub fn register_public_routes(router: Router, service: Arc<AuthService>) -> Router {
    let auth = Router::new()
        .route("/auth/login", post(handlers::login))
        .layer(Extension(service));
    router.merge(auth)
}

pub fn register_routes(router: Router) -> Router {
    router.route("/auth/me", get(handlers::me))
}

#[derive(OpenApi)]
#[openapi(components(schemas(dto::LoginReq, dto::TokenDto, dto::MeDto, crate::contract::Claims)))]
pub struct AuthApiDoc;
