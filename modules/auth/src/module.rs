use anyhow::Context;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use utoipa::OpenApi;

use crate::api::rest::routes;
use crate::config::AuthConfig;
use crate::contract::{CredentialStore, TokenVerifier};
use crate::domain::jwt::JwtService;
use crate::domain::service::AuthService;
use modkit::{Module, ModuleCtx, RestfulModule, StatefulModule};

pub const MODULE_NAME: &str = "auth";

/// Issues tokens on login and publishes a [`TokenVerifier`] for the REST host.
/// Needs a [`CredentialStore`] in the client hub before its own init runs.
#[derive(Default)]
pub struct AuthModule {
    service: ArcSwapOption<AuthService>,
    config: ArcSwapOption<AuthConfig>,
}

impl AuthModule {
    fn service(&self) -> anyhow::Result<Arc<AuthService>> {
        self.service
            .load_full()
            .context("auth module is not initialized")
    }
}

#[async_trait]
impl Module for AuthModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg: AuthConfig = ctx.module_config_required()?;
        tracing::debug!(config = ?cfg, "auth configured");

        let jwt = Arc::new(JwtService::new(&cfg).context("invalid auth config")?);
        let store = ctx
            .client_hub()
            .get::<dyn CredentialStore>()
            .context("auth requires a CredentialStore provider")?;

        ctx.client_hub().register::<dyn TokenVerifier>(jwt.clone());
        self.service
            .store(Some(Arc::new(AuthService::new(store, jwt))));
        self.config.store(Some(Arc::new(cfg)));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl RestfulModule for AuthModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        Ok(routes::register_routes(router))
    }

    fn register_public_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        Ok(routes::register_public_routes(router, self.service()?))
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(routes::AuthApiDoc::openapi())
    }
}

#[async_trait]
impl StatefulModule for AuthModule {
    /// Runs after migrations, so the bootstrap account can be written.
    async fn start(&self, _cancel: CancellationToken) -> anyhow::Result<()> {
        let Some(cfg) = self.config.load_full() else {
            return Ok(());
        };
        if let Some(admin) = cfg.bootstrap_admin.as_ref() {
            self.service()?
                .bootstrap_admin(admin)
                .await
                .context("bootstrap administrator")?;
        }
        Ok(())
    }

    async fn stop(&self, _cancel: CancellationToken) -> anyhow::Result<()> {
        Ok(())
    }
}
