use async_trait::async_trait;
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::context::ModuleCtx;

/// Core module: DI/wiring; do not rely on migrated schema here.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()>;
    fn as_any(&self) -> &dyn std::any::Any;
}

#[async_trait]
pub trait DbModule: Send + Sync {
    /// Runs AFTER init, BEFORE REST/start.
    async fn migrate(&self, db: &modkit_db::DbHandle) -> anyhow::Result<()>;
}

/// Pure wiring; must be sync. Runs AFTER DB migrations.
pub trait RestfulModule: Send + Sync {
    /// Routes that require an authenticated caller.
    fn register_rest(&self, ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router>;

    /// Routes reachable without credentials (login, probes).
    fn register_public_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        Ok(router)
    }

    /// OpenAPI fragment describing the module's schemas; merged by the host.
    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        None
    }
}

/// REST host: receives the collected routers and produces the served one.
/// Must not start the server here.
pub trait RestHostModule: Send + Sync + 'static {
    fn rest_finalize(
        &self,
        ctx: &ModuleCtx,
        public: Router,
        protected: Router,
        openapi: utoipa::openapi::OpenApi,
    ) -> anyhow::Result<Router>;
}

#[async_trait]
pub trait StatefulModule: Send + Sync {
    /// Returns once the module is running; background work observes `cancel`.
    async fn start(&self, cancel: CancellationToken) -> anyhow::Result<()>;
    /// Wait for background work to wind down after `cancel` fired.
    async fn stop(&self, cancel: CancellationToken) -> anyhow::Result<()>;
}
