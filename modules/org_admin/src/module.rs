use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use utoipa::OpenApi;

use auth::contract::CredentialStore;
use modkit::{DbModule, Module, ModuleCtx, RestfulModule};

use crate::api::rest::routes;
use crate::config::OrgAdminConfig;
use crate::contract::client::OrgAdminApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::credentials::EmployeeCredentialStore;
use crate::gateways::local::OrgAdminLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmUnitOfWork;

pub const MODULE_NAME: &str = "org_admin";

/// Establishments, employees and their satellite records.
///
/// Publishes [`OrgAdminApi`] and a [`CredentialStore`] to the client hub, so it
/// must be registered before `auth`.
#[derive(Default)]
pub struct OrgAdminModule {
    service: ArcSwapOption<Service>,
}

impl OrgAdminModule {
    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .context("org_admin module is not initialized")
    }
}

#[async_trait]
impl Module for OrgAdminModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing org_admin module");

        let cfg: OrgAdminConfig = ctx.module_config();
        debug!(
            "Loaded org_admin config: default_page_size={}, max_page_size={}, max_name_length={}",
            cfg.default_page_size, cfg.max_page_size, cfg.max_name_length
        );

        let db = ctx.db_required()?;
        let uow = SeaOrmUnitOfWork::new(db.sea());
        let service = Arc::new(Service::new(Arc::new(uow), ServiceConfig::from(&cfg)));

        let hub = ctx.client_hub();
        hub.register::<dyn OrgAdminApi>(Arc::new(OrgAdminLocalClient::new(service.clone())));
        hub.register::<dyn CredentialStore>(Arc::new(EmployeeCredentialStore::new(
            service.clone(),
        )));
        info!("OrgAdmin API and credential store exposed to ClientHub");

        self.service.store(Some(service));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[async_trait]
impl DbModule for OrgAdminModule {
    async fn migrate(&self, db: &modkit_db::DbHandle) -> anyhow::Result<()> {
        info!("Running org_admin database migrations");
        Migrator::up(db.seaorm(), None)
            .await
            .context("org_admin migrations failed")?;
        info!("org_admin database migrations completed");
        Ok(())
    }
}

impl RestfulModule for OrgAdminModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        Ok(routes::register_routes(router, self.service()?))
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(routes::OrgAdminApiDoc::openapi())
    }
}
