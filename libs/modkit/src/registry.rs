use axum::Router;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::context::ModuleCtx;
use crate::contracts;

/// One module and the capabilities it provides.
pub struct ModuleEntry {
    pub name: &'static str,
    pub core: Arc<dyn contracts::Module>,
    pub db: Option<Arc<dyn contracts::DbModule>>,
    pub rest: Option<Arc<dyn contracts::RestfulModule>>,
    pub rest_host: Option<Arc<dyn contracts::RestHostModule>>,
    pub stateful: Option<Arc<dyn contracts::StatefulModule>>,
}

impl ModuleEntry {
    pub fn new(name: &'static str, core: Arc<dyn contracts::Module>) -> Self {
        Self {
            name,
            core,
            db: None,
            rest: None,
            rest_host: None,
            stateful: None,
        }
    }

    pub fn with_db(mut self, m: Arc<dyn contracts::DbModule>) -> Self {
        self.db = Some(m);
        self
    }

    pub fn with_rest(mut self, m: Arc<dyn contracts::RestfulModule>) -> Self {
        self.rest = Some(m);
        self
    }

    pub fn with_rest_host(mut self, m: Arc<dyn contracts::RestHostModule>) -> Self {
        self.rest_host = Some(m);
        self
    }

    pub fn with_stateful(mut self, m: Arc<dyn contracts::StatefulModule>) -> Self {
        self.stateful = Some(m);
        self
    }
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("name", &self.name)
            .field("has_db", &self.db.is_some())
            .field("has_rest", &self.rest.is_some())
            .field("is_rest_host", &self.rest_host.is_some())
            .field("has_stateful", &self.stateful.is_some())
            .finish()
    }
}

/// Modules in registration order. Providers must be registered before their
/// consumers: init runs in order, so a client published to the hub by one
/// module is visible to every module after it.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
}

impl ModuleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    // ---- Ordered phases: init → DB → REST → start → stop ----

    pub async fn run_init_phase(&self, base_ctx: &ModuleCtx) -> Result<(), RegistryError> {
        for e in &self.modules {
            let ctx = base_ctx.clone().for_module(e.name);
            tracing::debug!(module = e.name, "init");
            e.core
                .init(&ctx)
                .await
                .map_err(|source| RegistryError::Init {
                    module: e.name,
                    source,
                })?;
        }
        Ok(())
    }

    pub async fn run_db_phase(&self, db: &modkit_db::DbHandle) -> Result<(), RegistryError> {
        for e in &self.modules {
            if let Some(dbm) = &e.db {
                tracing::debug!(module = e.name, "migrate");
                dbm.migrate(db)
                    .await
                    .map_err(|source| RegistryError::DbMigrate {
                        module: e.name,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Collect public and protected routes plus OpenAPI fragments from every
    /// REST module, then let the single host assemble the final router.
    pub fn run_rest_phase(&self, base_ctx: &ModuleCtx) -> Result<Router, RegistryError> {
        let mut hosts = self.modules.iter().filter(|e| e.rest_host.is_some());
        let host_entry = match (hosts.next(), hosts.next()) {
            (Some(h), None) => h,
            (None, _) => {
                return if self.modules.iter().any(|e| e.rest.is_some()) {
                    Err(RegistryError::RestRequiresHost)
                } else {
                    Ok(Router::new())
                };
            }
            (Some(_), Some(_)) => return Err(RegistryError::MultipleRestHosts),
        };
        let Some(host) = host_entry.rest_host.as_ref() else {
            return Err(RegistryError::RestRequiresHost);
        };

        let mut public = Router::new();
        let mut protected = Router::new();
        let mut openapi = utoipa::openapi::OpenApiBuilder::new().build();

        for e in &self.modules {
            let Some(rest) = &e.rest else { continue };
            let ctx = base_ctx.clone().for_module(e.name);
            let wrap = |source| RegistryError::RestRegister {
                module: e.name,
                source,
            };
            public = rest.register_public_rest(&ctx, public).map_err(wrap)?;
            protected = rest.register_rest(&ctx, protected).map_err(wrap)?;
            if let Some(doc) = rest.openapi() {
                openapi.merge(doc);
            }
        }

        let host_ctx = base_ctx.clone().for_module(host_entry.name);
        host.rest_finalize(&host_ctx, public, protected, openapi)
            .map_err(|source| RegistryError::RestFinalize {
                module: host_entry.name,
                source,
            })
    }

    pub async fn run_start_phase(&self, cancel: CancellationToken) -> Result<(), RegistryError> {
        for e in &self.modules {
            if let Some(s) = &e.stateful {
                s.start(cancel.clone())
                    .await
                    .map_err(|source| RegistryError::Start {
                        module: e.name,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    pub async fn run_stop_phase(&self, cancel: CancellationToken) {
        for e in self.modules.iter().rev() {
            if let Some(s) = &e.stateful {
                if let Err(err) = s.stop(cancel.clone()).await {
                    tracing::warn!(module = e.name, error = %err, "Failed to stop module");
                }
            }
        }
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<ModuleEntry>,
}

impl RegistryBuilder {
    pub fn register(mut self, entry: ModuleEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> Result<ModuleRegistry, RegistryError> {
        let mut seen = HashSet::new();
        for e in &self.entries {
            if !seen.insert(e.name) {
                return Err(RegistryError::DuplicateModule(e.name));
            }
        }
        Ok(ModuleRegistry {
            modules: self.entries,
        })
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("module '{0}' registered twice")]
    DuplicateModule(&'static str),

    #[error("init failed for module '{module}'")]
    Init {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("db migration failed for module '{module}'")]
    DbMigrate {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("REST registration failed for module '{module}'")]
    RestRegister {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("REST finalize failed for host module '{module}'")]
    RestFinalize {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("REST modules are registered but no REST host is present")]
    RestRequiresHost,

    #[error("more than one REST host registered")]
    MultipleRestHosts,

    #[error("start failed for module '{module}'")]
    Start {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ModuleCtxBuilder;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, routing::get};
    use parking_lot::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    struct Probe {
        name: &'static str,
        log: Arc<Recorder>,
    }

    #[async_trait]
    impl contracts::Module for Probe {
        async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
            assert_eq!(ctx.current_module(), Some(self.name));
            self.log.0.lock().push(format!("init:{}", self.name));
            Ok(())
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    impl contracts::RestfulModule for Probe {
        fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
            Ok(router.route("/private", get(|| async { "private" })))
        }

        fn register_public_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
            Ok(router.route("/public", get(|| async { "public" })))
        }
    }

    struct Host;

    #[async_trait]
    impl contracts::Module for Host {
        async fn init(&self, _ctx: &ModuleCtx) -> anyhow::Result<()> {
            Ok(())
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    impl contracts::RestHostModule for Host {
        fn rest_finalize(
            &self,
            _ctx: &ModuleCtx,
            public: Router,
            protected: Router,
            _openapi: utoipa::openapi::OpenApi,
        ) -> anyhow::Result<Router> {
            Ok(public.merge(protected))
        }
    }

    fn base_ctx() -> ModuleCtx {
        ModuleCtxBuilder::new(CancellationToken::new()).build()
    }

    #[tokio::test]
    async fn init_runs_in_registration_order() {
        let log = Arc::new(Recorder::default());
        let reg = ModuleRegistry::builder()
            .register(ModuleEntry::new(
                "first",
                Arc::new(Probe {
                    name: "first",
                    log: log.clone(),
                }),
            ))
            .register(ModuleEntry::new(
                "second",
                Arc::new(Probe {
                    name: "second",
                    log: log.clone(),
                }),
            ))
            .build()
            .unwrap();

        reg.run_init_phase(&base_ctx()).await.unwrap();
        assert_eq!(*log.0.lock(), vec!["init:first", "init:second"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ModuleRegistry::builder()
            .register(ModuleEntry::new("host", Arc::new(Host)))
            .register(ModuleEntry::new("host", Arc::new(Host)))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateModule("host")));
    }

    #[test]
    fn rest_without_host_is_an_error() {
        let probe = Arc::new(Probe {
            name: "p",
            log: Arc::default(),
        });
        let reg = ModuleRegistry::builder()
            .register(ModuleEntry::new("p", probe.clone()).with_rest(probe))
            .build()
            .unwrap();
        assert!(matches!(
            reg.run_rest_phase(&base_ctx()),
            Err(RegistryError::RestRequiresHost)
        ));
    }

    #[tokio::test]
    async fn rest_phase_collects_public_and_protected_routes() {
        let probe = Arc::new(Probe {
            name: "p",
            log: Arc::default(),
        });
        let host = Arc::new(Host);
        let reg = ModuleRegistry::builder()
            .register(ModuleEntry::new("p", probe.clone()).with_rest(probe))
            .register(ModuleEntry::new("host", host.clone()).with_rest_host(host))
            .build()
            .unwrap();

        let router = reg.run_rest_phase(&base_ctx()).unwrap();
        for path in ["/public", "/private"] {
            let resp = router
                .clone()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), 200, "{path}");
        }
    }
}
