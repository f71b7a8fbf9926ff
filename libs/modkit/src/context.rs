use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::client_hub::ClientHub;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

#[derive(Clone)]
pub struct ModuleCtx {
    db: Option<Arc<modkit_db::DbHandle>>,
    config_provider: Option<Arc<dyn ConfigProvider>>,
    client_hub: Arc<ClientHub>,
    cancellation_token: CancellationToken,
    module_name: Option<Arc<str>>,
}

pub struct ModuleCtxBuilder {
    inner: ModuleCtx,
}

impl ModuleCtxBuilder {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            inner: ModuleCtx {
                db: None,
                config_provider: None,
                client_hub: Arc::new(ClientHub::default()),
                cancellation_token: token,
                module_name: None,
            },
        }
    }

    pub fn with_db(mut self, db: Arc<modkit_db::DbHandle>) -> Self {
        self.inner.db = Some(db);
        self
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.inner.config_provider = Some(p);
        self
    }

    pub fn with_client_hub(mut self, hub: Arc<ClientHub>) -> Self {
        self.inner.client_hub = hub;
        self
    }

    pub fn build(self) -> ModuleCtx {
        self.inner
    }
}

impl ModuleCtx {
    /// Scope the context to a module name (done by the registry per phase).
    pub fn for_module(mut self, name: &str) -> Self {
        self.module_name = Some(Arc::<str>::from(name));
        self
    }

    pub fn db(&self) -> Option<Arc<modkit_db::DbHandle>> {
        self.db.clone()
    }

    pub fn db_required(&self) -> anyhow::Result<Arc<modkit_db::DbHandle>> {
        self.db.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "module '{}' requires a database",
                self.current_module().unwrap_or("?")
            )
        })
    }

    pub fn client_hub(&self) -> Arc<ClientHub> {
        self.client_hub.clone()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn current_module(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// Best-effort: the module's section as `T`, or `T::default()` when the
    /// section is missing or does not deserialize.
    pub fn module_config<T: DeserializeOwned + Default>(&self) -> T {
        match self.raw_module_config() {
            Some(v) => match serde_json::from_value::<T>(v.clone()) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!(
                        module = self.current_module().unwrap_or("?"),
                        error = %e,
                        "invalid module config, using defaults"
                    );
                    T::default()
                }
            },
            None => T::default(),
        }
    }

    /// Strict: the module's section as `T`, erroring when missing or invalid.
    pub fn module_config_required<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        let name = self
            .current_module()
            .ok_or_else(|| anyhow::anyhow!("context is not scoped to a module"))?;
        let val = self
            .raw_module_config()
            .ok_or_else(|| anyhow::anyhow!("missing module config: {name}"))?;
        serde_json::from_value(val.clone())
            .map_err(|e| anyhow::anyhow!("invalid {name} config: {e}"))
    }

    fn raw_module_config(&self) -> Option<&serde_json::Value> {
        let name = self.module_name.as_deref()?;
        self.config_provider.as_ref()?.get_module_config(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    struct MapProvider(HashMap<String, serde_json::Value>);

    impl ConfigProvider for MapProvider {
        fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
            self.0.get(module_name)
        }
    }

    #[derive(Debug, Deserialize, Default, PartialEq)]
    struct DemoCfg {
        #[serde(default)]
        size: u32,
    }

    fn ctx_with(values: serde_json::Value) -> ModuleCtx {
        let mut map = HashMap::new();
        map.insert("demo".to_string(), values);
        ModuleCtxBuilder::new(CancellationToken::new())
            .with_config_provider(Arc::new(MapProvider(map)))
            .build()
    }

    #[test]
    fn module_config_reads_scoped_section() {
        let ctx = ctx_with(serde_json::json!({ "size": 7 })).for_module("demo");
        assert_eq!(ctx.module_config::<DemoCfg>(), DemoCfg { size: 7 });
        assert_eq!(
            ctx.module_config_required::<DemoCfg>().unwrap(),
            DemoCfg { size: 7 }
        );
    }

    #[test]
    fn module_config_falls_back_to_default() {
        let ctx = ctx_with(serde_json::json!({ "size": "big" })).for_module("demo");
        assert_eq!(ctx.module_config::<DemoCfg>(), DemoCfg::default());
        assert!(ctx.module_config_required::<DemoCfg>().is_err());

        let other = ctx_with(serde_json::json!({})).for_module("other");
        assert_eq!(other.module_config::<DemoCfg>(), DemoCfg::default());
        assert!(other.module_config_required::<DemoCfg>().is_err());
    }

    #[test]
    fn db_required_reports_module_name() {
        let ctx = ModuleCtxBuilder::new(CancellationToken::new())
            .build()
            .for_module("org_admin");
        let err = ctx.db_required().unwrap_err().to_string();
        assert!(err.contains("org_admin"));
    }
}
