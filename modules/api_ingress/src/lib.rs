//! HTTP host: owns the listener, the middleware stack and the OpenAPI document.

use async_trait::async_trait;
use std::sync::Arc;

use arc_swap::ArcSwap;

use anyhow::{Context, Result};
use axum::{middleware::from_fn, middleware::from_fn_with_state, routing::get, Router};
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use auth::contract::TokenVerifier;

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub const MODULE_NAME: &str = "api_ingress";

/// Router host. Collects module routes during the REST phase and serves them
/// from the start phase until cancelled.
pub struct ApiIngress {
    config: ArcSwap<ApiIngressConfig>,
    final_router: Mutex<Option<Router>>,
    server: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            final_router: Mutex::new(None),
            server: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> ApiIngressConfig {
        (**self.config.load()).clone()
    }

    /// Assemble the served router.
    ///
    /// `protected` routes are wrapped in bearer authentication; `public` and
    /// the built-in probes are not. The whole tree then gets, outermost first:
    /// set/propagate `x-request-id`, trace, timeout, CORS, body limit.
    pub fn build_router(
        &self,
        public: Router,
        protected: Router,
        verifier: Arc<dyn TokenVerifier>,
        openapi: Option<utoipa::openapi::OpenApi>,
    ) -> Result<Router> {
        let cfg = self.get_config();

        let protected = protected.layer(from_fn_with_state(
            verifier,
            auth::middleware::require_bearer,
        ));

        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .route("/healthz", get(web::healthz))
            .merge(public)
            .merge(protected);

        if let (true, Some(doc)) = (cfg.enable_docs, openapi) {
            let value = serde_json::to_value(&doc).context("serialize OpenAPI document")?;
            router = router.route("/openapi.json", get(web::openapi_json(Arc::new(value))));
        }

        // Each `.layer` wraps everything added before it, so this reads innermost first.
        router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));
        if cfg.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router.layer(TimeoutLayer::new(Duration::from_secs(cfg.timeout_sec)));

        let x_request_id = request_id::header();
        router = router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Bind and spawn the server task. Returns once the socket is bound.
    async fn serve(&self, cancel: CancellationToken) -> Result<()> {
        let cfg = self.get_config();
        let addr: SocketAddr = cfg
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", cfg.bind_addr))?;

        let router = self
            .final_router
            .lock()
            .take()
            .context("REST phase did not produce a router")?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!(%addr, "HTTP server bound");

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully");
        };
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                tracing::error!(error = %e, "HTTP server error");
            }
        });
        *self.server.lock() = Some(handle);
        Ok(())
    }
}

#[async_trait]
impl modkit::Module for ApiIngress {
    async fn init(&self, ctx: &modkit::ModuleCtx) -> anyhow::Result<()> {
        let cfg = ctx.module_config::<ApiIngressConfig>();
        tracing::debug!(bind_addr = %cfg.bind_addr, "api_ingress configured");
        self.config.store(Arc::new(cfg));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl modkit::RestHostModule for ApiIngress {
    fn rest_finalize(
        &self,
        ctx: &modkit::ModuleCtx,
        public: Router,
        protected: Router,
        mut openapi: utoipa::openapi::OpenApi,
    ) -> anyhow::Result<Router> {
        let verifier = ctx
            .client_hub()
            .get::<dyn TokenVerifier>()
            .context("api_ingress requires the auth module (TokenVerifier)")?;

        openapi.info = utoipa::openapi::InfoBuilder::new()
            .title("OrgAdmin API")
            .version(env!("CARGO_PKG_VERSION"))
            .build();

        let router = self.build_router(public, protected, verifier, Some(openapi))?;
        *self.final_router.lock() = Some(router.clone());
        tracing::debug!("REST host finalized router");
        Ok(router)
    }
}

#[async_trait]
impl modkit::StatefulModule for ApiIngress {
    async fn start(&self, cancel: CancellationToken) -> anyhow::Result<()> {
        self.serve(cancel).await
    }

    async fn stop(&self, cancel: CancellationToken) -> anyhow::Result<()> {
        cancel.cancel();
        let handle = self.server.lock().take();
        if let Some(h) = handle {
            h.await.context("HTTP server task panicked")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::contract::{AuthenticatedUser, Claims};
    use auth::error::AuthError;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    struct AcceptOne;

    impl TokenVerifier for AcceptOne {
        fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            if token != "good" {
                return Err(AuthError::InvalidToken("bad signature".into()));
            }
            let claims = Claims {
                sub: uuid::Uuid::nil().to_string(),
                email: "a@b.io".into(),
                iat: 0,
                exp: i64::MAX,
                iss: "orgadmin".into(),
                aud: "orgadmin-api".into(),
                jti: "t".into(),
            };
            Ok(AuthenticatedUser {
                user_id: uuid::Uuid::nil(),
                email: claims.email.clone(),
                claims,
            })
        }
    }

    fn app(cfg: ApiIngressConfig) -> Router {
        let host = ApiIngress::new(cfg);
        let public = Router::new().route("/open", get(|| async { "open" }));
        let protected = Router::new().route("/closed", get(|| async { "closed" }));
        let doc = utoipa::openapi::OpenApiBuilder::new().build();
        host.build_router(public, protected, Arc::new(AcceptOne), Some(doc))
            .unwrap()
    }

    async fn status_of(router: Router, req: Request<Body>) -> StatusCode {
        router.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn probes_and_public_routes_need_no_token() {
        let r = app(ApiIngressConfig::default());
        for path in ["/health", "/healthz", "/open", "/openapi.json"] {
            let req = Request::get(path).body(Body::empty()).unwrap();
            assert_eq!(status_of(r.clone(), req).await, StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn protected_routes_require_bearer() {
        let r = app(ApiIngressConfig::default());

        let missing = Request::get("/closed").body(Body::empty()).unwrap();
        assert_eq!(status_of(r.clone(), missing).await, StatusCode::UNAUTHORIZED);

        let bad = Request::get("/closed")
            .header("authorization", "Bearer nope")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(r.clone(), bad).await, StatusCode::UNAUTHORIZED);

        let ok = Request::get("/closed")
            .header("authorization", "Bearer good")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(r, ok).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn docs_can_be_disabled() {
        let r = app(ApiIngressConfig {
            enable_docs: false,
            ..Default::default()
        });
        let req = Request::get("/openapi.json").body(Body::empty()).unwrap();
        assert_eq!(status_of(r, req).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let r = app(ApiIngressConfig::default());
        let resp = r
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let rid = resp.headers().get("x-request-id").unwrap();
        assert!(!rid.is_empty());
    }
}
