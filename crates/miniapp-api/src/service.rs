//! Mini app API service: router assembly and the HTTP server.

use crate::adapters::LoggingMessageSender;
use crate::domain::config::ApiConfig;
use crate::domain::error::GatewayError;
use crate::handlers;
use crate::middleware::{
    create_cors_layer, create_panic_layer, GatewayMetrics, TimeoutLayer, TracingLayer,
};
use crate::ports::MessageSender;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use miniapp_auth::{InitDataVerifier, InitDataVerifierApi};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub verifier: Arc<dyn InitDataVerifierApi>,
    pub sender: Arc<dyn MessageSender>,
    pub metrics: Arc<GatewayMetrics>,
}

/// Mini app API service
pub struct MiniAppService {
    config: Arc<ApiConfig>,
    verifier: Arc<dyn InitDataVerifierApi>,
    sender: Arc<dyn MessageSender>,
    metrics: Arc<GatewayMetrics>,
}

impl MiniAppService {
    /// Create the service with the default verifier and logging sender
    pub fn new(config: ApiConfig) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let verifier = InitDataVerifier::new(config.bot_token.clone())
            .with_max_age(config.init_data_max_age);

        Ok(Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            sender: Arc::new(LoggingMessageSender),
            metrics: Arc::new(GatewayMetrics::new()),
        })
    }

    /// Replace the outbound message sender
    pub fn with_sender(mut self, sender: Arc<dyn MessageSender>) -> Self {
        self.sender = sender;
        self
    }

    /// Replace the init-data verifier
    pub fn with_verifier(mut self, verifier: Arc<dyn InitDataVerifierApi>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the HTTP router with the full middleware stack
    pub fn router(&self) -> Router {
        let state = AppState {
            config: Arc::clone(&self.config),
            verifier: Arc::clone(&self.verifier),
            sender: Arc::clone(&self.sender),
            metrics: Arc::clone(&self.metrics),
        };

        let mut router = Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/api/init", post(handlers::init_app))
            .route("/api/send-message", post(handlers::send_message))
            .route("/api/user-data", get(handlers::user_data))
            .route("/api/info", get(handlers::info));

        if self.config.features.metrics_enabled {
            router = router.route("/metrics", get(handlers::metrics));
        }

        if let Some(dir) = &self.config.features.static_dir {
            if !dir.is_dir() {
                warn!(path = %dir.display(), "Static directory does not exist");
            }
            router = router.nest_service("/static", ServeDir::new(dir));
        }

        router
            .layer(create_panic_layer())
            .layer(DefaultBodyLimit::max(self.config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(self.config.http.request_timeout))
            .layer(TracingLayer::new(Arc::clone(&self.metrics)))
            .layer(create_cors_layer(&self.config.cors))
            .with_state(state)
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        info!(
            addr = %addr,
            verifier_configured = self.verifier.is_configured(),
            webapp_url = %self.config.webapp_url,
            "Starting HTTP server"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
