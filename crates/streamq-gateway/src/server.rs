//! HTTP server implementation

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use streamq_sdk::StreamTokenQuery;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::error::GatewayResult;
use crate::handler::{self, QueryRequest, QueryResponse};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,
    /// Maximum request body size (default: 64KB)
    pub max_body_size: usize,
    /// Enable CORS (default: true)
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_body_size: 64 * 1024,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Create a new server config with the given address
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            ..Default::default()
        }
    }
}

/// Gateway HTTP server
pub struct GatewayServer {
    config: ServerConfig,
    query: Arc<StreamTokenQuery>,
}

impl GatewayServer {
    /// Create a new gateway server
    pub fn new(config: ServerConfig, query: StreamTokenQuery) -> Self {
        Self {
            config,
            query: Arc::new(query),
        }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        build_router(&self.config, self.query.clone())
    }

    /// Run the server until `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> GatewayResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        let listener = TcpListener::bind(self.config.listen_addr).await?;
        tracing::info!("Gateway listening on {}", self.config.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }

    /// Get the server listen address
    pub fn listen_addr(&self) -> SocketAddr {
        self.config.listen_addr
    }
}

/// Routes, with trace, body limit and CORS layers
pub fn build_router(config: &ServerConfig, query: Arc<StreamTokenQuery>) -> Router {
    let mut router = Router::new()
        .route("/balance/:address", get(balance))
        .route("/can-stream/:address/:content_id", get(can_stream))
        .route("/query", post(query_handler))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(config.max_body_size)),
        );

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(query)
}

async fn balance(
    State(query): State<Arc<StreamTokenQuery>>,
    Path(address): Path<String>,
) -> QueryResponse {
    handler::token_balance(&query, Some(&address)).await
}

async fn can_stream(
    State(query): State<Arc<StreamTokenQuery>>,
    Path((address, content_id)): Path<(String, String)>,
) -> QueryResponse {
    handler::can_stream(&query, Some(&address), Some(&content_id)).await
}

async fn query_handler(
    State(query): State<Arc<StreamTokenQuery>>,
    Json(request): Json<QueryRequest>,
) -> QueryResponse {
    handler::handle_query(&query, request).await
}

async fn health(State(query): State<Arc<StreamTokenQuery>>) -> QueryResponse {
    handler::health(&query).await
}
