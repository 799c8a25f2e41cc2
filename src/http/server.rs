//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router whose fallback feeds every request to the route table
//! - Wire up middleware (request ID, tracing, timeout, body and concurrency limits)
//! - Bind server to listener
//! - Record dispatch metrics
//! - Graceful shutdown on the broadcast shutdown channel

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::response::not_found;
use crate::observability::metrics;
use crate::routing::{Dispatch, RouteTable, Router as RouteRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: RouteRouter,
}

/// HTTP front end for the route table.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `table`.
    pub fn new(config: RouterConfig, table: Arc<RouteTable>) -> Self {
        let state = AppState {
            router: RouteRouter::new(table),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(ConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Hands the request to the route table and records the outcome.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    match state.router.dispatch(request).await {
        Dispatch::Handled { route, response } => {
            let status = response.status().as_u16();
            tracing::debug!(
                request_id = %request_id,
                route = %route,
                status,
                "Request handled"
            );
            metrics::record_dispatch(&method, status, &route, start_time);
            response
        }
        Dispatch::NoMatch => {
            tracing::debug!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_no_match(&method, start_time);
            not_found(&path)
        }
    }
}
