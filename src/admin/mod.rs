//! Admin API: read-only inspection of the route table.
//!
//! Served on its own listener, guarded by a Bearer key.

pub mod auth;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::routing::RouteTable;
use self::auth::admin_auth_middleware;
use self::handlers::*;

#[derive(Clone)]
pub struct AdminState {
    pub table: Arc<RouteTable>,
    pub api_key: Arc<str>,
    pub started: Instant,
}

impl AdminState {
    pub fn new(table: Arc<RouteTable>, api_key: &str) -> Self {
        Self {
            table,
            api_key: Arc::from(api_key),
            started: Instant::now(),
        }
    }
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes", get(get_routes))
        .route("/admin/resolve", get(resolve_path))
        .route("/admin/reverse/{name}", get(reverse_name))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}

pub async fn serve_admin(
    listener: TcpListener,
    state: AdminState,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    tracing::info!(address = %listener.local_addr()?, "Admin API starting");
    axum::serve(listener, setup_admin_router(state).into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await?;
    tracing::info!("Admin API stopped");
    Ok(())
}
