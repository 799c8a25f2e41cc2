//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::response::Response;
use serde_json::Value;
use tokio::net::TcpListener;

use omeroweb_router::catalog::{api, webclient};
use omeroweb_router::config::RouterConfig;
use omeroweb_router::handlers::default_registry;
use omeroweb_router::http::HttpServer;
use omeroweb_router::lifecycle::{bootstrap, Shutdown};
use omeroweb_router::routing::{HandlerRegistry, RouteTable};

/// Registry with every catalog reference bound, as the binary builds it.
#[allow(dead_code)]
pub fn registry() -> HandlerRegistry {
    default_registry(&RouterConfig::default().routing)
}

/// API catalog alone at `/`, versions 1 and 2.
#[allow(dead_code)]
pub fn api_table() -> RouteTable {
    RouteTable::builder(vec!["1".to_string(), "2".to_string()])
        .mount("/", None, api::routes())
        .build(&registry())
        .unwrap()
}

/// Web client catalog alone at `/`.
#[allow(dead_code)]
pub fn webclient_table() -> RouteTable {
    RouteTable::builder(vec!["0".to_string()])
        .mount("/", None, webclient::routes(webclient::DEFAULT_VIEWER_VIEW))
        .build(&registry())
        .unwrap()
}

/// Default configuration listening on an ephemeral port.
#[allow(dead_code)]
pub fn test_config() -> RouterConfig {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

#[allow(dead_code)]
pub fn server(config: RouterConfig) -> (HttpServer, Arc<RouteTable>) {
    let boot = bootstrap(config).unwrap();
    let table = boot.table.clone();
    (HttpServer::new(boot.config, boot.table), table)
}

/// Start a server on an ephemeral port; returns its address.
#[allow(dead_code)]
pub async fn spawn_server(config: RouterConfig, shutdown: &Shutdown) -> SocketAddr {
    let (server, _) = server(config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

#[allow(dead_code)]
pub fn get(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
