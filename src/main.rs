//! omeroweb-router
//!
//! Serves the OMERO.web URL space: every request is matched against an
//! ordered, immutable route table and handed to the bound handler.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ routing::Router ──▶ RouteTable (first match)
//!                     (request id,                              │
//!                      timeout, limits)                         ▼
//!     Client Response                                      Handler
//!     ◀────────────────────────────────────────────────────────┘
//!
//!     admin API ──▶ RouteTable (status, routes, resolve, reverse)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use omeroweb_router::admin::{serve_admin, AdminState};
use omeroweb_router::http::HttpServer;
use omeroweb_router::lifecycle::{bootstrap, load_or_default, signals, Shutdown};
use omeroweb_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "omeroweb-router", version)]
#[command(about = "OMERO.web URL router", long_about = None)]
struct Args {
    /// Path to the TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Build the route table, print it and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("omeroweb-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        api_versions = ?config.routing.api_versions,
        mounts = config.routing.mounts.len(),
        "Configuration loaded"
    );

    let boot = bootstrap(config)?;

    if args.check {
        for route in boot.table.routes() {
            println!("{:<48} {:<40} {}", route.name(), route.handler_ref(), route.matcher().as_regex());
        }
        return Ok(());
    }

    let config = boot.config;
    let table = boot.table;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
        metrics::set_route_count(table.len());
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let admin_task = if config.admin.enabled {
        let admin_listener = TcpListener::bind(&config.admin.bind_address).await?;
        let state = AdminState::new(table.clone(), &config.admin.api_key);
        let admin_shutdown = shutdown.subscribe();
        Some(tokio::spawn(async move {
            if let Err(err) = serve_admin(admin_listener, state, admin_shutdown).await {
                tracing::error!(error = %err, "Admin API failed");
            }
        }))
    } else {
        None
    };

    let server = HttpServer::new(config, table);
    let result = server.run(listener, shutdown.subscribe()).await;

    // The public server may stop on its own error; take the admin API down with it.
    shutdown.trigger();
    if let Some(task) = admin_task {
        let _ = task.await;
    }
    result?;

    tracing::info!("Shutdown complete");
    Ok(())
}
