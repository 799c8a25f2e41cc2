//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Build the handler registry and the route table
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners are bound by the caller, after this succeeds

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog;
use crate::config::{load_config, validation::validate_config, ConfigError, RouterConfig};
use crate::handlers;
use crate::observability::metrics;
use crate::routing::{RouteError, RouteTable};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("route table: {0}")]
    Routes(#[from] RouteError),
}

/// Everything the servers need, built once.
#[derive(Debug)]
pub struct Bootstrap {
    pub config: RouterConfig,
    pub table: Arc<RouteTable>,
}

/// Load `path`, or validated defaults when no file is given.
pub fn load_or_default(path: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = RouterConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Build the route table for `config`.
pub fn bootstrap(config: RouterConfig) -> Result<Bootstrap, StartupError> {
    let registry = handlers::default_registry(&config.routing);
    let table = catalog::build_table(&config.routing, &registry)?;
    metrics::set_route_count(table.len());

    tracing::info!(
        routes = table.len(),
        versions = ?table.versions(),
        viewer_view = %config.routing.viewer_view,
        "Startup complete"
    );

    Ok(Bootstrap {
        config,
        table: Arc::new(table),
    })
}
