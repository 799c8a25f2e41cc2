//! Static route catalogs and their assembly into a [`RouteTable`].
//!
//! # Data Flow
//! ```text
//! RoutingConfig (versions, mounts, viewer_view)
//!     → catalog routes per mount (api.rs, webclient.rs)
//!     → RouteTable::builder().mount(..).build(registry)
//! ```

pub mod api;
pub mod webclient;

use serde::{Deserialize, Serialize};

use crate::config::RoutingConfig;
use crate::routing::{HandlerRegistry, RouteError, RouteSpec, RouteTable};

/// Route catalogs that can be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Api,
    Webclient,
}

impl Catalog {
    pub fn routes(self, viewer_view: &str) -> Vec<RouteSpec> {
        match self {
            Catalog::Api => api::routes(),
            Catalog::Webclient => webclient::routes(viewer_view),
        }
    }

    pub fn all() -> [Catalog; 2] {
        [Catalog::Api, Catalog::Webclient]
    }
}

/// Every handler reference the catalogs declare with their default binding.
pub fn handler_references() -> Vec<String> {
    let mut refs: Vec<String> = Catalog::all()
        .into_iter()
        .flat_map(|c| c.routes(webclient::DEFAULT_VIEWER_VIEW))
        .map(|spec| spec.handler)
        .collect();
    refs.sort();
    refs.dedup();
    refs
}

/// Build the process route table from configuration.
pub fn build_table(routing: &RoutingConfig, registry: &HandlerRegistry) -> Result<RouteTable, RouteError> {
    let mut builder = RouteTable::builder(routing.api_versions.clone());
    for mount in &routing.mounts {
        builder = builder.mount(
            &mount.prefix,
            mount.namespace.as_deref(),
            mount.catalog.routes(&routing.viewer_view),
        );
    }
    builder.build(registry)
}
