//! Built-in handler implementations and the default registry.
//!
//! The catalogs name views of a larger web application. This process only
//! owns URL dispatch, so every reference without a dedicated implementation
//! is bound to [`echo::route_echo`], which reports what was matched.

pub mod api;
pub mod echo;

use crate::catalog;
use crate::config::RoutingConfig;
use crate::routing::HandlerRegistry;

/// Image viewers that `routing.viewer_view` may name.
pub const KNOWN_VIEWERS: &[&str] = &["webgateway.full_viewer", "omero_iviewer.index"];

/// Registry covering every reference the catalogs declare.
///
/// A `viewer_view` outside [`KNOWN_VIEWERS`] stays unregistered, so the
/// table build rejects it.
pub fn default_registry(routing: &RoutingConfig) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    for reference in catalog::handler_references() {
        registry.register(reference, echo::route_echo);
    }
    for viewer in KNOWN_VIEWERS {
        registry.register(*viewer, echo::route_echo);
    }
    if !registry.contains(&routing.viewer_view) {
        tracing::warn!(viewer_view = %routing.viewer_view, "Unknown image viewer reference");
    }

    registry.register("api.versions", api::versions);
    registry.register("api.base", api::base);

    tracing::debug!(handlers = registry.len(), "Handler registry ready");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_covers_catalogs() {
        let registry = default_registry(&RoutingConfig::default());
        for reference in catalog::handler_references() {
            assert!(registry.contains(&reference), "missing {}", reference);
        }
    }

    #[test]
    fn test_custom_viewer_is_registered() {
        let routing = RoutingConfig {
            viewer_view: "omero_iviewer.index".to_string(),
            ..RoutingConfig::default()
        };
        let registry = default_registry(&routing);
        assert!(registry.contains("omero_iviewer.index"));
    }

    #[test]
    fn test_unknown_viewer_is_not_registered() {
        let routing = RoutingConfig {
            viewer_view: "webgateway.ful_viewer".to_string(),
            ..RoutingConfig::default()
        };
        let registry = default_registry(&routing);
        assert!(!registry.contains("webgateway.ful_viewer"));
    }
}
