//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` overrides the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(config: &ObservabilityConfig) -> String {
    format!(
        "omeroweb_router={level},route_cli={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_configured_level() {
        let config = ObservabilityConfig {
            log_level: "debug".to_string(),
            ..ObservabilityConfig::default()
        };
        let filter = default_filter(&config);
        assert!(filter.contains("omeroweb_router=debug"));
        assert!(filter.contains("tower_http=debug"));
        assert!(filter.parse::<EnvFilter>().is_ok());
    }
}
