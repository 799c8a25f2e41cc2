//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::catalog::webclient::DEFAULT_VIEWER_VIEW;
use crate::catalog::Catalog;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, connection limit).
    pub listener: ListenerConfig,

    /// Route table construction.
    pub routing: RoutingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub admin: AdminConfig,

    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4080").
    pub bind_address: String,

    /// Maximum concurrent in-flight requests.
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Route table construction settings. Read once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Supported API versions, oldest first. Requests naming any other
    /// version never match a versioned route.
    pub api_versions: Vec<String>,

    /// Handler reference bound to the image viewer route.
    pub viewer_view: String,

    /// Catalog mounts, matched in this order.
    pub mounts: Vec<MountConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_versions: vec!["0".to_string()],
            viewer_view: DEFAULT_VIEWER_VIEW.to_string(),
            mounts: vec![
                MountConfig {
                    catalog: Catalog::Api,
                    prefix: "/api/".to_string(),
                    namespace: None,
                },
                MountConfig {
                    catalog: Catalog::Webclient,
                    prefix: "/webclient/".to_string(),
                    namespace: Some("webclient".to_string()),
                },
            ],
        }
    }
}

/// One catalog mounted under a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MountConfig {
    pub catalog: Catalog,

    /// Path prefix; must start and end with `/`.
    pub prefix: String,

    /// Route names become `namespace:name` when set.
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

/// Admin key shipped in the defaults; rejected when admin is enabled.
pub const PLACEHOLDER_ADMIN_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: PLACEHOLDER_ADMIN_KEY.to_string(),
            bind_address: "127.0.0.1:4081".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}
