//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the version whitelist and the mount layout
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Route-level problems (bad patterns, duplicate names) are left to the
//!   route table build, which is equally fatal

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{RouterConfig, PLACEHOLDER_ADMIN_KEY};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("routing.api_versions must not be empty")]
    NoApiVersions,

    #[error("routing.api_versions: invalid version `{0}`")]
    InvalidApiVersion(String),

    #[error("routing.api_versions: `{0}` listed more than once")]
    DuplicateApiVersion(String),

    #[error("routing.mounts must not be empty")]
    NoMounts,

    #[error("routing.mounts: prefix `{0}` must start and end with `/`")]
    InvalidPrefix(String),

    #[error("routing.mounts: namespace `{0}` used more than once")]
    DuplicateNamespace(String),

    #[error("routing.mounts: namespace `{0}` must be non-empty and contain no `:`")]
    InvalidNamespace(String),

    #[error("routing.viewer_view must not be empty")]
    EmptyViewerView,

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("admin.api_key must be changed before enabling the admin API")]
    PlaceholderAdminKey,
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }
    if config.observability.metrics_enabled {
        check_address(&mut errors, "observability.metrics_address", &config.observability.metrics_address);
    }
    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        if config.admin.api_key.is_empty() || config.admin.api_key == PLACEHOLDER_ADMIN_KEY {
            errors.push(ValidationError::PlaceholderAdminKey);
        }
    }

    let routing = &config.routing;
    if routing.api_versions.is_empty() {
        errors.push(ValidationError::NoApiVersions);
    }
    let mut seen_versions = HashSet::new();
    for version in &routing.api_versions {
        if version.is_empty() || version.contains('/') || version.chars().any(char::is_whitespace) {
            errors.push(ValidationError::InvalidApiVersion(version.clone()));
        } else if !seen_versions.insert(version.as_str()) {
            errors.push(ValidationError::DuplicateApiVersion(version.clone()));
        }
    }

    if routing.viewer_view.trim().is_empty() {
        errors.push(ValidationError::EmptyViewerView);
    }

    if routing.mounts.is_empty() {
        errors.push(ValidationError::NoMounts);
    }
    let mut seen_namespaces = HashSet::new();
    for mount in &routing.mounts {
        if !mount.prefix.starts_with('/') || !mount.prefix.ends_with('/') {
            errors.push(ValidationError::InvalidPrefix(mount.prefix.clone()));
        }
        if let Some(ns) = &mount.namespace {
            if ns.is_empty() || ns.contains(':') {
                errors.push(ValidationError::InvalidNamespace(ns.clone()));
            } else if !seen_namespaces.insert(ns.as_str()) {
                errors.push(ValidationError::DuplicateNamespace(ns.clone()));
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
