//! Route declarations and the compiled, immutable route table.
//!
//! # Responsibilities
//! - Hold route declarations (`RouteSpec`) grouped into mounts
//! - Compile and validate everything once, at startup
//! - First-match-wins lookup of a request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan; the table is a few hundred entries at most
//! - Any construction problem is fatal: duplicate names, bad patterns,
//!   unresolved handlers, default/placeholder collisions, and literal routes
//!   that an earlier route already claims

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::routing::error::{PatternError, RouteError};
use crate::routing::handler::{Handler, HandlerRegistry};
use crate::routing::matcher::PathMatcher;
use crate::routing::params::{ParamValue, Params};
use crate::routing::pattern::{Pattern, VERSION_PARAM};

/// One declared route, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub pattern: Pattern,
    pub handler: String,
    pub name: String,
    pub defaults: Params,
}

impl RouteSpec {
    /// Route with a typed pattern.
    pub fn path(pattern: &str, handler: &str, name: &str) -> Self {
        Self {
            pattern: Pattern::typed(pattern),
            handler: handler.to_string(),
            name: name.to_string(),
            defaults: Params::new(),
        }
    }

    /// Route with a regex pattern.
    pub fn re_path(pattern: &str, handler: &str, name: &str) -> Self {
        Self {
            pattern: Pattern::regex(pattern),
            ..Self::path("", handler, name)
        }
    }

    pub fn with_default(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.defaults.insert(key, value);
        self
    }
}

/// A group of routes sharing a prefix and an optional name namespace.
#[derive(Debug, Clone)]
pub struct Mount {
    pub prefix: String,
    pub namespace: Option<String>,
    pub routes: Vec<RouteSpec>,
}

/// A compiled route.
pub struct Route {
    name: String,
    pattern: Pattern,
    handler_ref: String,
    handler: Arc<dyn Handler>,
    matcher: PathMatcher,
    defaults: Params,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler_ref(&self) -> &str {
        &self.handler_ref
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("handler", &self.handler_ref)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub name: String,
    pub handler: String,
    /// Parameters captured from the path.
    pub params: Params,
    pub defaults: Params,
    pub api_version: Option<String>,
}

impl RouteMatch {
    /// Captured parameters merged with the route defaults.
    ///
    /// Keys never collide; that is checked when the table is built.
    pub fn kwargs(&self) -> Params {
        let mut merged = self.params.clone();
        for (key, value) in self.defaults.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }

    /// Namespace of this route, if it was mounted under one.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once(':').map(|(ns, _)| ns)
    }

    /// Fully qualified name of a route in the same namespace.
    pub fn sibling(&self, local_name: &str) -> String {
        match self.namespace() {
            Some(ns) => format!("{}:{}", ns, local_name),
            None => local_name.to_string(),
        }
    }
}

/// Ordered, immutable route table.
pub struct RouteTable {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
    versions: Vec<String>,
}

impl RouteTable {
    pub fn builder(versions: Vec<String>) -> RouteTableBuilder {
        RouteTableBuilder {
            versions,
            mounts: Vec::new(),
        }
    }

    /// First route matching `path`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.resolve_route(path).map(|(_, m)| m)
    }

    pub fn resolve_route(&self, path: &str) -> Option<(&Route, RouteMatch)> {
        self.routes.iter().find_map(|route| {
            route.matcher.match_path(path).map(|m| {
                let matched = RouteMatch {
                    name: route.name.clone(),
                    handler: route.handler_ref.clone(),
                    params: m.params,
                    defaults: route.defaults.clone(),
                    api_version: m.api_version,
                };
                (route, matched)
            })
        })
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&i| &self.routes[i])
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Supported API versions, oldest first.
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn newest_version(&self) -> Option<&str> {
        self.versions.last().map(String::as_str)
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("versions", &self.versions)
            .finish()
    }
}

pub struct RouteTableBuilder {
    versions: Vec<String>,
    mounts: Vec<Mount>,
}

impl RouteTableBuilder {
    pub fn mount(mut self, prefix: &str, namespace: Option<&str>, routes: Vec<RouteSpec>) -> Self {
        self.mounts.push(Mount {
            prefix: prefix.to_string(),
            namespace: namespace.map(str::to_string),
            routes,
        });
        self
    }

    /// Compile, resolve handlers and validate.
    pub fn build(self, registry: &HandlerRegistry) -> Result<RouteTable, RouteError> {
        for version in &self.versions {
            if version.is_empty() || version.contains('/') || version.chars().any(char::is_whitespace) {
                return Err(RouteError::InvalidVersion(version.clone()));
            }
        }

        let mut routes: Vec<Route> = Vec::new();
        let mut by_name = HashMap::new();

        for mount in &self.mounts {
            if !mount.prefix.starts_with('/') || !mount.prefix.ends_with('/') {
                return Err(RouteError::InvalidPrefix(mount.prefix.clone()));
            }

            for spec in &mount.routes {
                let name = match &mount.namespace {
                    Some(ns) => format!("{}:{}", ns, spec.name),
                    None => spec.name.clone(),
                };
                if by_name.contains_key(&name) {
                    return Err(RouteError::DuplicateName(name));
                }

                let matcher = PathMatcher::compile(&mount.prefix, &spec.pattern, &self.versions)
                    .map_err(|source| match source {
                        PatternError::NoVersions => RouteError::EmptyVersionSet,
                        source => RouteError::Pattern {
                            name: name.clone(),
                            pattern: spec.pattern.source().to_string(),
                            source,
                        },
                    })?;

                let handler = registry.resolve(&spec.handler).ok_or_else(|| {
                    RouteError::UnresolvedHandler {
                        name: name.clone(),
                        handler: spec.handler.clone(),
                    }
                })?;

                if let Some(key) = spec
                    .defaults
                    .keys()
                    .find(|key| *key == VERSION_PARAM || matcher.has_placeholder(key))
                {
                    return Err(RouteError::DefaultCollision {
                        name,
                        key: key.to_string(),
                    });
                }

                if let Some(literal) = matcher.literal_path() {
                    if let Some(earlier) = routes.iter().find(|r| r.matcher.is_match(&literal)) {
                        return Err(RouteError::Shadowed {
                            name,
                            by: earlier.name.clone(),
                        });
                    }
                }

                by_name.insert(name.clone(), routes.len());
                routes.push(Route {
                    name,
                    pattern: spec.pattern.clone(),
                    handler_ref: spec.handler.clone(),
                    handler,
                    matcher,
                    defaults: spec.defaults.clone(),
                });
            }

            tracing::debug!(
                prefix = %mount.prefix,
                namespace = ?mount.namespace,
                routes = mount.routes.len(),
                "Mounted routes"
            );
        }

        tracing::info!(
            routes = routes.len(),
            mounts = self.mounts.len(),
            versions = ?self.versions,
            "Route table built"
        );

        Ok(RouteTable {
            routes,
            by_name,
            versions: self.versions,
        })
    }
}
