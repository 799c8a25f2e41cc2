//! Handler binding.
//!
//! Routes name their handler by reference (`webgateway.render_thumbnail`).
//! References are resolved once, when the table is built, against a
//! [`HandlerRegistry`]; dispatch never looks anything up by string.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::routing::table::{RouteMatch, RouteTable};

/// Everything a handler receives for one request.
pub struct HandlerContext {
    pub request: Request<Body>,
    pub route: RouteMatch,
    /// Table used for link generation.
    pub links: Arc<RouteTable>,
}

pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: HandlerContext) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, ctx: HandlerContext) -> BoxFuture<'static, Response> {
        Box::pin(self(ctx))
    }
}

/// Reference → implementation map consulted at table construction.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a handler.
    pub fn register(&mut self, reference: impl Into<String>, handler: impl Handler) {
        self.handlers.insert(reference.into(), Arc::new(handler));
    }

    pub fn register_shared(&mut self, reference: impl Into<String>, handler: Arc<dyn Handler>) {
        self.handlers.insert(reference.into(), handler);
    }

    pub fn with(mut self, reference: impl Into<String>, handler: impl Handler) -> Self {
        self.register(reference, handler);
        self
    }

    pub fn resolve(&self, reference: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(reference).cloned()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.handlers.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("HandlerRegistry").field("handlers", &names).finish()
    }
}
