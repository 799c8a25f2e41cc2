//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Look up the first route matching the request path
//! - Invoke its handler with the request and merged parameters
//! - Return the handler's response untouched, or an explicit NoMatch
//!
//! # Design Decisions
//! - Holds only an `Arc<RouteTable>`; cloning is cheap and lock-free
//! - NoMatch is an expected outcome, logged at debug level
//! - The HTTP method is not part of matching; handlers decide what they accept

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::routing::handler::HandlerContext;
use crate::routing::table::RouteTable;

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum Dispatch {
    Handled { route: String, response: Response },
    NoMatch,
}

#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
}

impl Router {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub async fn dispatch(&self, request: Request<Body>) -> Dispatch {
        let Some((route, matched)) = self.table.resolve_route(request.uri().path()) else {
            tracing::debug!(
                method = %request.method(),
                path = %request.uri().path(),
                "No route matched"
            );
            return Dispatch::NoMatch;
        };

        tracing::debug!(
            route = %matched.name,
            handler = %matched.handler,
            api_version = ?matched.api_version,
            params = ?matched.params,
            "Route matched"
        );

        let name = matched.name.clone();
        let handler = route.handler().clone();
        let ctx = HandlerContext {
            request,
            route: matched,
            links: self.table.clone(),
        };

        Dispatch::Handled {
            route: name,
            response: handler.call(ctx).await,
        }
    }
}
