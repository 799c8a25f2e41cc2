//! Route echo handler.

use std::collections::BTreeMap;

use axum::extract::Query;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::{HandlerContext, Params};

/// JSON description of a matched route.
#[derive(Debug, Serialize)]
pub struct RouteEcho {
    pub route: String,
    pub handler: String,
    pub method: String,
    pub api_version: Option<String>,
    pub kwargs: Params,
    pub query: BTreeMap<String, String>,
}

pub async fn route_echo(ctx: HandlerContext) -> Response {
    let query = Query::<BTreeMap<String, String>>::try_from_uri(ctx.request.uri())
        .map(|Query(query)| query)
        .unwrap_or_default();

    let kwargs = ctx.route.kwargs();
    Json(RouteEcho {
        route: ctx.route.name,
        handler: ctx.route.handler,
        method: ctx.request.method().to_string(),
        api_version: ctx.route.api_version,
        kwargs,
        query,
    })
    .into_response()
}
