use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::admin::AdminState;
use crate::http::response::{json_error, not_found};
use crate::routing::{Params, ReverseError, RouteMatch};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
    pub api_versions: Vec<String>,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
pub struct RouteInfo {
    pub name: String,
    pub pattern: String,
    pub regex: String,
    pub handler: String,
    pub defaults: Params,
    pub reversible: bool,
}

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Serialize)]
pub struct ReverseResult {
    pub name: String,
    pub path: String,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        routes: state.table.len(),
        api_versions: state.table.versions().to_vec(),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

pub async fn get_routes(State(state): State<AdminState>) -> Json<Vec<RouteInfo>> {
    Json(
        state
            .table
            .routes()
            .map(|route| RouteInfo {
                name: route.name().to_string(),
                pattern: route.pattern().source().to_string(),
                regex: route.matcher().as_regex().to_string(),
                handler: route.handler_ref().to_string(),
                defaults: route.defaults().clone(),
                reversible: route.matcher().segments().is_some(),
            })
            .collect(),
    )
}

pub async fn resolve_path(
    State(state): State<AdminState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<RouteMatch>, Response> {
    state
        .table
        .resolve(&query.path)
        .map(Json)
        .ok_or_else(|| not_found(&query.path))
}

pub async fn reverse_name(
    State(state): State<AdminState>,
    Path(name): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let params: Params = query.into_iter().collect();
    match state.table.reverse(&name, &params) {
        Ok(path) => Json(ReverseResult { name, path }).into_response(),
        Err(err @ ReverseError::UnknownName(_)) => json_error(StatusCode::NOT_FOUND, &err.to_string()),
        Err(err) => json_error(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}
