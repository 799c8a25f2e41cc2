//! Discovery endpoints of the JSON API.
//!
//! Both answers are assembled from reverse lookups against the live table,
//! so the advertised links always match what the router dispatches.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

use crate::http::response::json_error;
use crate::routing::{HandlerContext, Params, ReverseError, VERSION_PARAM};

/// Resources advertised by the version base, as `url:<key>` → route name.
const BASE_LINKS: &[(&str, &str)] = &[
    ("token", "api_token"),
    ("servers", "api_servers"),
    ("login", "api_login"),
    ("save", "api_save"),
    ("projects", "api_projects"),
    ("datasets", "api_datasets"),
    ("images", "api_images"),
    ("screens", "api_screens"),
    ("plates", "api_plates"),
    ("rois", "api_rois"),
    ("experimenters", "api_experimenters"),
    ("experimentergroups", "api_experimentergroups"),
];

/// `{"data": [{"version": "0", "url:base": "/api/v0/"}, ...]}`
pub async fn versions(ctx: HandlerContext) -> Response {
    let base = ctx.route.sibling("api_base");
    let mut data = Vec::with_capacity(ctx.links.versions().len());
    for version in ctx.links.versions() {
        let params = Params::new().with(VERSION_PARAM, version.as_str());
        match ctx.links.reverse(&base, &params) {
            Ok(url) => data.push(json!({ "version": version, "url:base": url })),
            Err(err) => return link_failure(&ctx.route.name, err),
        }
    }
    Json(json!({ "data": data })).into_response()
}

/// `{"url:projects": "/api/v0/m/projects/", ...}` for the requested version.
pub async fn base(ctx: HandlerContext) -> Response {
    let Some(version) = ctx.route.api_version.clone() else {
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "route carries no API version");
    };
    let params = Params::new().with(VERSION_PARAM, version);

    let mut links = Map::new();
    for (key, local_name) in BASE_LINKS {
        match ctx.links.reverse(&ctx.route.sibling(local_name), &params) {
            Ok(url) => {
                links.insert(format!("url:{}", key), Value::String(url));
            }
            // Custom tables may leave resources out.
            Err(ReverseError::UnknownName(_)) => continue,
            Err(err) => return link_failure(&ctx.route.name, err),
        }
    }
    Json(Value::Object(links)).into_response()
}

fn link_failure(route: &str, err: ReverseError) -> Response {
    tracing::error!(route = %route, error = %err, "Link generation failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
}
