//! OMERO.web URL dispatch as a library: ordered route tables with typed
//! placeholders, reverse lookup, and an axum front end.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteTable, Router};
