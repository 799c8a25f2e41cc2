//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned, propagated to response)
//!     → routing::Router (first matching route, handler invoked)
//!     → response.rs (NoMatch and error bodies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
