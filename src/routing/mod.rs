//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query, headers, body)
//!     → router.rs (ordered lookup, handler invocation)
//!     → matcher.rs (anchored match, typed captures)
//!     → Return: handler response or NoMatch
//!
//! Route Compilation (at startup):
//!     RouteSpec[] per mount
//!     → pattern.rs (parse typed / regex syntax)
//!     → matcher.rs (compile anchored regex)
//!     → handler.rs (resolve handler references)
//!     → table.rs (validate, freeze as immutable RouteTable)
//!
//! Link generation:
//!     name + params → reverse.rs → path (re-checked by the same matcher)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)
//! - A type mismatch is "this route does not match", never an error

pub mod error;
pub mod handler;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod reverse;
pub mod router;
pub mod table;

pub use error::{PatternError, ReverseError, RouteError};
pub use handler::{Handler, HandlerContext, HandlerRegistry};
pub use params::{ParamValue, Params};
pub use pattern::{Pattern, PlaceholderKind, VERSION_PARAM};
pub use router::{Dispatch, Router};
pub use table::{Route, RouteMatch, RouteSpec, RouteTable, RouteTableBuilder};
