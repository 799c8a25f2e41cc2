//! Routing error types.
//!
//! Construction errors are fatal: a table that fails to build must keep the
//! process from starting. Reverse errors are caller bugs and never surface as
//! a 404.

use thiserror::Error;

/// Errors raised while parsing or compiling a single pattern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unterminated placeholder starting at byte {0}")]
    UnterminatedPlaceholder(usize),

    #[error("unterminated optional group starting at byte {0}")]
    UnterminatedGroup(usize),

    #[error("unexpected `]` at byte {0}")]
    UnbalancedGroup(usize),

    #[error("optional groups cannot be nested (byte {0})")]
    NestedGroup(usize),

    #[error("placeholder `<{0}>` is missing a `kind:name` separator")]
    MissingKind(String),

    #[error("unknown placeholder kind `{0}`")]
    UnknownKind(String),

    #[error("invalid placeholder name `{0}`")]
    InvalidName(String),

    #[error("placeholder `{0}` declared more than once")]
    DuplicatePlaceholder(String),

    #[error("enum placeholder `{0}` has no usable literal")]
    EmptyEnum(String),

    #[error("digits placeholder `{0}` needs 1 to 18 digits with min <= max")]
    InvalidDigits(String),

    #[error("version placeholder used but no API versions are configured")]
    NoVersions,

    #[error("regex error: {0}")]
    Regex(String),
}

/// Errors raised while building a [`RouteTable`](crate::routing::RouteTable).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route `{name}`: bad pattern `{pattern}`: {source}")]
    Pattern {
        name: String,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("route `{name}`: handler `{handler}` is not registered")]
    UnresolvedHandler { name: String, handler: String },

    #[error("route `{name}`: default `{key}` collides with a path placeholder")]
    DefaultCollision { name: String, key: String },

    #[error("route `{name}` can never match: its path is already claimed by `{by}`")]
    Shadowed { name: String, by: String },

    #[error("mount prefix `{0}` must start and end with `/`")]
    InvalidPrefix(String),

    #[error("no API versions configured")]
    EmptyVersionSet,

    #[error("invalid API version `{0}`")]
    InvalidVersion(String),
}

/// Errors raised by reverse lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReverseError {
    #[error("no route named `{0}`")]
    UnknownName(String),

    #[error("route `{name}`: missing required parameter `{param}`")]
    MissingParam { name: String, param: String },

    #[error("route `{name}`: parameter `{param}` has invalid value `{value}`")]
    InvalidParam {
        name: String,
        param: String,
        value: String,
    },

    #[error("route `{name}`: unexpected parameter `{param}`")]
    UnexpectedParam { name: String, param: String },

    #[error("route `{0}` uses a pattern that cannot be reversed")]
    NotReversible(String),
}
