//! Error types for route registration and URL generation
//!
//! Request matching never produces an error: a path that does not resolve is
//! reported as [`MatchResult::NotFound`](crate::MatchResult::NotFound).

/// A route pattern could not be compiled
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unmatched `{delimiter}` at byte {position} in pattern `{pattern}`")]
    UnmatchedDelimiter {
        pattern: String,
        delimiter: char,
        position: usize,
    },

    #[error("unexpected `{delimiter}` in literal segment `{segment}` of pattern `{pattern}`")]
    UnexpectedDelimiter {
        pattern: String,
        segment: String,
        delimiter: char,
    },

    #[error("parameter without a name in segment `{segment}` of pattern `{pattern}`")]
    MissingParamName { pattern: String, segment: String },

    #[error("duplicate parameter `{name}` in pattern `{pattern}`")]
    DuplicateParam { pattern: String, name: String },

    #[error("invalid modifier `{modifier}` after parameter `{name}` in pattern `{pattern}`")]
    InvalidModifier {
        pattern: String,
        name: String,
        modifier: String,
    },

    #[error("invalid constraint `{constraint}` for parameter `{name}`: {reason}")]
    InvalidConstraint {
        name: String,
        constraint: String,
        reason: String,
    },
}

/// A concrete path could not be produced from a parameter mapping
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("missing value for parameter `{name}`")]
    MissingParam { name: String },

    #[error("value `{value}` for parameter `{name}` does not satisfy `{constraint}`")]
    Constraint {
        name: String,
        value: String,
        constraint: String,
    },
}

/// Registry-level failures: registration problems and bad generation requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route name must not be empty")]
    EmptyName,

    #[error("a route named `{0}` is already registered")]
    DuplicateName(String),

    #[error("invalid pattern for route `{name}`: {source}")]
    Pattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` is not available in locale `{locale}`")]
    LocaleExcluded { route: String, locale: String },

    #[error("locale `{0}` is not configured")]
    UnknownLocale(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}
