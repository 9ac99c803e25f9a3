//! # RHTMX Routes
//!
//! Named, ordered route registry with locale-aware URL resolution and
//! generation:
//! - Named routes with path patterns (`/user/:id`)
//! - Constrained parameters (`/user/:id(\d+)`)
//! - Optional and repeating parameters (`/posts/:id?`, `/docs/:path+`, `/files/:path*`)
//! - A locale prefix in front of every non-default-locale URL (`/en/hello`)
//! - Per-route locale exclusions
//! - Mounting the whole route set under a path prefix (`/app`)
//!
//! ## Precedence
//!
//! Routes are tried in registration order and the first one that matches
//! wins. Register `/hello` before `/:slug` if `/hello` must not be captured
//! as a slug.
//!
//! ## Locales
//!
//! The default locale never appears in a URL. Every other configured locale
//! is written as the first path segment, so with `zh-hk` as default and `en`
//! configured, `/hello` is Chinese and `/en/hello` is English. `/zh-hk/hello`
//! does not resolve.
//!
//! ## Example
//!
//! ```
//! use rhtmx_routes::{LocaleConfig, RouteRegistry, RouteSpec};
//!
//! let mut registry = RouteRegistry::new(LocaleConfig::new(["en"], "zh-hk"));
//! registry
//!     .add("hello")?
//!     .add(("user", r"/user/:id(\d+)", "profile"))?
//!     .add(RouteSpec::new("yeah").exclude_locales(["en"]))?;
//! let routes = registry.seal();
//!
//! let found = routes.resolve("/en/user/42").into_match().unwrap();
//! assert_eq!(found.page(), "profile");
//! assert_eq!(found.params.get("id"), Some(&"42".to_string()));
//! assert_eq!(found.locale, "en");
//!
//! let urls = routes.urls_for_params("user", &[("id", "42")], "en")?;
//! assert_eq!(urls.internal_path, "/user/42?id=42&locale=en");
//! assert_eq!(urls.external_path, "/en/user/42");
//!
//! assert!(routes.resolve("/en/yeah").is_not_found());
//! # Ok::<(), rhtmx_routes::RouteError>(())
//! ```

use std::collections::BTreeMap;

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod constraint;
mod definition;
mod dispatch;
mod error;
pub mod locale;
mod matcher;
mod navigation;
pub mod path;
mod registry;
pub mod route;
mod urls;

pub use config::RoutesConfig;
pub use constraint::ParameterConstraint;
pub use definition::{RouteDefinition, RouteSpec};
pub use dispatch::{PageRequest, RequestHandler};
pub use error::{GenerateError, PatternError, RouteError};
pub use locale::{is_locale_allowed, prefix_for, LocaleConfig};
pub use matcher::{MatchResult, RouteMatch};
pub use navigation::{Link, Navigation, Navigator};
pub use registry::RouteRegistry;
pub use route::{classify_segment, PatternSegmentType, RoutePattern};
pub use urls::Urls;

/// Parameter mapping used for captures, query strings and generation
///
/// Sorted by key so every query string built from it is deterministic.
pub type Params = BTreeMap<String, String>;
