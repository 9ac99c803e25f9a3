use std::collections::HashMap;
use std::sync::Arc;

use crate::{LocaleConfig, RouteDefinition, RouteError, RouteSpec};

// ============================================================================
// Route Registry
// ============================================================================

/// Ordered collection of route definitions plus their locale configuration
///
/// Built once with chained [`add`](Self::add) calls, then shared read-only.
/// Registration order is match precedence: when two patterns can match the
/// same path, the one added first wins.
///
/// Mutation needs `&mut self`, so once the registry is [`seal`](Self::seal)ed
/// into an `Arc` no route can be added while requests are being served.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{LocaleConfig, RouteRegistry, RouteSpec};
///
/// let mut registry = RouteRegistry::new(LocaleConfig::new(["en"], "zh-hk"));
/// registry
///     .add("hello")?
///     .add(("user", "/user/:id", "profile"))?
///     .add(RouteSpec::new("yeah").exclude_locales(["en"]))?;
///
/// let routes = registry.seal();
/// assert_eq!(routes.len(), 3);
/// assert_eq!(routes.find_by_name("user").unwrap().page(), "profile");
/// # Ok::<(), rhtmx_routes::RouteError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Vec<RouteDefinition>,
    by_name: HashMap<String, usize>,
    locale: LocaleConfig,
}

impl RouteRegistry {
    pub fn new(locale: LocaleConfig) -> Self {
        Self {
            routes: Vec::new(),
            by_name: HashMap::new(),
            locale,
        }
    }

    /// Appends a route
    ///
    /// Accepts anything convertible into a [`RouteSpec`]: a name, a
    /// `(name, pattern)` or `(name, pattern, page)` tuple, or a spec. Fails
    /// without touching the registry when the name is empty or taken, or the
    /// pattern does not compile.
    pub fn add(&mut self, spec: impl Into<RouteSpec>) -> Result<&mut Self, RouteError> {
        let spec = spec.into();
        if self.by_name.contains_key(&spec.name) {
            return Err(RouteError::DuplicateName(spec.name));
        }

        let definition = spec.into_definition()?;
        self.warn_on_locale_collisions(&definition);

        tracing::debug!(
            "Registered route {} -> {} (page {})",
            definition.name(),
            definition.pattern(),
            definition.page()
        );

        self.by_name
            .insert(definition.name().to_string(), self.routes.len());
        self.routes.push(definition);
        Ok(self)
    }

    /// Appends every spec in order, stopping at the first failure
    pub fn add_all<I, S>(&mut self, specs: I) -> Result<&mut Self, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<RouteSpec>,
    {
        for spec in specs {
            self.add(spec)?;
        }
        Ok(self)
    }

    /// Freezes the registry for sharing across request handlers
    pub fn seal(self) -> Arc<Self> {
        tracing::debug!("Sealed route registry with {} routes", self.routes.len());
        Arc::new(self)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RouteDefinition> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    /// Candidate routes for a locale-free path of `segments`, in registration order
    ///
    /// Narrows the full registry scan: only drops routes whose pattern cannot
    /// consume that many segments, so every route that would match is still
    /// yielded in its registered position. Constraint and locale checks are
    /// left to the matcher.
    pub fn find_by_path<'a, S: AsRef<str>>(
        &'a self,
        segments: &[S],
    ) -> impl Iterator<Item = &'a RouteDefinition> + 'a {
        let count = segments.len();
        self.routes
            .iter()
            .filter(move |route| route.pattern().admits(count))
    }

    /// All routes in registration order
    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    pub fn locale_config(&self) -> &LocaleConfig {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// A leading literal equal to a non-default locale can never be reached:
    /// that segment is always read as the locale.
    fn warn_on_locale_collisions(&self, definition: &RouteDefinition) {
        if let Some(literal) = definition.pattern().leading_literal() {
            if self.locale.is_locale_segment(literal) {
                tracing::warn!(
                    "Route {} starts with `{}`, which is read as a locale prefix; \
                     paths for this route resolve with that segment stripped",
                    definition.name(),
                    literal
                );
            }
        }

        for excluded in definition.excluded_locales() {
            if !self.locale.is_configured(excluded) {
                tracing::warn!(
                    "Route {} excludes locale `{}`, which is not configured",
                    definition.name(),
                    excluded
                );
            }
        }
    }
}
