use crate::{Params, RouteError, RouteMatch, RouteRegistry, Urls};

/// Moves a client between pages
///
/// Implemented by the navigation layer. Every method receives both paths:
/// `internal_path` selects what to load, `external_path` is what the address
/// bar shows.
pub trait Navigator {
    fn push(&mut self, urls: &Urls);

    fn replace(&mut self, urls: &Urls);

    fn prefetch(&mut self, urls: &Urls);
}

/// Anchor target: `href` is loaded, `as_path` is displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub as_path: String,
}

/// Route-aware navigation helpers bound to one registry and one locale
///
/// The locale is fixed when the helper is built, usually from the route of
/// the request being served, so links stay in the language the visitor is
/// reading.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{LocaleConfig, Navigation, Navigator, RouteRegistry, Urls};
///
/// #[derive(Default)]
/// struct History(Vec<String>);
///
/// impl Navigator for History {
///     fn push(&mut self, urls: &Urls) {
///         self.0.push(urls.external_path.clone());
///     }
///     fn replace(&mut self, urls: &Urls) {
///         self.0.pop();
///         self.0.push(urls.external_path.clone());
///     }
///     fn prefetch(&mut self, _urls: &Urls) {}
/// }
///
/// let mut registry = RouteRegistry::new(LocaleConfig::new(["en"], "zh-hk"));
/// registry.add(("user", "/user/:id", "profile"))?;
///
/// let mut nav = Navigation::new(&registry, History::default(), "en");
/// nav.push_route("user", &[("id", "42")])?;
/// assert_eq!(nav.into_navigator().0, vec!["/en/user/42".to_string()]);
/// # Ok::<(), rhtmx_routes::RouteError>(())
/// ```
#[derive(Debug)]
pub struct Navigation<'r, N> {
    registry: &'r RouteRegistry,
    navigator: N,
    locale: String,
}

impl<'r, N: Navigator> Navigation<'r, N> {
    pub fn new(registry: &'r RouteRegistry, navigator: N, locale: impl Into<String>) -> Self {
        Self {
            registry,
            navigator,
            locale: locale.into(),
        }
    }

    /// Navigation in the locale of a resolved request
    pub fn for_match(registry: &'r RouteRegistry, navigator: N, found: &RouteMatch<'_>) -> Self {
        Self::new(registry, navigator, found.locale.clone())
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn push_route(&mut self, name_or_path: &str, params: &[(&str, &str)]) -> Result<(), RouteError> {
        let urls = self.urls(name_or_path, params)?;
        tracing::debug!("push {}", urls.external_path);
        self.navigator.push(&urls);
        Ok(())
    }

    pub fn replace_route(&mut self, name_or_path: &str, params: &[(&str, &str)]) -> Result<(), RouteError> {
        let urls = self.urls(name_or_path, params)?;
        tracing::debug!("replace {}", urls.external_path);
        self.navigator.replace(&urls);
        Ok(())
    }

    pub fn prefetch_route(&mut self, name_or_path: &str, params: &[(&str, &str)]) -> Result<(), RouteError> {
        let urls = self.urls(name_or_path, params)?;
        self.navigator.prefetch(&urls);
        Ok(())
    }

    /// Link attributes for a route, without navigating
    pub fn link(&self, name_or_path: &str, params: &[(&str, &str)]) -> Result<Link, RouteError> {
        let urls = self.urls(name_or_path, params)?;
        Ok(Link {
            href: urls.internal_path,
            as_path: urls.external_path,
        })
    }

    /// Same as [`link`](Self::link) with a prepared parameter map
    pub fn link_with(&self, name_or_path: &str, params: &Params) -> Result<Link, RouteError> {
        let urls = self.registry.urls_for(name_or_path, params, &self.locale)?;
        Ok(Link {
            href: urls.internal_path,
            as_path: urls.external_path,
        })
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }

    fn urls(&self, name_or_path: &str, params: &[(&str, &str)]) -> Result<Urls, RouteError> {
        self.registry
            .urls_for_params(name_or_path, params, &self.locale)
    }
}
