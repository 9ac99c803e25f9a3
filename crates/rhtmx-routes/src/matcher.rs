use crate::locale::is_locale_allowed;
use crate::path::{
    decode_segment, normalize_prefix, parse_query, split_segments, split_url, strip_mount_prefix,
};
use crate::{Params, RouteDefinition, RouteRegistry};

/// Successful association of a path with one route definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'r> {
    /// The winning route
    pub definition: &'r RouteDefinition,
    /// Parameters extracted from the path (percent-decoded)
    pub params: Params,
    /// Locale read from the path, or the default locale
    pub locale: String,
    /// Query string of the request, if any
    pub query: Params,
}

impl<'r> RouteMatch<'r> {
    pub fn name(&self) -> &'r str {
        self.definition.name()
    }

    pub fn page(&self) -> &'r str {
        self.definition.page()
    }

    /// Query handed to the page renderer: request query, then path
    /// parameters, then `locale`, later entries overriding earlier ones
    pub fn render_query(&self) -> Params {
        let mut query = self.query.clone();
        query.extend(self.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        query.insert("locale".to_string(), self.locale.clone());
        query
    }
}

/// Outcome of resolving a path: a match or a plain not-found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'r> {
    Matched(RouteMatch<'r>),
    NotFound,
}

impl<'r> MatchResult<'r> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn as_match(&self) -> Option<&RouteMatch<'r>> {
        match self {
            Self::Matched(m) => Some(m),
            Self::NotFound => None,
        }
    }

    pub fn into_match(self) -> Option<RouteMatch<'r>> {
        match self {
            Self::Matched(m) => Some(m),
            Self::NotFound => None,
        }
    }
}

// ============================================================================
// Matching
// ============================================================================

impl RouteRegistry {
    /// Resolves a request target under the configured mount prefix
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::{LocaleConfig, RouteRegistry};
    ///
    /// let mut registry = RouteRegistry::new(LocaleConfig::new(["en"], "zh-hk"));
    /// registry.add("hello")?;
    ///
    /// let found = registry.resolve("/en/hello").into_match().unwrap();
    /// assert_eq!(found.name(), "hello");
    /// assert_eq!(found.locale, "en");
    ///
    /// // The default locale is never written out
    /// assert!(registry.resolve("/zh-hk/hello").is_not_found());
    /// assert_eq!(registry.resolve("/hello").into_match().unwrap().locale, "zh-hk");
    /// # Ok::<(), rhtmx_routes::RouteError>(())
    /// ```
    pub fn resolve(&self, url: &str) -> MatchResult<'_> {
        let prefix = self.locale_config().mount_prefix();
        self.resolve_with_prefix(url, &prefix)
    }

    /// Resolves raw request bytes; anything that is not UTF-8 is not found
    pub fn resolve_bytes(&self, url: &[u8]) -> MatchResult<'_> {
        match std::str::from_utf8(url) {
            Ok(url) => self.resolve(url),
            Err(_) => {
                tracing::debug!("Rejected non-UTF-8 request path");
                MatchResult::NotFound
            }
        }
    }

    /// Resolves a request target under an explicit mount prefix
    ///
    /// Steps: strip the mount prefix, split the path, read an optional
    /// locale segment (compared as written, before percent-decoding), decode
    /// the rest, then try each candidate route in registration order,
    /// skipping routes that exclude the locale.
    ///
    /// A path without a locale segment may name its locale in the query
    /// (`?locale=en`), which is how internal paths carry it. Only configured
    /// locales are honoured there.
    pub fn resolve_with_prefix(&self, url: &str, mount_prefix: &str) -> MatchResult<'_> {
        let (path, query) = split_url(url);
        let query = query.map(parse_query).unwrap_or_default();

        let Some(raw) = strip_mount_prefix(path, &normalize_prefix(mount_prefix))
            .and_then(split_segments)
        else {
            tracing::debug!("No route for {:?}: outside mount prefix", url);
            return MatchResult::NotFound;
        };

        let config = self.locale_config();
        let (locale, rest) = config.split_locale(&raw);
        let locale = match query.get("locale") {
            Some(requested) if rest.len() == raw.len() && config.is_configured(requested) => {
                requested.clone()
            }
            _ => locale,
        };

        let Some(remainder) = rest
            .iter()
            .map(|segment| decode_segment(segment))
            .collect::<Option<Vec<String>>>()
        else {
            tracing::debug!("No route for {:?}: malformed percent-encoding", url);
            return MatchResult::NotFound;
        };
        let remainder = remainder.as_slice();

        let found = self.find_by_path(remainder).find_map(|definition| {
            if !is_locale_allowed(definition, &locale) {
                tracing::trace!(
                    "Skipping route {}: excluded in locale {}",
                    definition.name(),
                    locale
                );
                return None;
            }
            definition
                .pattern()
                .matches_segments(remainder)
                .map(|params| (definition, params))
        });

        match found {
            Some((definition, params)) => {
                tracing::debug!(
                    "Resolved {:?} to route {} (locale {})",
                    url,
                    definition.name(),
                    locale
                );
                MatchResult::Matched(RouteMatch {
                    definition,
                    params,
                    locale,
                    query,
                })
            }
            None => {
                tracing::debug!("No route for {:?} (locale {})", url, locale);
                MatchResult::NotFound
            }
        }
    }
}
