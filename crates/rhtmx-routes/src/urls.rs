use crate::locale::is_locale_allowed;
use crate::path::{encode_query, join_paths, with_query};
use crate::{MatchResult, Params, RouteDefinition, RouteError, RouteRegistry};

/// The two paths produced for one navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urls {
    /// Mount prefix + locale-free path + page-selection query: every
    /// parameter plus `locale`. Resolves to the same route and locale.
    pub internal_path: String,
    /// What the address bar shows: mount prefix + locale prefix + path
    pub external_path: String,
    /// Page-selection form `/<page>?<params>&locale=<locale>` for the renderer;
    /// `None` when a literal path matched no route
    pub page_href: Option<String>,
    /// Name of the target route, if one was found
    pub route: Option<String>,
}

// ============================================================================
// URL Generation
// ============================================================================

impl RouteRegistry {
    /// Builds internal and external paths for a route name or a literal path
    ///
    /// A registered name is generated from its pattern. Anything else that
    /// starts with `/` is a literal path: it is matched to find its page and
    /// is used unchanged as the external path. Any other string is an unknown
    /// route.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::{LocaleConfig, RouteRegistry};
    /// use std::collections::BTreeMap;
    ///
    /// let mut registry = RouteRegistry::new(LocaleConfig::new(["en"], "zh-hk"));
    /// registry.add(("user", "/user/:id", "profile"))?;
    ///
    /// let mut params = BTreeMap::new();
    /// params.insert("id".to_string(), "42".to_string());
    /// params.insert("tab".to_string(), "posts".to_string());
    ///
    /// let urls = registry.urls_for("user", &params, "en")?;
    /// assert_eq!(urls.internal_path, "/user/42?id=42&locale=en&tab=posts");
    /// assert_eq!(urls.external_path, "/en/user/42");
    /// assert_eq!(urls.page_href.as_deref(), Some("/profile?id=42&locale=en&tab=posts"));
    /// # Ok::<(), rhtmx_routes::RouteError>(())
    /// ```
    pub fn urls_for(
        &self,
        name_or_path: &str,
        params: &Params,
        locale: &str,
    ) -> Result<Urls, RouteError> {
        if self.find_by_name(name_or_path).is_some() {
            return self.urls_for_route(name_or_path, params, locale);
        }
        if name_or_path.starts_with('/') {
            return Ok(self.urls_for_path(name_or_path));
        }
        Err(RouteError::UnknownRoute(name_or_path.to_string()))
    }

    /// [`urls_for`](Self::urls_for) with parameters given as pairs
    pub fn urls_for_params(
        &self,
        name_or_path: &str,
        params: &[(&str, &str)],
        locale: &str,
    ) -> Result<Urls, RouteError> {
        let params: Params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.urls_for(name_or_path, &params, locale)
    }

    /// Builds the paths for a registered route, never falling back to a literal
    pub fn urls_for_route(
        &self,
        name: &str,
        params: &Params,
        locale: &str,
    ) -> Result<Urls, RouteError> {
        let definition = self
            .find_by_name(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let config = self.locale_config();
        if !config.is_configured(locale) {
            return Err(RouteError::UnknownLocale(locale.to_string()));
        }
        if !is_locale_allowed(definition, locale) {
            return Err(RouteError::LocaleExcluded {
                route: name.to_string(),
                locale: locale.to_string(),
            });
        }

        let raw = definition.pattern().generate(params)?;
        let mount = config.mount_prefix();
        let locale_prefix = config.prefix_for(locale);

        let urls = Urls {
            internal_path: with_query(
                join_paths(&[mount.as_str(), raw.as_str()]),
                &page_query(params, locale),
            ),
            external_path: join_paths(&[mount.as_str(), locale_prefix.as_str(), raw.as_str()]),
            page_href: Some(page_href(definition, params, locale)),
            route: Some(definition.name().to_string()),
        };

        tracing::debug!(
            "Generated {} / {} for route {} (locale {})",
            urls.internal_path,
            urls.external_path,
            name,
            locale
        );
        Ok(urls)
    }

    /// Literal path: external is the input verbatim, internal is the
    /// locale-free path of the route it resolves to, with the literal's
    /// query, its parameters and its locale
    fn urls_for_path(&self, url: &str) -> Urls {
        let found = match self.resolve(url) {
            MatchResult::Matched(found) => found,
            MatchResult::NotFound => {
                tracing::debug!("Literal path {:?} matches no route", url);
                return Urls {
                    internal_path: url.to_string(),
                    external_path: url.to_string(),
                    page_href: None,
                    route: None,
                };
            }
        };

        let mount = self.locale_config().mount_prefix();
        let query = encode_query(&found.render_query());
        let internal_path = match found.definition.pattern().generate(&found.params) {
            Ok(raw) => with_query(join_paths(&[mount.as_str(), raw.as_str()]), &query),
            // a decoded `/` inside a repeated capture can break its constraint
            Err(_) => url.to_string(),
        };

        let mut href_params = found.query.clone();
        href_params.extend(found.params.iter().map(|(k, v)| (k.clone(), v.clone())));

        Urls {
            internal_path,
            external_path: url.to_string(),
            page_href: Some(page_href(found.definition, &href_params, &found.locale)),
            route: Some(found.name().to_string()),
        }
    }
}

/// `/<page>?<params>&locale=<locale>`, keys in sorted order
fn page_href(definition: &RouteDefinition, params: &Params, locale: &str) -> String {
    let page = format!("/{}", definition.page().trim_start_matches('/'));
    with_query(page, &page_query(params, locale))
}

/// `<params>&locale=<locale>`, keys in sorted order; `locale` wins over a parameter of that name
fn page_query(params: &Params, locale: &str) -> String {
    let mut query = params.clone();
    query.insert("locale".to_string(), locale.to_string());
    encode_query(&query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocaleConfig, RouteSpec};
    use pretty_assertions::assert_eq;

    fn registry() -> RouteRegistry {
        let mut registry =
            RouteRegistry::new(LocaleConfig::new(["en", "fr"], "zh-hk").with_prefix("/app"));
        registry
            .add(("home", "/", "index"))
            .unwrap()
            .add(("user", r"/user/:id(\d+)", "profile"))
            .unwrap()
            .add(RouteSpec::new("yeah").exclude_locales(["en"]))
            .unwrap();
        registry
    }

    #[test]
    fn test_urls_default_locale_has_no_prefix() {
        let urls = registry()
            .urls_for_params("user", &[("id", "7")], "zh-hk")
            .unwrap();
        assert_eq!(urls.internal_path, "/app/user/7?id=7&locale=zh-hk");
        assert_eq!(urls.external_path, "/app/user/7");
        assert_eq!(urls.route.as_deref(), Some("user"));
    }

    #[test]
    fn test_urls_root_route() {
        let registry = registry();
        let urls = registry.urls_for("home", &Params::new(), "fr").unwrap();
        assert_eq!(urls.internal_path, "/app?locale=fr");
        assert_eq!(urls.external_path, "/app/fr");
        assert_eq!(urls.page_href.as_deref(), Some("/index?locale=fr"));
    }

    #[test]
    fn test_urls_unknown_locale() {
        assert_eq!(
            registry().urls_for("home", &Params::new(), "de"),
            Err(RouteError::UnknownLocale("de".to_string()))
        );
    }

    #[test]
    fn test_urls_excluded_locale() {
        assert_eq!(
            registry().urls_for("yeah", &Params::new(), "en"),
            Err(RouteError::LocaleExcluded {
                route: "yeah".to_string(),
                locale: "en".to_string(),
            })
        );
        assert!(registry().urls_for("yeah", &Params::new(), "fr").is_ok());
    }

    #[test]
    fn test_urls_surface_generation_errors() {
        let registry = registry();
        assert!(matches!(
            registry.urls_for("user", &Params::new(), "en"),
            Err(RouteError::Generate(crate::GenerateError::MissingParam { .. }))
        ));
        assert!(matches!(
            registry.urls_for_params("user", &[("id", "abc")], "en"),
            Err(RouteError::Generate(crate::GenerateError::Constraint { .. }))
        ));
    }

    #[test]
    fn test_urls_unknown_name() {
        assert_eq!(
            registry().urls_for("nope", &Params::new(), "en"),
            Err(RouteError::UnknownRoute("nope".to_string()))
        );
        assert_eq!(
            registry().urls_for_route("/user/1", &Params::new(), "en"),
            Err(RouteError::UnknownRoute("/user/1".to_string()))
        );
    }

    #[test]
    fn test_literal_path_resolves_page() {
        let urls = registry()
            .urls_for("/app/fr/user/9?ref=mail", &Params::new(), "zh-hk")
            .unwrap();
        assert_eq!(urls.external_path, "/app/fr/user/9?ref=mail");
        assert_eq!(urls.internal_path, "/app/user/9?id=9&locale=fr&ref=mail");
        assert_eq!(
            urls.page_href.as_deref(),
            Some("/profile?id=9&locale=fr&ref=mail")
        );
        assert_eq!(urls.route.as_deref(), Some("user"));
    }

    #[test]
    fn test_internal_path_resolves_in_requested_locale() {
        let mut registry = registry();
        registry
            .add(("members", "/members", "members", ["zh-hk"]))
            .unwrap();

        let urls = registry
            .urls_for_params("user", &[("id", "42"), ("tab", "posts")], "en")
            .unwrap();
        assert_eq!(urls.internal_path, "/app/user/42?id=42&locale=en&tab=posts");
        let found = registry.resolve(&urls.internal_path).into_match().unwrap();
        assert_eq!(found.name(), "user");
        assert_eq!(found.locale, "en");
        assert_eq!(found.render_query().get("tab").map(String::as_str), Some("posts"));

        let urls = registry.urls_for("members", &Params::new(), "fr").unwrap();
        assert_eq!(urls.internal_path, "/app/members?locale=fr");
        assert!(registry.resolve("/app/members").is_not_found());
        assert_eq!(registry.resolve(&urls.internal_path).into_match().unwrap().name(), "members");
    }

    #[test]
    fn test_locale_param_is_overridden() {
        let urls = registry()
            .urls_for_params("user", &[("id", "1"), ("locale", "xx")], "fr")
            .unwrap();
        assert_eq!(urls.internal_path, "/app/user/1?id=1&locale=fr");
    }

    #[test]
    fn test_literal_path_without_route() {
        let urls = registry()
            .urls_for("/somewhere/else", &Params::new(), "en")
            .unwrap();
        assert_eq!(
            urls,
            Urls {
                internal_path: "/somewhere/else".to_string(),
                external_path: "/somewhere/else".to_string(),
                page_href: None,
                route: None,
            }
        );
    }
}
