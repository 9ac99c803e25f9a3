use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{RouteError, RoutePattern};

/// Registration input for a route
///
/// The one shape every construction style is normalized to: a bare name,
/// `(name, pattern)`, `(name, pattern, page)`, the builder methods below, or
/// a `[[routes]]` table in the configuration file. Omitted fields default to
/// pattern `/<name>` and page `<name>`.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::RouteSpec;
///
/// let spec = RouteSpec::new("user")
///     .pattern("/user/:id")
///     .page("profile")
///     .exclude_locales(["fr"]);
///
/// let same: RouteSpec = ("user", "/user/:id", "profile").into();
/// assert_eq!(spec.name, same.name);
/// assert_eq!(spec.page, same.page);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub name: String,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default, alias = "excluded_locales")]
    pub exclude_locales: Vec<String>,
}

impl RouteSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Locales in which this route must not resolve or generate
    pub fn exclude_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_locales.extend(locales.into_iter().map(Into::into));
        self
    }

    /// Validates the name and compiles the pattern
    pub fn into_definition(self) -> Result<RouteDefinition, RouteError> {
        if self.name.is_empty() {
            return Err(RouteError::EmptyName);
        }

        let source = self
            .pattern
            .unwrap_or_else(|| format!("/{}", self.name));
        let pattern = RoutePattern::compile(&source).map_err(|source| RouteError::Pattern {
            name: self.name.clone(),
            source,
        })?;
        let page = self.page.unwrap_or_else(|| self.name.clone());

        Ok(RouteDefinition {
            name: self.name,
            pattern,
            page,
            excluded_locales: self.exclude_locales.into_iter().collect(),
        })
    }
}

impl From<&str> for RouteSpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RouteSpec {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, &str)> for RouteSpec {
    fn from((name, pattern): (&str, &str)) -> Self {
        Self::new(name).pattern(pattern)
    }
}

impl From<(&str, &str, &str)> for RouteSpec {
    fn from((name, pattern, page): (&str, &str, &str)) -> Self {
        Self::new(name).pattern(pattern).page(page)
    }
}

impl<const N: usize> From<(&str, &str, &str, [&str; N])> for RouteSpec {
    fn from((name, pattern, page, excluded): (&str, &str, &str, [&str; N])) -> Self {
        Self::new(name)
            .pattern(pattern)
            .page(page)
            .exclude_locales(excluded)
    }
}

/// A registered route: name, compiled pattern, target page and exclusions
///
/// Created by the registry and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    name: String,
    pattern: RoutePattern,
    page: String,
    excluded_locales: BTreeSet<String>,
}

impl RouteDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Page template the route renders
    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn excluded_locales(&self) -> &BTreeSet<String> {
        &self.excluded_locales
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_name() {
        let definition = RouteSpec::from("about").into_definition().unwrap();
        assert_eq!(definition.name(), "about");
        assert_eq!(definition.pattern().as_str(), "/about");
        assert_eq!(definition.page(), "about");
        assert!(definition.excluded_locales().is_empty());
    }

    #[test]
    fn test_positional_forms() {
        let definition = RouteSpec::from(("user", "/user/:id", "profile"))
            .into_definition()
            .unwrap();
        assert_eq!(definition.pattern().params(), ["id".to_string()]);
        assert_eq!(definition.page(), "profile");

        let definition = RouteSpec::from(("yeah", "/yeah", "yeah", ["en"]))
            .into_definition()
            .unwrap();
        assert!(definition.excluded_locales().contains("en"));

        let definition = RouteSpec::from(("blog", "/blog/:slug"))
            .into_definition()
            .unwrap();
        assert_eq!(definition.page(), "blog");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            RouteSpec::new("").into_definition(),
            Err(RouteError::EmptyName)
        );
    }

    #[test]
    fn test_bad_pattern_names_the_route() {
        let err = RouteSpec::new("broken")
            .pattern("/x/:id(")
            .into_definition()
            .unwrap_err();
        assert!(matches!(err, RouteError::Pattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_deserialize_spec() {
        let spec: RouteSpec = toml::from_str(
            r#"
            name = "user"
            pattern = "/user/:id"
            excluded_locales = ["fr"]
            "#,
        )
        .unwrap();
        assert_eq!(spec.pattern.as_deref(), Some("/user/:id"));
        assert_eq!(spec.page, None);
        assert_eq!(spec.exclude_locales, vec!["fr".to_string()]);
    }
}
