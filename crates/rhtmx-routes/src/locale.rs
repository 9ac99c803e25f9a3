//! Locale policy: which locale prefixes are valid and how to read them
//!
//! The default locale never appears in a URL; every other configured locale
//! is the first path segment. An explicit default-locale segment is *not*
//! recognized and stays part of the path, so `/en/hello` with `en` as the
//! default does not resolve to `/hello`.

use serde::{Deserialize, Serialize};

use crate::path::normalize_prefix;
use crate::RouteDefinition;

/// Locale and mount configuration shared by every route of a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Mount path the whole route set lives under (e.g. "/app")
    #[serde(default)]
    pub prefix: String,

    /// Locales that may appear as the leading path segment
    #[serde(default)]
    pub locales: Vec<String>,

    /// Locale used when the path carries no locale segment
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            locales: Vec::new(),
            default_locale: default_locale(),
        }
    }
}

impl LocaleConfig {
    /// Creates a configuration without a mount prefix
    ///
    /// Duplicate locales are dropped, keeping the first occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::LocaleConfig;
    ///
    /// let config = LocaleConfig::new(["en", "fr"], "zh-hk").with_prefix("/app/");
    /// assert_eq!(config.mount_prefix(), "/app");
    /// assert!(config.is_configured("zh-hk"));
    /// assert!(config.is_configured("fr"));
    /// assert!(!config.is_configured("de"));
    /// ```
    pub fn new<I, S>(locales: I, default_locale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for locale in locales.into_iter().map(Into::into) {
            if !unique.contains(&locale) {
                unique.push(locale);
            }
        }

        Self {
            prefix: String::new(),
            locales: unique,
            default_locale: default_locale.into(),
        }
    }

    /// Sets the mount prefix (normalized)
    pub fn with_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.prefix = normalize_prefix(prefix.as_ref()).into_owned();
        self
    }

    /// Normalized mount prefix, `""` when the routes are mounted at the root
    pub fn mount_prefix(&self) -> String {
        normalize_prefix(&self.prefix).into_owned()
    }

    /// Whether `locale` is the default or one of the configured locales
    pub fn is_configured(&self, locale: &str) -> bool {
        locale == self.default_locale || self.locales.iter().any(|l| l == locale)
    }

    /// Whether a leading path segment is read as a locale token
    pub fn is_locale_segment(&self, segment: &str) -> bool {
        segment != self.default_locale && self.locales.iter().any(|l| l == segment)
    }

    /// Separates a leading locale segment from the rest of the path
    ///
    /// A first segment equal to a configured non-default locale is consumed;
    /// anything else (including the default locale) leaves the segments
    /// untouched and yields the default locale.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::LocaleConfig;
    ///
    /// let config = LocaleConfig::new(["en", "zh-hk"], "zh-hk");
    ///
    /// let (locale, rest) = config.split_locale(&["en", "hello"]);
    /// assert_eq!(locale, "en");
    /// assert_eq!(rest, ["hello"]);
    ///
    /// let (locale, rest) = config.split_locale(&["zh-hk", "hello"]);
    /// assert_eq!(locale, "zh-hk");
    /// assert_eq!(rest, ["zh-hk", "hello"]);
    /// ```
    pub fn split_locale<'s, S: AsRef<str>>(&self, segments: &'s [S]) -> (String, &'s [S]) {
        match segments.split_first() {
            Some((first, rest)) if self.is_locale_segment(first.as_ref()) => {
                (first.as_ref().to_string(), rest)
            }
            _ => (self.default_locale.clone(), segments),
        }
    }

    /// Path prefix for a locale under this configuration
    pub fn prefix_for(&self, locale: &str) -> String {
        prefix_for(locale, &self.default_locale)
    }
}

/// Whether a route may be served in `locale`
///
/// Exclusions make a route deliberately unavailable in some locales even
/// though they are configured globally.
pub fn is_locale_allowed(definition: &RouteDefinition, locale: &str) -> bool {
    !definition.excluded_locales().contains(locale)
}

/// `""` for the default locale, `/<locale>` otherwise
///
/// # Examples
///
/// ```
/// use rhtmx_routes::prefix_for;
///
/// assert_eq!(prefix_for("en", "en"), "");
/// assert_eq!(prefix_for("fr", "en"), "/fr");
/// ```
pub fn prefix_for(locale: &str, default_locale: &str) -> String {
    if locale == default_locale {
        String::new()
    } else {
        format!("/{}", locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteSpec;

    fn config() -> LocaleConfig {
        LocaleConfig::new(["en", "fr", "zh-hk"], "zh-hk")
    }

    #[test]
    fn test_default_config() {
        let config = LocaleConfig::default();
        assert_eq!(config.default_locale, "en");
        assert!(config.locales.is_empty());
        assert_eq!(config.mount_prefix(), "");
    }

    #[test]
    fn test_new_drops_duplicates() {
        let config = LocaleConfig::new(["en", "fr", "en"], "en");
        assert_eq!(config.locales, vec!["en".to_string(), "fr".to_string()]);
    }

    #[test]
    fn test_split_locale_non_default() {
        let segments = vec!["fr".to_string(), "about".to_string()];
        let (locale, rest) = config().split_locale(&segments);
        assert_eq!(locale, "fr");
        assert_eq!(rest, ["about".to_string()]);
    }

    #[test]
    fn test_split_locale_default_segment_is_not_consumed() {
        let segments = ["zh-hk", "hello"];
        let (locale, rest) = config().split_locale(&segments);
        assert_eq!(locale, "zh-hk");
        assert_eq!(rest, ["zh-hk", "hello"]);
    }

    #[test]
    fn test_split_locale_is_case_sensitive() {
        let segments = ["FR", "about"];
        let (locale, rest) = config().split_locale(&segments);
        assert_eq!(locale, "zh-hk");
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn test_split_locale_empty() {
        let segments: [&str; 0] = [];
        let (locale, rest) = config().split_locale(&segments);
        assert_eq!(locale, "zh-hk");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_default_locale_outside_list() {
        let config = LocaleConfig::new(["en", "fr"], "zh-hk");
        assert!(config.is_configured("zh-hk"));
        assert!(!config.is_locale_segment("zh-hk"));
        assert!(config.is_locale_segment("en"));
    }

    #[test]
    fn test_prefix_for() {
        let config = config();
        assert_eq!(config.prefix_for("zh-hk"), "");
        assert_eq!(config.prefix_for("en"), "/en");
    }

    #[test]
    fn test_is_locale_allowed() {
        let definition = RouteSpec::new("yeah")
            .exclude_locales(["en"])
            .into_definition()
            .unwrap();
        assert!(!is_locale_allowed(&definition, "en"));
        assert!(is_locale_allowed(&definition, "fr"));
        assert!(is_locale_allowed(&definition, "zh-hk"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: LocaleConfig = toml::from_str(r#"locales = ["fr"]"#).unwrap();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.prefix, "");
        assert_eq!(config.locales, vec!["fr".to_string()]);
    }
}
