// File: src/config.rs
// Purpose: Route table and locale settings from routes.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{LocaleConfig, RouteRegistry, RouteSpec};

/// Route table configuration
///
/// ```toml
/// [locale]
/// prefix = "/app"
/// locales = ["en", "fr"]
/// default_locale = "zh-hk"
///
/// [[routes]]
/// name = "user"
/// pattern = "/user/:id"
/// page = "profile"
/// exclude_locales = ["fr"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutesConfig {
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Routes in precedence order
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl RoutesConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file: nothing configured
        if !path.exists() {
            tracing::debug!("No route config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read route config: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: RoutesConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse route config: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./routes.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("routes.toml")
    }

    /// Builds the registry, stopping at the first route that fails to register
    pub fn into_registry(self) -> Result<RouteRegistry> {
        let locale = LocaleConfig::new(self.locale.locales, self.locale.default_locale)
            .with_prefix(&self.locale.prefix);

        let mut registry = RouteRegistry::new(locale);
        for (index, spec) in self.routes.into_iter().enumerate() {
            let name = spec.name.clone();
            registry
                .add(spec)
                .with_context(|| format!("Failed to register route #{} ({:?})", index + 1, name))?;
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [locale]
        prefix = "/app/"
        locales = ["en", "fr", "en"]
        default_locale = "zh-hk"

        [[routes]]
        name = "hello"

        [[routes]]
        name = "user"
        pattern = "/user/:id"
        page = "profile"
        exclude_locales = ["fr"]
    "#;

    #[test]
    fn test_default_config() {
        let config = RoutesConfig::default();
        assert_eq!(config.locale.default_locale, "en");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<RoutesConfig>("").unwrap_or_default();
        assert_eq!(config.locale, LocaleConfig::default());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_routes() {
        let config: RoutesConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0], RouteSpec::new("hello"));
        assert_eq!(
            config.routes[1],
            RouteSpec::new("user")
                .pattern("/user/:id")
                .page("profile")
                .exclude_locales(["fr"])
        );
    }

    #[test]
    fn test_into_registry_normalizes_locale() {
        let config: RoutesConfig = toml::from_str(SAMPLE).unwrap();
        let registry = config.into_registry().unwrap();

        let locale = registry.locale_config();
        assert_eq!(locale.prefix, "/app");
        assert_eq!(locale.locales, vec!["en".to_string(), "fr".to_string()]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.resolve("/app/en/user/1").is_not_found());
        assert!(registry.resolve("/app/fr/user/1").is_not_found());
    }

    #[test]
    fn test_into_registry_reports_route() {
        let config: RoutesConfig = toml::from_str(
            r#"
            [[routes]]
            name = "a"

            [[routes]]
            name = "a"
            "#,
        )
        .unwrap();

        let err = config.into_registry().unwrap_err();
        assert!(err.to_string().contains("#2"));
        assert!(err.chain().any(|cause| cause.to_string().contains("already registered")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoutesConfig::load(dir.path().join("routes.toml")).unwrap();
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = RoutesConfig::load(file.path()).unwrap();
        assert_eq!(config.locale.default_locale, "zh-hk");
        assert_eq!(config.routes[1].page.as_deref(), Some("profile"));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[routes]]\npattern = 3\n").unwrap();

        let err = RoutesConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse route config"));
    }
}
