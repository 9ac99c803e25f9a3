use anyhow::Result;
use colored::Colorize;
use rhtmx_routes::{MatchResult, RouteMatch, RouteRegistry};
use serde_json::{json, Value};

/// Prints the route `url` resolves to; `Ok(false)` when nothing matches
pub fn execute(registry: &RouteRegistry, url: &str, as_json: bool) -> Result<bool> {
    let result = registry.resolve(url);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&to_json(url, &result))?);
        return Ok(!result.is_not_found());
    }

    match result {
        MatchResult::Matched(found) => {
            println!("{}", "Matched".green().bold());
            println!();
            println!("Route: {}", found.name().cyan());
            println!("Pattern: {}", found.definition.pattern().as_str().cyan());
            println!("Page: {}", found.page().cyan());
            println!("Locale: {}", found.locale.cyan());
            for (key, value) in found.render_query() {
                println!("  {} = {}", key, value);
            }
            Ok(true)
        }
        MatchResult::NotFound => {
            println!("{} {}", "✗ not found:".red().bold(), url);
            Ok(false)
        }
    }
}

fn to_json(url: &str, result: &MatchResult<'_>) -> Value {
    match result.as_match() {
        Some(found) => matched_json(url, found),
        None => json!({ "url": url, "found": false }),
    }
}

fn matched_json(url: &str, found: &RouteMatch<'_>) -> Value {
    json!({
        "url": url,
        "found": true,
        "route": found.name(),
        "pattern": found.definition.pattern().as_str(),
        "page": found.page(),
        "locale": found.locale,
        "params": found.params,
        "query": found.render_query(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rhtmx_routes::LocaleConfig;

    fn registry() -> RouteRegistry {
        let mut registry = RouteRegistry::new(LocaleConfig::new(["en"], "zh-hk"));
        registry.add(("user", "/user/:id", "profile")).unwrap();
        registry
    }

    #[test]
    fn test_json_for_match() {
        let registry = registry();
        let value = to_json("/en/user/42?tab=a", &registry.resolve("/en/user/42?tab=a"));
        assert_eq!(
            value,
            json!({
                "url": "/en/user/42?tab=a",
                "found": true,
                "route": "user",
                "pattern": "/user/:id",
                "page": "profile",
                "locale": "en",
                "params": { "id": "42" },
                "query": { "id": "42", "locale": "en", "tab": "a" },
            })
        );
    }

    #[test]
    fn test_json_for_not_found() {
        let registry = registry();
        let value = to_json("/zh-hk/user/1", &registry.resolve("/zh-hk/user/1"));
        assert_eq!(value, json!({ "url": "/zh-hk/user/1", "found": false }));
    }

    #[test]
    fn test_execute_reports_outcome() {
        let registry = registry();
        assert!(execute(&registry, "/user/1", true).unwrap());
        assert!(!execute(&registry, "/nope", false).unwrap());
    }
}
