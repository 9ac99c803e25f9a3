use anyhow::{Context, Result};
use colored::Colorize;
use rhtmx_routes::{Params, RouteRegistry, Urls};
use serde_json::{json, Value};

pub fn execute(
    registry: &RouteRegistry,
    name_or_path: &str,
    locale: &str,
    params: Vec<(String, String)>,
    as_json: bool,
) -> Result<()> {
    let params: Params = params.into_iter().collect();
    let urls = registry
        .urls_for(name_or_path, &params, locale)
        .with_context(|| format!("Cannot build a URL for `{}` in locale `{}`", name_or_path, locale))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&to_json(&urls))?);
        return Ok(());
    }

    match urls.route.as_deref() {
        Some(route) => println!("Route: {}", route.cyan()),
        None => println!("{}", "⚠ No route matches this path".yellow()),
    }
    println!("Internal: {}", urls.internal_path.green());
    println!("External: {}", urls.external_path.green());
    if let Some(page) = &urls.page_href {
        println!("Page: {}", page.cyan());
    }

    Ok(())
}

fn to_json(urls: &Urls) -> Value {
    json!({
        "route": urls.route,
        "internal_path": urls.internal_path,
        "external_path": urls.external_path,
        "page_href": urls.page_href,
    })
}
