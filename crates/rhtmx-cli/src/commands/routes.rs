use colored::Colorize;
use rhtmx_routes::RouteRegistry;

pub fn execute(registry: &RouteRegistry) {
    let locale = registry.locale_config();

    println!("{}", "Route table".green().bold());
    println!();
    println!(
        "Mount prefix: {}",
        if locale.prefix.is_empty() { "/" } else { locale.prefix.as_str() }.cyan()
    );
    println!("Default locale: {}", locale.default_locale.cyan());
    println!("Locales: {}", locale.locales.join(", ").cyan());
    println!();

    if registry.is_empty() {
        println!("{}", "⚠ No routes configured".yellow());
        return;
    }

    for line in table(registry) {
        println!("{}", line);
    }
}

/// One aligned line per route: name, pattern, page, exclusions
fn table(registry: &RouteRegistry) -> Vec<String> {
    let width = |f: fn(&rhtmx_routes::RouteDefinition) -> usize| {
        registry.routes().iter().map(f).max().unwrap_or(0)
    };
    let name_width = width(|r| r.name().len());
    let pattern_width = width(|r| r.pattern().as_str().len());
    let page_width = width(|r| r.page().len());

    registry
        .routes()
        .iter()
        .map(|route| {
            let excluded = if route.excluded_locales().is_empty() {
                String::new()
            } else {
                let list: Vec<&str> = route.excluded_locales().iter().map(String::as_str).collect();
                format!("  (not in {})", list.join(", "))
            };
            format!(
                "{:<name_width$}  {:<pattern_width$}  {:<page_width$}{}",
                route.name(),
                route.pattern().as_str(),
                route.page(),
                excluded
            )
            .trim_end()
            .to_string()
        })
        .collect()
}
