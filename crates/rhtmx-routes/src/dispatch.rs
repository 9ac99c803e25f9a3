use crate::path::split_url;
use crate::{MatchResult, Params, RouteDefinition, RouteRegistry};

/// What the page renderer receives for a resolved request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub method: &'a str,
    /// Request path without query or fragment, as received
    pub pathname: &'a str,
    /// Request query merged with path parameters and `locale`
    pub query: Params,
    /// Page template to render
    pub page: &'a str,
    pub route: &'a RouteDefinition,
}

/// Renders pages for resolved requests
///
/// Implemented by the web layer. The registry only decides which page and
/// which parameters; the handler does the rendering and owns not-found
/// responses.
pub trait RequestHandler {
    type Output;

    fn render(&self, request: PageRequest<'_>) -> Self::Output;

    fn not_found(&self, method: &str, url: &str) -> Self::Output;
}

impl RouteRegistry {
    /// Resolves `url` and hands the outcome to exactly one handler method
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::{LocaleConfig, PageRequest, RequestHandler, RouteRegistry};
    ///
    /// struct Pages;
    ///
    /// impl RequestHandler for Pages {
    ///     type Output = String;
    ///
    ///     fn render(&self, request: PageRequest<'_>) -> String {
    ///         format!("{} {:?}", request.page, request.query)
    ///     }
    ///
    ///     fn not_found(&self, _method: &str, url: &str) -> String {
    ///         format!("404 {}", url)
    ///     }
    /// }
    ///
    /// let mut registry = RouteRegistry::new(LocaleConfig::new(["en"], "zh-hk"));
    /// registry.add(("user", "/user/:id", "profile"))?;
    ///
    /// assert_eq!(
    ///     registry.dispatch("GET", "/en/user/42", &Pages),
    ///     r#"profile {"id": "42", "locale": "en"}"#
    /// );
    /// assert_eq!(registry.dispatch("GET", "/nope", &Pages), "404 /nope");
    /// # Ok::<(), rhtmx_routes::RouteError>(())
    /// ```
    pub fn dispatch<'a, H>(&'a self, method: &'a str, url: &'a str, handler: &H) -> H::Output
    where
        H: RequestHandler + ?Sized,
    {
        match self.resolve(url) {
            MatchResult::Matched(found) => {
                let (pathname, _) = split_url(url);
                tracing::debug!("{} {} -> page {}", method, pathname, found.page());
                handler.render(PageRequest {
                    method,
                    pathname,
                    query: found.render_query(),
                    page: found.page(),
                    route: found.definition,
                })
            }
            MatchResult::NotFound => {
                tracing::debug!("{} {} -> not found", method, url);
                handler.not_found(method, url)
            }
        }
    }
}
