/// Path utilities for splitting, decoding and joining URL paths
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

use crate::Params;

/// Normalizes a mount prefix to `""` or `/segment[/segment...]`
///
/// Returns `Cow::Borrowed` when the prefix is already canonical.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::path::normalize_prefix;
///
/// assert_eq!(normalize_prefix(""), "");
/// assert_eq!(normalize_prefix("/"), "");
/// assert_eq!(normalize_prefix("/app"), "/app");
/// assert_eq!(normalize_prefix("app/"), "/app");
/// assert_eq!(normalize_prefix("//app//v2/"), "/app/v2");
/// ```
pub fn normalize_prefix(prefix: &str) -> Cow<'_, str> {
    let canonical = prefix.is_empty()
        || (prefix.starts_with('/') && !prefix.ends_with('/') && !prefix.contains("//"));
    if canonical {
        return Cow::Borrowed(prefix);
    }

    let normalized = prefix
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Splits a request target into path and query, dropping any `#fragment`
pub fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Removes the mount prefix from a path
///
/// The prefix must end on a segment boundary: `/app` strips `/app` and
/// `/app/x` but not `/apple`. An empty prefix strips nothing.
pub fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }

    match path.strip_prefix(prefix)? {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// Splits a path into its raw, still-encoded segments, ignoring empty ones
///
/// Returns `None` when the path does not start with `/`.
pub fn split_segments(path: &str) -> Option<Vec<&str>> {
    if !path.starts_with('/') {
        return None;
    }
    Some(path.split('/').filter(|s| !s.is_empty()).collect())
}

/// Percent-decodes one segment; `None` unless the result is valid UTF-8
pub fn decode_segment(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(Cow::into_owned)
}

/// Splits a path into percent-decoded segments, ignoring empty ones
///
/// Returns `None` when the path does not start with `/` or a segment is not
/// valid percent-encoded UTF-8.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::path::decode_segments;
///
/// assert_eq!(decode_segments("/a//b/"), Some(vec!["a".to_string(), "b".to_string()]));
/// assert_eq!(decode_segments("/caf%C3%A9"), Some(vec!["café".to_string()]));
/// assert_eq!(decode_segments("/"), Some(vec![]));
/// assert_eq!(decode_segments(""), None);
/// assert_eq!(decode_segments("%FF"), None);
/// ```
pub fn decode_segments(path: &str) -> Option<Vec<String>> {
    split_segments(path)?
        .into_iter()
        .map(decode_segment)
        .collect()
}

/// Percent-encodes a single segment value
pub fn encode_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Joins already encoded segments into an absolute path (`/` when empty)
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }

    segments.iter().fold(String::new(), |mut acc, s| {
        acc.push('/');
        acc.push_str(s.as_ref());
        acc
    })
}

/// Concatenates absolute path pieces, collapsing a bare `/` tail
///
/// `join_paths(&["/app", "/en", "/"])` is `/app/en`; an all-empty input is `/`.
pub fn join_paths(parts: &[&str]) -> String {
    let joined: String = parts
        .iter()
        .map(|p| p.trim_end_matches('/'))
        .collect();

    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Parses a query string into a sorted map (`+` is a space, later keys win)
pub fn parse_query(query: &str) -> Params {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Serializes key/value pairs as `k=v&k2=v2`, percent-encoding both sides
pub fn encode_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends `?query` unless the query is empty
pub fn with_query(path: String, query: &str) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}
