/// Pattern compilation for route definitions
///
/// Turns a pattern string like `/user/:id(\d+)` into a [`RoutePattern`].
/// Compilation is a single fallible fold over the `/`-separated segments.

use super::pattern::{classify_segment, PatternSegmentType};
use super::RoutePattern;
use crate::PatternError;

/// Internal state accumulator for fold-based parsing
///
/// All mutations are local to the fold accumulator; each builder method
/// consumes and returns `Self`.
#[derive(Default)]
struct ParseState {
    segments: Vec<PatternSegmentType>,
    params: Vec<String>,
    min_segments: usize,
    unbounded: bool,
}

impl ParseState {
    /// Adds a classified segment, rejecting repeated capture names
    fn with_segment(mut self, pattern: &str, segment: PatternSegmentType) -> Result<Self, PatternError> {
        if let Some(name) = segment.param_name() {
            if self.params.iter().any(|p| p == name) {
                return Err(PatternError::DuplicateParam {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
            self.params.push(name.to_string());
        }

        if !segment.is_optional() {
            self.min_segments += 1;
        }
        if segment.is_repeat() {
            self.unbounded = true;
        }

        self.segments.push(segment);
        Ok(self)
    }

    fn finalize(self, source: &str) -> RoutePattern {
        let max_segments = if self.unbounded {
            None
        } else {
            Some(self.segments.len())
        };

        RoutePattern {
            source: source.to_string(),
            segments: self.segments,
            params: self.params,
            min_segments: self.min_segments,
            max_segments,
        }
    }
}

/// Compiles a pattern string (pure function)
///
/// A missing leading `/` is tolerated and empty segments are ignored, so
/// `user/:id`, `/user/:id` and `/user//:id/` compile to the same pattern.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::route::parser::compile;
///
/// let pattern = compile("/user/:id").unwrap();
/// assert_eq!(pattern.params(), ["id".to_string()]);
///
/// assert!(compile("/user/:id/:id").is_err());
/// assert!(compile(r"/user/:id(\d+").is_err());
/// ```
pub fn compile(source: &str) -> Result<RoutePattern, PatternError> {
    let mut offset = 0;
    let mut pieces = Vec::new();
    for piece in source.split('/') {
        pieces.push((offset, piece));
        offset += piece.len() + 1;
    }

    pieces
        .into_iter()
        .filter(|(_, piece)| !piece.is_empty())
        .try_fold(ParseState::default(), |state, (offset, piece)| {
            let segment = classify_segment(source, piece, offset)?;
            state.with_segment(source, segment)
        })
        .map(|state| state.finalize(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_root() {
        let pattern = compile("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert_eq!(pattern.arity(), (0, Some(0)));
    }

    #[test]
    fn test_compile_static() {
        let pattern = compile("/about/team").unwrap();
        assert_eq!(
            pattern.segments(),
            [
                PatternSegmentType::Static("about".to_string()),
                PatternSegmentType::Static("team".to_string()),
            ]
        );
        assert!(pattern.params().is_empty());
        assert_eq!(pattern.arity(), (2, Some(2)));
    }

    #[test]
    fn test_compile_dynamic() {
        let pattern = compile("/user/:id").unwrap();
        assert_eq!(pattern.params(), ["id".to_string()]);
        assert_eq!(pattern.as_str(), "/user/:id");
    }

    #[test]
    fn test_compile_without_leading_slash() {
        let a = compile("user/:id").unwrap();
        let b = compile("/user//:id/").unwrap();
        assert_eq!(a.segments(), b.segments());
    }

    #[test]
    fn test_compile_arity() {
        assert_eq!(compile("/posts/:id?").unwrap().arity(), (1, Some(2)));
        assert_eq!(compile("/docs/:path+").unwrap().arity(), (2, None));
        assert_eq!(compile("/docs/:path*").unwrap().arity(), (1, None));
    }

    #[test]
    fn test_compile_duplicate_param() {
        let err = compile("/a/:id/b/:id?").unwrap_err();
        assert_eq!(
            err,
            PatternError::DuplicateParam {
                pattern: "/a/:id/b/:id?".to_string(),
                name: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_error_position_accounts_for_offset() {
        let err = compile("/shop/items)").unwrap_err();
        assert_eq!(
            err,
            PatternError::UnmatchedDelimiter {
                pattern: "/shop/items)".to_string(),
                delimiter: ')',
                position: 11,
            }
        );
    }

    #[test]
    fn test_compile_invalid_regex() {
        assert!(matches!(
            compile("/user/:id([0-9)"),
            Err(PatternError::InvalidConstraint { .. })
        ));
    }
}
