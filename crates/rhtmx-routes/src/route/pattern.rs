/// Segment classification for route patterns
///
/// Turns one `/`-separated piece of a pattern string such as `user`, `:id`,
/// `:id(\d+)?` or `:path*` into a typed segment.
/// All functions are **pure**: same input → same output, no side effects.

use crate::{ParameterConstraint, PatternError};

/// Represents different types of route pattern segments
///
/// Functional sum type for pattern matching route segments.
/// Each capture variant carries the parameter name and optional constraint.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::route::pattern::{classify_segment, PatternSegmentType};
///
/// // Static segment
/// let seg = classify_segment("/about", "about", 1).unwrap();
/// assert!(matches!(seg, PatternSegmentType::Static(_)));
///
/// // Required parameter
/// let seg = classify_segment("/:id", ":id", 1).unwrap();
/// assert!(matches!(seg, PatternSegmentType::Required(_, None)));
///
/// // Optional parameter with constraint
/// let seg = classify_segment(r"/:id(\d+)?", r":id(\d+)?", 1).unwrap();
/// assert!(matches!(seg, PatternSegmentType::Optional(_, Some(_))));
///
/// // One or more segments
/// let seg = classify_segment("/:path+", ":path+", 1).unwrap();
/// assert!(matches!(seg, PatternSegmentType::CatchAll(_, None)));
///
/// // Zero or more segments
/// let seg = classify_segment("/:path*", ":path*", 1).unwrap();
/// assert!(matches!(seg, PatternSegmentType::OptionalCatchAll(_, None)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegmentType {
    /// One or more segments: `:path+`
    CatchAll(String, Option<ParameterConstraint>),
    /// Zero or more segments: `:path*`
    OptionalCatchAll(String, Option<ParameterConstraint>),
    /// Zero or one segment: `:id?`
    Optional(String, Option<ParameterConstraint>),
    /// Exactly one segment: `:id` or `:id(\d+)`
    Required(String, Option<ParameterConstraint>),
    /// Static text segment
    Static(String),
}

impl PatternSegmentType {
    /// Parameter name, `None` for static segments
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::CatchAll(name, _)
            | Self::OptionalCatchAll(name, _)
            | Self::Optional(name, _)
            | Self::Required(name, _) => Some(name.as_str()),
            Self::Static(_) => None,
        }
    }

    pub fn constraint(&self) -> Option<&ParameterConstraint> {
        match self {
            Self::CatchAll(_, c)
            | Self::OptionalCatchAll(_, c)
            | Self::Optional(_, c)
            | Self::Required(_, c) => c.as_ref(),
            Self::Static(_) => None,
        }
    }

    /// Whether the segment may consume zero path segments
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(..) | Self::OptionalCatchAll(..))
    }

    /// Whether the segment may consume more than one path segment
    pub fn is_repeat(&self) -> bool {
        matches!(self, Self::CatchAll(..) | Self::OptionalCatchAll(..))
    }
}

/// Classifies a segment into a pattern type (pure function)
///
/// `pattern` is the whole pattern string and `offset` the byte offset of
/// `segment` inside it; both are only used to report errors.
///
/// # Parsing Rules
///
/// 1. **Capture**: `:name`, then an optional `(regex)`, then an optional
///    modifier `?`, `+` or `*`
/// 2. **Static**: any other text (parentheses are rejected)
pub fn classify_segment(
    pattern: &str,
    segment: &str,
    offset: usize,
) -> Result<PatternSegmentType, PatternError> {
    match segment.strip_prefix(':') {
        Some(body) => parse_capture(pattern, segment, body, offset + 1),
        None => {
            if let Some((delimiter, position)) = unbalanced_delimiter(segment) {
                return Err(PatternError::UnmatchedDelimiter {
                    pattern: pattern.to_string(),
                    delimiter,
                    position: offset + position,
                });
            }
            if let Some(delimiter) = segment.chars().find(|c| matches!(c, '(' | ')')) {
                return Err(PatternError::UnexpectedDelimiter {
                    pattern: pattern.to_string(),
                    segment: segment.to_string(),
                    delimiter,
                });
            }
            Ok(PatternSegmentType::Static(segment.to_string()))
        }
    }
}

/// Parses `name(constraint)modifier`, the part of a capture after the `:`
fn parse_capture(
    pattern: &str,
    segment: &str,
    body: &str,
    offset: usize,
) -> Result<PatternSegmentType, PatternError> {
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());

    if name_len == 0 {
        return Err(PatternError::MissingParamName {
            pattern: pattern.to_string(),
            segment: segment.to_string(),
        });
    }

    let name = &body[..name_len];
    let mut rest = &body[name_len..];

    let constraint = match rest.strip_prefix('(') {
        Some(group) => {
            let close = closing_paren(group).ok_or_else(|| PatternError::UnmatchedDelimiter {
                pattern: pattern.to_string(),
                delimiter: '(',
                position: offset + name_len,
            })?;
            let source = &group[..close];
            if source.is_empty() {
                return Err(PatternError::InvalidConstraint {
                    name: name.to_string(),
                    constraint: String::new(),
                    reason: "empty expression".to_string(),
                });
            }
            rest = &group[close + 1..];
            Some(ParameterConstraint::new(name, source)?)
        }
        None => None,
    };

    if let Some((delimiter, position)) = unbalanced_delimiter(rest) {
        return Err(PatternError::UnmatchedDelimiter {
            pattern: pattern.to_string(),
            delimiter,
            position: offset + (body.len() - rest.len()) + position,
        });
    }

    let name = name.to_string();
    match rest {
        "" => Ok(PatternSegmentType::Required(name, constraint)),
        "?" => Ok(PatternSegmentType::Optional(name, constraint)),
        "+" => Ok(PatternSegmentType::CatchAll(name, constraint)),
        "*" => Ok(PatternSegmentType::OptionalCatchAll(name, constraint)),
        modifier => Err(PatternError::InvalidModifier {
            pattern: pattern.to_string(),
            name,
            modifier: modifier.to_string(),
        }),
    }
}

/// Index of the `)` closing a group whose `(` was already consumed
///
/// Nested groups and backslash escapes are honoured.
fn closing_paren(group: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;

    for (i, c) in group.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }

    None
}

/// First parenthesis without a partner, with its byte position
fn unbalanced_delimiter(text: &str) -> Option<(char, usize)> {
    let mut open = Vec::new();

    for (i, c) in text.char_indices() {
        match c {
            '(' => open.push(i),
            ')' if open.pop().is_none() => return Some((')', i)),
            _ => {}
        }
    }

    open.first().map(|&i| ('(', i))
}
