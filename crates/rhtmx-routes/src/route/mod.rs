/// Route pattern compilation, matching and generation
///
/// - `pattern`: classification of single segments
/// - `parser`: compilation of whole pattern strings
/// - [`RoutePattern`]: the compiled form, able to match paths and to
///   generate them back from parameters

pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use parser::compile;
pub use pattern::{classify_segment, PatternSegmentType};

use std::collections::HashSet;

use crate::path::{decode_segments, encode_segment, join_segments};
use crate::{GenerateError, ParameterConstraint, Params};

/// Compiled route pattern
///
/// Immutable once compiled. Matching is anchored to the whole path and walks
/// pattern and path segments left to right, backtracking over optional and
/// repeating captures.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::RoutePattern;
/// use std::collections::BTreeMap;
///
/// let pattern = RoutePattern::compile(r"/user/:id(\d+)").unwrap();
///
/// let params = pattern.matches("/user/42").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
/// assert!(pattern.matches("/user/abc").is_none());
///
/// let mut params = BTreeMap::new();
/// params.insert("id".to_string(), "7".to_string());
/// assert_eq!(pattern.generate(&params).unwrap(), "/user/7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    pub(crate) source: String,
    pub(crate) segments: Vec<PatternSegmentType>,
    pub(crate) params: Vec<String>,
    pub(crate) min_segments: usize,
    pub(crate) max_segments: Option<usize>,
}

impl RoutePattern {
    /// Compiles a pattern string, see [`parser::compile`]
    pub fn compile(source: &str) -> Result<Self, crate::PatternError> {
        parser::compile(source)
    }

    /// The pattern as it was written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PatternSegmentType] {
        &self.segments
    }

    /// Capture names in pattern order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Minimum and maximum number of path segments this pattern can consume
    /// (`None` = unbounded)
    pub fn arity(&self) -> (usize, Option<usize>) {
        (self.min_segments, self.max_segments)
    }

    /// Whether a path of `count` segments could possibly match
    pub fn admits(&self, count: usize) -> bool {
        count >= self.min_segments && self.max_segments.map_or(true, |max| count <= max)
    }

    /// First literal segment, if the pattern starts with one
    pub fn leading_literal(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PatternSegmentType::Static(literal)) => Some(literal.as_str()),
            _ => None,
        }
    }

    /// Matches a raw path (case-sensitive, anchored)
    ///
    /// Segments are percent-decoded first; a path that fails to decode does
    /// not match.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let segments = decode_segments(path)?;
        self.matches_segments(&segments)
    }

    /// Matches already split and decoded path segments
    pub fn matches_segments<S: AsRef<str>>(&self, segments: &[S]) -> Option<Params> {
        if !self.admits(segments.len()) {
            return None;
        }
        let segments: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
        SegmentMatcher::new(&self.segments, &segments).run()
    }

    /// Generates a concrete path from parameters
    ///
    /// Parameters the pattern does not use are ignored. Empty values count
    /// as absent.
    pub fn generate(&self, params: &Params) -> Result<String, GenerateError> {
        let mut out: Vec<String> = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            let (name, constraint) = match segment {
                PatternSegmentType::Static(literal) => {
                    out.push(literal.clone());
                    continue;
                }
                PatternSegmentType::CatchAll(name, c)
                | PatternSegmentType::OptionalCatchAll(name, c)
                | PatternSegmentType::Optional(name, c)
                | PatternSegmentType::Required(name, c) => (name, c.as_ref()),
            };

            let value = match params.get(name).filter(|v| !v.is_empty()) {
                Some(value) => value,
                None if segment.is_optional() => continue,
                None => {
                    return Err(GenerateError::MissingParam { name: name.clone() });
                }
            };

            if segment.is_repeat() {
                for part in value.split('/').filter(|p| !p.is_empty()) {
                    check_constraint(name, constraint, part)?;
                    out.push(encode_segment(part).into_owned());
                }
            } else {
                check_constraint(name, constraint, value)?;
                out.push(encode_segment(value).into_owned());
            }
        }

        Ok(join_segments(out.as_slice()))
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn accepts(constraint: Option<&ParameterConstraint>, value: &str) -> bool {
    constraint.map_or(true, |c| c.validate(value))
}

fn check_constraint(
    name: &str,
    constraint: Option<&ParameterConstraint>,
    value: &str,
) -> Result<(), GenerateError> {
    if accepts(constraint, value) {
        Ok(())
    } else {
        Err(GenerateError::Constraint {
            name: name.to_string(),
            value: value.to_string(),
            constraint: constraint.map(|c| c.to_string()).unwrap_or_default(),
        })
    }
}

/// A capture recorded on the current match attempt: `len` path segments from `start`
struct Capture<'p> {
    name: &'p str,
    start: usize,
    len: usize,
}

/// Backtracking segment matcher
///
/// Repeating captures are greedy and give segments back one at a time until
/// the rest of the pattern matches; optional captures try consuming first.
/// Whether the pattern tail from `p` matches the path tail from `s` does not
/// depend on earlier captures, so failed `(p, s)` states are remembered and
/// never retried.
struct SegmentMatcher<'p, 's> {
    pattern: &'p [PatternSegmentType],
    path: &'s [&'s str],
    failed: HashSet<(usize, usize)>,
}

impl<'p, 's> SegmentMatcher<'p, 's> {
    fn new(pattern: &'p [PatternSegmentType], path: &'s [&'s str]) -> Self {
        Self {
            pattern,
            path,
            failed: HashSet::new(),
        }
    }

    fn run(mut self) -> Option<Params> {
        let mut captures = Vec::new();
        if !self.step(0, 0, &mut captures) {
            return None;
        }

        let params = captures
            .into_iter()
            .map(|c| (c.name.to_string(), self.path[c.start..c.start + c.len].join("/")))
            .collect();
        Some(params)
    }

    fn step(&mut self, p: usize, s: usize, captures: &mut Vec<Capture<'p>>) -> bool {
        if self.failed.contains(&(p, s)) {
            return false;
        }
        let found = self.try_step(p, s, captures);
        if !found {
            self.failed.insert((p, s));
        }
        found
    }

    fn try_step(&mut self, p: usize, s: usize, captures: &mut Vec<Capture<'p>>) -> bool {
        let pattern: &'p [PatternSegmentType] = self.pattern;
        let Some(segment) = pattern.get(p) else {
            return s == self.path.len();
        };
        let head = self.path.get(s).copied();

        match segment {
            PatternSegmentType::Static(literal) => {
                head == Some(literal.as_str()) && self.step(p + 1, s + 1, captures)
            }
            PatternSegmentType::Required(name, constraint) => match head {
                Some(head) if accepts(constraint.as_ref(), head) => {
                    self.capture(name, p, s, 1, captures)
                }
                _ => false,
            },
            PatternSegmentType::Optional(name, constraint) => {
                let consumed = head.is_some_and(|head| accepts(constraint.as_ref(), head))
                    && self.capture(name, p, s, 1, captures);
                consumed || self.step(p + 1, s, captures)
            }
            PatternSegmentType::CatchAll(name, constraint)
            | PatternSegmentType::OptionalCatchAll(name, constraint) => {
                let min = if segment.is_optional() { 0 } else { 1 };
                let run = self.path[s..]
                    .iter()
                    .take_while(|segment| accepts(constraint.as_ref(), segment))
                    .count();

                (min..=run).rev().any(|n| {
                    if n == 0 {
                        self.step(p + 1, s, captures)
                    } else {
                        self.capture(name, p, s, n, captures)
                    }
                })
            }
        }
    }

    /// Records `len` segments from `start` for `name`, then matches the rest
    fn capture(
        &mut self,
        name: &'p str,
        p: usize,
        start: usize,
        len: usize,
        captures: &mut Vec<Capture<'p>>,
    ) -> bool {
        captures.push(Capture { name, start, len });
        if self.step(p + 1, start + len, captures) {
            return true;
        }
        captures.pop();
        false
    }
}
