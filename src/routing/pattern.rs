//! Pattern declarations and parsing.
//!
//! # Typed syntax
//! ```text
//! m/datasets/<int:dataset_id>/images/
//! load_plate/[<enum(plate,acquisition):o1_type>/][<int:o1_id>/]
//! v<version>/m/projects/
//! ```
//! - `<kind:name>` placeholder, kinds: `int`, `signed`, `alpha`, `str`,
//!   `enum(a,b,...)`, `digits(n)` and `digits(min,max)`
//! - `<version>` API version, values come from configuration
//! - `[ ... ]` optional group (no nesting)
//! - anything else is literal
//!
//! # Regex syntax
//! Full regular expressions with `(?P<name>...)` groups. Only the subset made
//! of literals, named groups and `(?:...)?` groups can be reversed. A named
//! group may hold any regex body (reverse checks values against it) but not
//! another named group.

use std::collections::HashSet;

use crate::routing::error::PatternError;

/// Parameter name under which the API version is captured.
pub const VERSION_PARAM: &str = "api_version";

/// Pattern source as declared on a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Typed(String),
    Regex(String),
}

impl Pattern {
    pub fn typed(source: impl Into<String>) -> Self {
        Pattern::Typed(source.into())
    }

    pub fn regex(source: impl Into<String>) -> Self {
        Pattern::Regex(source.into())
    }

    pub fn source(&self) -> &str {
        match self {
            Pattern::Typed(s) | Pattern::Regex(s) => s,
        }
    }
}

/// Closed set of placeholder types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Non-negative decimal integer.
    Int,
    /// Decimal integer with an optional leading minus.
    SignedInt,
    /// Non-negative integer written with `min..=max` digits.
    Digits { min: usize, max: usize },
    /// ASCII letters only.
    Alpha,
    /// Any non-empty run of characters except `/`.
    Str,
    /// One of a fixed set of literals.
    OneOf(Vec<String>),
    /// API version, restricted to the configured whitelist.
    Version(Vec<String>),
    /// Raw regex body from a regex pattern.
    Regex(String),
}

impl PlaceholderKind {
    /// Regex fragment accepting exactly this kind.
    pub fn regex_fragment(&self) -> String {
        match self {
            PlaceholderKind::Int => "[0-9]+".to_string(),
            PlaceholderKind::SignedInt => "-?[0-9]+".to_string(),
            PlaceholderKind::Digits { min, max } if min == max => format!("[0-9]{{{}}}", min),
            PlaceholderKind::Digits { min, max } => format!("[0-9]{{{},{}}}", min, max),
            PlaceholderKind::Alpha => "[a-zA-Z]+".to_string(),
            PlaceholderKind::Str => "[^/]+".to_string(),
            PlaceholderKind::OneOf(values) | PlaceholderKind::Version(values) => {
                let alternatives: Vec<String> = values.iter().map(|v| regex::escape(v)).collect();
                format!("(?:{})", alternatives.join("|"))
            }
            PlaceholderKind::Regex(body) => body.clone(),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PlaceholderKind::Int | PlaceholderKind::SignedInt | PlaceholderKind::Digits { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub kind: PlaceholderKind,
}

/// One element of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
    Optional(Vec<Segment>),
}

/// Parses the typed syntax.
pub fn parse_typed(source: &str, versions: &[String]) -> Result<Vec<Segment>, PatternError> {
    let mut top: Vec<Segment> = Vec::new();
    let mut group: Option<Vec<Segment>> = None;
    let mut literal = String::new();
    let mut seen = HashSet::new();
    let mut pos = 0;

    while let Some(c) = source[pos..].chars().next() {
        match c {
            '<' => {
                let rest = &source[pos + 1..];
                let end = rest
                    .find('>')
                    .ok_or(PatternError::UnterminatedPlaceholder(pos))?;
                let placeholder = parse_placeholder(&rest[..end], versions)?;
                if !seen.insert(placeholder.name.clone()) {
                    return Err(PatternError::DuplicatePlaceholder(placeholder.name));
                }
                flush_literal(&mut literal, target(&mut top, &mut group));
                target(&mut top, &mut group).push(Segment::Placeholder(placeholder));
                pos += end + 2;
                continue;
            }
            '[' => {
                if group.is_some() {
                    return Err(PatternError::NestedGroup(pos));
                }
                flush_literal(&mut literal, &mut top);
                group = Some(Vec::new());
            }
            ']' => {
                let mut inner = group.take().ok_or(PatternError::UnbalancedGroup(pos))?;
                flush_literal(&mut literal, &mut inner);
                top.push(Segment::Optional(inner));
            }
            _ => literal.push(c),
        }
        pos += c.len_utf8();
    }

    if group.is_some() {
        let start = source.rfind('[').unwrap_or(0);
        return Err(PatternError::UnterminatedGroup(start));
    }
    flush_literal(&mut literal, &mut top);
    Ok(top)
}

fn target<'a>(top: &'a mut Vec<Segment>, group: &'a mut Option<Vec<Segment>>) -> &'a mut Vec<Segment> {
    match group {
        Some(g) => g,
        None => top,
    }
}

fn flush_literal(literal: &mut String, into: &mut Vec<Segment>) {
    if !literal.is_empty() {
        into.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn parse_placeholder(body: &str, versions: &[String]) -> Result<Placeholder, PatternError> {
    if body == "version" {
        if versions.is_empty() {
            return Err(PatternError::NoVersions);
        }
        return Ok(Placeholder {
            name: VERSION_PARAM.to_string(),
            kind: PlaceholderKind::Version(versions.to_vec()),
        });
    }

    let (kind, name) = body
        .rsplit_once(':')
        .ok_or_else(|| PatternError::MissingKind(body.to_string()))?;

    if !is_identifier(name) {
        return Err(PatternError::InvalidName(name.to_string()));
    }

    let kind = match kind {
        "int" => PlaceholderKind::Int,
        "signed" => PlaceholderKind::SignedInt,
        "alpha" => PlaceholderKind::Alpha,
        "str" => PlaceholderKind::Str,
        other if other.starts_with("digits(") => parse_digits(other, name)?,
        other => match other.strip_prefix("enum(").and_then(|s| s.strip_suffix(')')) {
            Some(list) => {
                let values: Vec<String> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect();
                if values.is_empty() || values.iter().any(|v| v.contains('/')) {
                    return Err(PatternError::EmptyEnum(name.to_string()));
                }
                PlaceholderKind::OneOf(values)
            }
            None => return Err(PatternError::UnknownKind(other.to_string())),
        },
    };

    Ok(Placeholder {
        name: name.to_string(),
        kind,
    })
}

/// `digits(n)` or `digits(min,max)`.
fn parse_digits(kind: &str, name: &str) -> Result<PlaceholderKind, PatternError> {
    let invalid = || PatternError::InvalidDigits(name.to_string());
    let bounds = kind
        .strip_prefix("digits(")
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let (min, max) = match bounds.split_once(',') {
        Some((min, max)) => (min.trim(), max.trim()),
        None => (bounds.trim(), bounds.trim()),
    };
    let min: usize = min.parse().map_err(|_| invalid())?;
    let max: usize = max.parse().map_err(|_| invalid())?;
    // Widths past 18 digits could overflow i64.
    if min == 0 || min > max || max > 18 {
        return Err(invalid());
    }
    Ok(PlaceholderKind::Digits { min, max })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Renders parsed segments as an unanchored regex body.
pub fn segments_to_regex(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&regex::escape(text)),
            Segment::Placeholder(p) => {
                out.push_str(&format!("(?P<{}>{})", p.name, p.kind.regex_fragment()));
            }
            Segment::Optional(inner) => {
                out.push_str("(?:");
                out.push_str(&segments_to_regex(inner));
                out.push_str(")?");
            }
        }
    }
    out
}

/// Strips `^` and an unescaped trailing `$`.
pub fn strip_anchors(source: &str) -> &str {
    let source = source.strip_prefix('^').unwrap_or(source);
    match source.strip_suffix('$') {
        Some(stripped) if !stripped.ends_with('\\') => stripped,
        _ => source,
    }
}

/// Translates the reversible subset of a regex source into segments.
///
/// Returns `None` for anything outside that subset.
pub fn translate_regex(source: &str) -> Option<Vec<Segment>> {
    translate_body(strip_anchors(source))
}

fn translate_body(body: &str) -> Option<Vec<Segment>> {
    let bytes = body.as_bytes();
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while pos < body.len() {
        let c = body[pos..].chars().next()?;
        match c {
            '\\' => {
                let escaped = body[pos + 1..].chars().next()?;
                if escaped.is_ascii_alphanumeric() {
                    return None;
                }
                literal.push(escaped);
                pos += 1 + escaped.len_utf8();
                continue;
            }
            '(' => {
                let close = matching_paren(body, pos)?;
                let inner = &body[pos + 1..close];
                let quantifier = bytes.get(close + 1).copied();
                let optional = match quantifier {
                    Some(b'?') => true,
                    Some(b'*') | Some(b'+') | Some(b'{') => return None,
                    _ => false,
                };

                let translated = if let Some(named) = inner
                    .strip_prefix("?P<")
                    .or_else(|| inner.strip_prefix("?<"))
                {
                    let (name, group_body) = named.split_once('>')?;
                    if group_body.contains("(?P<") || group_body.contains("(?<") {
                        return None;
                    }
                    vec![Segment::Placeholder(Placeholder {
                        name: name.to_string(),
                        kind: PlaceholderKind::Regex(group_body.to_string()),
                    })]
                } else if let Some(group_body) = inner.strip_prefix("?:") {
                    translate_body(group_body)?
                } else {
                    return None;
                };

                flush_literal(&mut literal, &mut segments);
                if optional {
                    segments.push(Segment::Optional(translated));
                    pos = close + 2;
                } else {
                    segments.extend(translated);
                    pos = close + 1;
                }
                continue;
            }
            '.' | '*' | '+' | '?' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | ')' => return None,
            _ => literal.push(c),
        }
        pos += c.len_utf8();
    }

    flush_literal(&mut literal, &mut segments);
    Some(segments)
}

/// Byte offset of the `)` closing the `(` at `open`.
fn matching_paren(body: &str, open: usize) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut in_class = false;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'(' if !in_class => depth += 1,
            b')' if !in_class => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Flattens placeholders, including those inside optional groups.
pub fn placeholders(segments: &[Segment]) -> Vec<Placeholder> {
    let mut out = Vec::new();
    for segment in segments {
        match segment {
            Segment::Literal(_) => {}
            Segment::Placeholder(p) => out.push(p.clone()),
            Segment::Optional(inner) => out.extend(placeholders(inner)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> Vec<String> {
        vec!["0".to_string(), "1".to_string()]
    }

    #[test]
    fn test_parse_literal_and_placeholder() {
        let segments = parse_typed("m/datasets/<int:dataset_id>/images/", &versions()).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("m/datasets/".into()),
                Segment::Placeholder(Placeholder {
                    name: "dataset_id".into(),
                    kind: PlaceholderKind::Int,
                }),
                Segment::Literal("/images/".into()),
            ]
        );
    }

    #[test]
    fn test_parse_optional_groups_and_enum() {
        let segments = parse_typed(
            "load_plate/[<enum(plate, acquisition):o1_type>/][<int:o1_id>/]",
            &versions(),
        )
        .unwrap();
        assert_eq!(segments.len(), 3);
        match &segments[1] {
            Segment::Optional(inner) => assert_eq!(
                inner[0],
                Segment::Placeholder(Placeholder {
                    name: "o1_type".into(),
                    kind: PlaceholderKind::OneOf(vec!["plate".into(), "acquisition".into()]),
                })
            ),
            other => panic!("expected optional group, got {:?}", other),
        }
    }

    #[test]
    fn test_version_placeholder() {
        let segments = parse_typed("v<version>/m/projects/", &versions()).unwrap();
        assert_eq!(
            segments[1],
            Segment::Placeholder(Placeholder {
                name: VERSION_PARAM.into(),
                kind: PlaceholderKind::Version(versions()),
            })
        );
        assert_eq!(
            parse_typed("v<version>/", &[]),
            Err(PatternError::NoVersions)
        );
    }

    #[test]
    fn test_parse_errors() {
        let v = versions();
        assert_eq!(parse_typed("a/<int:id", &v), Err(PatternError::UnterminatedPlaceholder(2)));
        assert_eq!(parse_typed("a/[<int:id>/", &v), Err(PatternError::UnterminatedGroup(2)));
        assert_eq!(parse_typed("a/]", &v), Err(PatternError::UnbalancedGroup(2)));
        assert_eq!(parse_typed("[a/[b]]", &v), Err(PatternError::NestedGroup(3)));
        assert_eq!(parse_typed("<id>/", &v), Err(PatternError::MissingKind("id".into())));
        assert_eq!(parse_typed("<float:x>/", &v), Err(PatternError::UnknownKind("float".into())));
        assert_eq!(parse_typed("<int:1x>/", &v), Err(PatternError::InvalidName("1x".into())));
        assert_eq!(parse_typed("<enum():x>/", &v), Err(PatternError::EmptyEnum("x".into())));
        assert_eq!(parse_typed("<digits(3,1):x>/", &v), Err(PatternError::InvalidDigits("x".into())));
        assert_eq!(parse_typed("<digits(0):x>/", &v), Err(PatternError::InvalidDigits("x".into())));
        assert_eq!(parse_typed("<digits(a):x>/", &v), Err(PatternError::InvalidDigits("x".into())));
        assert_eq!(
            parse_typed("<int:id>/<str:id>/", &v),
            Err(PatternError::DuplicatePlaceholder("id".into()))
        );
    }

    #[test]
    fn test_digits_placeholder() {
        let segments = parse_typed("load_calendar/[<digits(4):year>/<digits(1,2):month>/]", &versions()).unwrap();
        assert_eq!(
            segments_to_regex(&segments),
            "load_calendar/(?:(?P<year>[0-9]{4})/(?P<month>[0-9]{1,2})/)?"
        );
        assert!(PlaceholderKind::Digits { min: 4, max: 4 }.is_integer());
    }

    #[test]
    fn test_regex_fragment_escapes_enum_values() {
        let kind = PlaceholderKind::OneOf(vec!["a.b".into(), "c".into()]);
        assert_eq!(kind.regex_fragment(), r"(?:a\.b|c)");
    }

    #[test]
    fn test_segments_to_regex() {
        let segments = parse_typed("render_thumbnail/<int:iid>/[<int:share_id>/]", &versions()).unwrap();
        assert_eq!(
            segments_to_regex(&segments),
            "render_thumbnail/(?P<iid>[0-9]+)/(?:(?P<share_id>[0-9]+)/)?"
        );
    }

    #[test]
    fn test_translate_reversible_regex() {
        let segments =
            translate_regex(r"^action/(?P<action>[a-zA-Z]+)/(?:(?P<o_type>[a-zA-Z]+)/)?$").unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], Segment::Literal("action/".into()));
        assert_eq!(segments[2], Segment::Literal("/".into()));
        assert!(matches!(segments[3], Segment::Optional(_)));

        let nested = translate_regex(r"^(?P<menu>(userdata|public))/$").unwrap();
        assert_eq!(
            nested[0],
            Segment::Placeholder(Placeholder {
                name: "menu".into(),
                kind: PlaceholderKind::Regex("(userdata|public)".into()),
            })
        );
    }

    #[test]
    fn test_translate_rejects_unnamed_groups_and_classes() {
        assert!(translate_regex(r"^load_calendar/(?:(\d{4})/(\d{1,2})/)?$").is_none());
        assert!(translate_regex(r"^a.b/$").is_none());
        assert!(translate_regex(r"^a/\d+/$").is_none());
    }

    #[test]
    fn test_translate_accepts_class_bodies_in_named_groups() {
        let segments =
            translate_regex(r"^load_calendar/(?:(?P<year>\d{4})/(?P<month>\d{1,2})/)?$").unwrap();
        match &segments[1] {
            Segment::Optional(inner) => assert_eq!(
                inner[0],
                Segment::Placeholder(Placeholder {
                    name: "year".into(),
                    kind: PlaceholderKind::Regex(r"\d{4}".into()),
                })
            ),
            other => panic!("expected optional group, got {:?}", other),
        }
    }

    #[test]
    fn test_translate_rejects_nested_named_groups() {
        assert!(translate_regex(r"^(?P<outer>a(?P<inner>[0-9]+))/$").is_none());
        assert!(translate_regex(r"^(?P<outer>a(?<inner>[0-9]+))/$").is_none());
    }

    #[test]
    fn test_strip_anchors_keeps_escaped_dollar() {
        assert_eq!(strip_anchors("^abc/$"), "abc/");
        assert_eq!(strip_anchors(r"abc\$"), r"abc\$");
    }
}
