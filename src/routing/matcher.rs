//! Path matching logic.
//!
//! # Responsibilities
//! - Compile a declared pattern (plus mount prefix) into an anchored regex
//! - Match a request path and convert captures to typed parameters
//! - Report type mismatches as "no match" so the scan continues
//!
//! # Design Decisions
//! - Both pattern syntaxes share one compiled form (anchored `regex::Regex`)
//! - Integer captures that overflow `i64` do not match
//! - String captures are percent-decoded; invalid UTF-8 does not match
//! - Absent optional captures are left out of the parameter map

use regex::Regex;

use crate::routing::error::PatternError;
use crate::routing::params::Params;
use crate::routing::pattern::{
    parse_typed, placeholders, segments_to_regex, strip_anchors, translate_regex, Pattern,
    Placeholder, PlaceholderKind, Segment,
};

/// Result of a successful path match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub params: Params,
    pub api_version: Option<String>,
}

/// A compiled, anchored pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    placeholders: Vec<Placeholder>,
    /// `None` when the pattern cannot be reversed.
    segments: Option<Vec<Segment>>,
}

impl PathMatcher {
    /// Compile `pattern` mounted under `prefix`.
    pub fn compile(prefix: &str, pattern: &Pattern, versions: &[String]) -> Result<Self, PatternError> {
        let (body, segments) = match pattern {
            Pattern::Typed(source) => {
                let segments = parse_typed(source, versions)?;
                (segments_to_regex(&segments), Some(segments))
            }
            Pattern::Regex(source) => (strip_anchors(source).to_string(), translate_regex(source)),
        };

        let regex = Regex::new(&format!("^{}(?:{})$", regex::escape(prefix), body))
            .map_err(|e| PatternError::Regex(e.to_string()))?;

        let placeholders = match (pattern, &segments) {
            (Pattern::Typed(_), Some(segments)) => placeholders(segments),
            _ => regex
                .capture_names()
                .flatten()
                .map(|name| Placeholder {
                    name: name.to_string(),
                    kind: PlaceholderKind::Regex(String::new()),
                })
                .collect(),
        };

        let segments = segments.map(|mut segments| {
            if !prefix.is_empty() {
                segments.insert(0, Segment::Literal(prefix.to_string()));
            }
            segments
        });

        Ok(Self {
            regex,
            placeholders,
            segments,
        })
    }

    /// Match a full request path.
    pub fn match_path(&self, path: &str) -> Option<PathMatch> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();
        let mut api_version = None;

        for placeholder in &self.placeholders {
            let Some(capture) = captures.name(&placeholder.name) else {
                continue;
            };
            let raw = capture.as_str();
            match &placeholder.kind {
                PlaceholderKind::Version(_) => api_version = Some(raw.to_string()),
                kind if kind.is_integer() => {
                    params.insert(placeholder.name.clone(), raw.parse::<i64>().ok()?);
                }
                _ => {
                    let decoded = urlencoding::decode(raw).ok()?;
                    params.insert(placeholder.name.clone(), decoded.into_owned());
                }
            }
        }

        Some(PathMatch {
            params,
            api_version,
        })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.match_path(path).is_some()
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders.iter().any(|p| p.name == name)
    }

    pub fn segments(&self) -> Option<&[Segment]> {
        self.segments.as_deref()
    }

    /// The only path this pattern accepts, if it has no variable parts.
    pub fn literal_path(&self) -> Option<String> {
        let segments = self.segments.as_ref()?;
        let mut path = String::new();
        for segment in segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                _ => return None,
            }
        }
        Some(path)
    }

    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(prefix: &str, source: &str) -> PathMatcher {
        PathMatcher::compile(prefix, &Pattern::typed(source), &["0".to_string(), "2".to_string()]).unwrap()
    }

    #[test]
    fn test_int_placeholder() {
        let matcher = typed("/", "m/datasets/<int:dataset_id>/images/");

        let m = matcher.match_path("/m/datasets/42/images/").unwrap();
        assert_eq!(m.params.get_int("dataset_id"), Some(42));

        assert!(matcher.match_path("/m/datasets/-1/images/").is_none());
        assert!(matcher.match_path("/m/datasets/abc/images/").is_none());
        assert!(matcher.match_path("/m/datasets/42/images").is_none());
        // Overflows i64.
        assert!(matcher.match_path("/m/datasets/99999999999999999999/images/").is_none());
    }

    #[test]
    fn test_signed_placeholder() {
        let matcher = typed("/", "api/experimenters/<signed:experimenter_id>/");
        let m = matcher.match_path("/api/experimenters/-1/").unwrap();
        assert_eq!(m.params.get_int("experimenter_id"), Some(-1));
        assert!(matcher.match_path("/api/experimenters/--1/").is_none());
    }

    #[test]
    fn test_optional_segments_are_absent() {
        let matcher = typed("/", "render_thumbnail/size/<int:w>/<int:iid>/[<int:share_id>/]");

        let m = matcher.match_path("/render_thumbnail/size/96/501/").unwrap();
        assert_eq!(m.params.get_int("w"), Some(96));
        assert_eq!(m.params.get_int("iid"), Some(501));
        assert!(!m.params.contains("share_id"));

        let m = matcher.match_path("/render_thumbnail/size/96/501/3/").unwrap();
        assert_eq!(m.params.get_int("share_id"), Some(3));
    }

    #[test]
    fn test_version_is_reported_separately() {
        let matcher = typed("/", "v<version>/m/projects/");
        let m = matcher.match_path("/v2/m/projects/").unwrap();
        assert_eq!(m.api_version.as_deref(), Some("2"));
        assert!(m.params.is_empty());
        assert!(matcher.match_path("/v17/m/projects/").is_none());
        assert!(matcher.match_path("/v1/m/projects/").is_none());
    }

    #[test]
    fn test_enum_and_alpha() {
        let matcher = typed("/", "load_chgrp_target/<int:group_id>/<enum(project,dataset,screen):target_type>/");
        assert!(matcher.match_path("/load_chgrp_target/3/dataset/").is_some());
        assert!(matcher.match_path("/load_chgrp_target/3/plate/").is_none());

        let matcher = typed("/", "action/<alpha:action>/");
        assert!(matcher.match_path("/action/addnewcontainer/").is_some());
        assert!(matcher.match_path("/action/add2/").is_none());
    }

    #[test]
    fn test_str_is_percent_decoded() {
        let matcher = typed("/", "render_image/<str:iid>/");
        let m = matcher.match_path("/render_image/a%20b/").unwrap();
        assert_eq!(m.params.get_str("iid"), Some("a b"));
        assert!(matcher.match_path("/render_image/a/b/").is_none());
    }

    #[test]
    fn test_prefix_is_literal() {
        let matcher = typed("/api/", "v<version>/m/projects/");
        assert!(matcher.match_path("/api/v0/m/projects/").is_some());
        assert!(matcher.match_path("/v0/m/projects/").is_none());
    }

    #[test]
    fn test_regex_pattern() {
        let matcher = PathMatcher::compile(
            "/",
            &Pattern::regex(r"^load_calendar/(?:(?P<year>\d{4})/(?P<month>\d{1,2})/)?$"),
            &[],
        )
        .unwrap();

        let m = matcher.match_path("/load_calendar/2016/05/").unwrap();
        assert_eq!(m.params.get_str("year"), Some("2016"));
        assert_eq!(m.params.get_str("month"), Some("05"));

        let m = matcher.match_path("/load_calendar/").unwrap();
        assert!(m.params.is_empty());

        // Named groups reverse even with class bodies.
        assert!(matcher.segments().is_some());
        assert!(matcher.has_placeholder("month"));
    }

    #[test]
    fn test_nested_named_group_is_not_reversible() {
        let matcher = PathMatcher::compile("/", &Pattern::regex(r"^(?P<outer>a(?P<inner>[0-9]+))/$"), &[]).unwrap();
        let m = matcher.match_path("/a12/").unwrap();
        assert_eq!(m.params.get_str("inner"), Some("12"));
        assert!(matcher.segments().is_none());
    }

    #[test]
    fn test_literal_path() {
        assert_eq!(typed("/webclient/", "chgrp/").literal_path().as_deref(), Some("/webclient/chgrp/"));
        assert_eq!(typed("/", "avatar/<int:oid>/").literal_path(), None);
        assert_eq!(typed("/", "activities_update/[clean/]").literal_path(), None);
    }

    #[test]
    fn test_bad_regex() {
        let err = PathMatcher::compile("/", &Pattern::regex("(unclosed"), &[]).unwrap_err();
        assert!(matches!(err, PatternError::Regex(_)));
    }
}
