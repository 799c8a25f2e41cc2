//! Reverse lookup: route name + parameters → concrete path.
//!
//! Link generation goes through here so that generated links and route
//! matching are driven by the same compiled pattern.

use regex::Regex;

use crate::routing::error::ReverseError;
use crate::routing::params::{ParamValue, Params};
use crate::routing::pattern::{placeholders, Placeholder, PlaceholderKind, Segment, VERSION_PARAM};
use crate::routing::table::{Route, RouteTable};

impl RouteTable {
    /// Produce the path for `name`.
    ///
    /// `api_version` may be passed for versioned routes; when omitted the
    /// newest configured version is used. Optional groups are emitted only
    /// when every placeholder inside them is supplied.
    pub fn reverse(&self, name: &str, params: &Params) -> Result<String, ReverseError> {
        let route = self
            .route(name)
            .ok_or_else(|| ReverseError::UnknownName(name.to_string()))?;

        let segments = route
            .matcher()
            .segments()
            .ok_or_else(|| ReverseError::NotReversible(name.to_string()))?;

        if let Some(unexpected) = params.keys().find(|key| !route.matcher().has_placeholder(key)) {
            return Err(ReverseError::UnexpectedParam {
                name: name.to_string(),
                param: unexpected.to_string(),
            });
        }

        let writer = PathWriter {
            route,
            params,
            default_version: self.newest_version(),
        };
        let mut path = String::new();
        writer.write(segments, &mut path)?;

        if !route.matcher().is_match(&path) {
            return Err(ReverseError::InvalidParam {
                name: name.to_string(),
                param: "*".to_string(),
                value: path,
            });
        }
        Ok(path)
    }
}

struct PathWriter<'a> {
    route: &'a Route,
    params: &'a Params,
    default_version: Option<&'a str>,
}

impl PathWriter<'_> {
    fn write(&self, segments: &[Segment], out: &mut String) -> Result<(), ReverseError> {
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(placeholder) => {
                    let value = self
                        .value_for(placeholder)
                        .ok_or_else(|| self.missing(&placeholder.name))?;
                    out.push_str(&self.render(placeholder, &value)?);
                }
                Segment::Optional(inner) => {
                    let inner_placeholders = placeholders(inner);
                    let missing: Vec<&Placeholder> = inner_placeholders
                        .iter()
                        .filter(|p| self.value_for(p).is_none())
                        .collect();
                    if missing.len() == inner_placeholders.len() {
                        continue;
                    }
                    if let Some(first) = missing.first() {
                        return Err(self.missing(&first.name));
                    }
                    self.write(inner, out)?;
                }
            }
        }
        Ok(())
    }

    fn value_for(&self, placeholder: &Placeholder) -> Option<ParamValue> {
        match self.params.get(&placeholder.name) {
            Some(value) => Some(value.clone()),
            None if placeholder.name == VERSION_PARAM => {
                self.default_version.map(ParamValue::from)
            }
            None => None,
        }
    }

    fn render(&self, placeholder: &Placeholder, value: &ParamValue) -> Result<String, ReverseError> {
        let text = value.to_string();
        let valid = match (&placeholder.kind, value) {
            (_, ParamValue::Bool(_)) => false,
            (PlaceholderKind::Int, ParamValue::Int(v)) => *v >= 0,
            (PlaceholderKind::Int, ParamValue::Str(s)) => s.parse::<u64>().is_ok() && !s.starts_with('+'),
            (PlaceholderKind::SignedInt, ParamValue::Int(_)) => true,
            (PlaceholderKind::SignedInt, ParamValue::Str(s)) => s.parse::<i64>().is_ok() && !s.starts_with('+'),
            (PlaceholderKind::Digits { min, max }, ParamValue::Int(_) | ParamValue::Str(_)) => {
                (*min..=*max).contains(&text.len()) && text.chars().all(|c| c.is_ascii_digit())
            }
            (PlaceholderKind::Alpha, _) => !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic()),
            (PlaceholderKind::Str, _) => !text.is_empty(),
            (PlaceholderKind::OneOf(values), _) | (PlaceholderKind::Version(values), _) => {
                values.contains(&text)
            }
            (PlaceholderKind::Regex(body), _) => Regex::new(&format!("^(?:{})$", body))
                .map(|re| re.is_match(&text))
                .unwrap_or(false),
        };

        if !valid {
            return Err(ReverseError::InvalidParam {
                name: self.route.name().to_string(),
                param: placeholder.name.clone(),
                value: text,
            });
        }

        Ok(match &placeholder.kind {
            PlaceholderKind::Str | PlaceholderKind::Regex(_) => urlencoding::encode(&text).into_owned(),
            _ => text,
        })
    }

    fn missing(&self, param: &str) -> ReverseError {
        ReverseError::MissingParam {
            name: self.route.name().to_string(),
            param: param.to_string(),
        }
    }
}
