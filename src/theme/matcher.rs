// src/theme/matcher.rs
//! Criterion evaluation against serialized entities.

use regex::Regex;
use serde_json::Value;

use crate::error::Result;

/// One way a declared criterion value can accept a candidate.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Candidate equals the declared value.
    Exact(Value),
    /// Declared string, as a regex, matches the stringified candidate.
    Pattern(Regex),
}

impl Matcher {
    /// Matchers for one declared value.
    ///
    /// Every scalar also acts as a pattern over its text form, so a declared
    /// `1` accepts `10` and a declared `"^src"` accepts `"src/a.ts"`.
    ///
    /// # Errors
    /// Returns error if a declared value is not a valid regex.
    pub fn for_value(declared: &Value) -> Result<Vec<Self>> {
        let mut matchers = vec![Self::Exact(declared.clone())];
        if matches!(declared, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
            matchers.push(Self::Pattern(Regex::new(&stringify(declared))?));
        }
        Ok(matchers)
    }

    #[must_use]
    pub fn matches(&self, candidate: &Value) -> bool {
        match self {
            Self::Exact(value) => value == candidate,
            Self::Pattern(re) => re.is_match(&stringify(candidate)),
        }
    }
}

/// Text form of a value: strings bare, everything else as JSON.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Scalar or list, as a list.
fn as_candidates(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        scalar => std::slice::from_ref(scalar),
    }
}

/// A field path such as `source`, `rules[0].severity` or `rules.0.severity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .replace('[', ".")
            .replace(']', "")
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Value at this path, if any. Array segments must be indices.
    #[must_use]
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

/// A field path plus every matcher its declared values produce.
#[derive(Debug, Clone)]
pub struct Criterion {
    pub path: FieldPath,
    matchers: Vec<Matcher>,
}

impl Criterion {
    /// Builds a criterion from a declared scalar or list.
    ///
    /// # Errors
    /// Returns error if a declared string is not a valid regex.
    pub fn new(path: &str, declared: &Value) -> Result<Self> {
        let mut matchers = Vec::new();
        for value in as_candidates(declared) {
            matchers.extend(Matcher::for_value(value)?);
        }
        Ok(Self {
            path: FieldPath::parse(path),
            matchers,
        })
    }

    /// True when the field exists and any of its values meets any matcher.
    #[must_use]
    pub fn is_satisfied(&self, entity: &Value) -> bool {
        let Some(value) = self.path.lookup(entity) else {
            return false;
        };
        if value.is_null() {
            return false;
        }
        as_candidates(value)
            .iter()
            .any(|candidate| self.matchers.iter().any(|m| m.matches(candidate)))
    }
}
