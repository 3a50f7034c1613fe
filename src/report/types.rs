// src/report/types.rs
//! Data model of a dependency-cruiser report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity of a rule violation, declared most severe first.
///
/// The derived ordering sorts `Error` before `Ignore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
    Info,
    Ignore,
}

impl Severity {
    /// All severities in display order.
    pub const ALL: [Severity; 4] = [Self::Error, Self::Warn, Self::Info, Self::Ignore];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Ignore => "ignore",
        }
    }
}

/// A rule attached to a module or dependency by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub severity: Severity,
}

impl Rule {
    #[must_use]
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
        }
    }
}

/// Stable sort, most severe first. Rules of equal severity keep their order.
pub fn sort_by_severity(rules: &mut [Rule]) {
    rules.sort_by_key(|rule| rule.severity);
}

/// Concatenates two optional rule lists and sorts the result by severity.
///
/// Absent on both sides stays absent.
#[must_use]
pub fn merge_rules(base: Option<Vec<Rule>>, other: Option<&Vec<Rule>>) -> Option<Vec<Rule>> {
    match (base, other) {
        (None, None) => None,
        (base, other) => {
            let mut rules = base.unwrap_or_default();
            rules.extend(other.into_iter().flatten().cloned());
            sort_by_severity(&mut rules);
            Some(rules)
        }
    }
}

const fn default_true() -> bool {
    true
}

/// A directed reference from one module to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub resolved: String,
    #[serde(default)]
    pub dependency_types: Vec<String>,
    #[serde(default)]
    pub dynamic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
    #[serde(default = "default_true")]
    pub valid: bool,
    /// Analyzer fields this crate does not interpret (`circular`, `coreModule`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dependency {
    #[must_use]
    pub fn new(resolved: impl Into<String>) -> Self {
        Self {
            resolved: resolved.into(),
            dependency_types: Vec::new(),
            dynamic: false,
            rules: None,
            valid: true,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.dependency_types = types.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule);
        self
    }

    #[must_use]
    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    #[must_use]
    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    /// The most severe rule, given rules are kept sorted.
    #[must_use]
    pub fn first_rule(&self) -> Option<&Rule> {
        self.rules.as_ref().and_then(|rules| rules.first())
    }
}

/// One source file and its outgoing dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub source: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
    #[serde(default = "default_true")]
    pub valid: bool,
    #[serde(default)]
    pub consolidated: bool,
    #[serde(default)]
    pub orphan: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Module {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dependencies: Vec::new(),
            rules: None,
            valid: true,
            consolidated: false,
            orphan: false,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Shorthand for a plain dependency on `resolved`.
    #[must_use]
    pub fn depends_on(self, resolved: &str) -> Self {
        self.with_dependency(Dependency::new(resolved))
    }

    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule);
        self
    }

    #[must_use]
    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    #[must_use]
    pub fn consolidated(mut self, consolidated: bool) -> Self {
        self.consolidated = consolidated;
        self
    }

    #[must_use]
    pub fn orphan(mut self, orphan: bool) -> Self {
        self.orphan = orphan;
        self
    }
}
