// src/report/mod.rs
//! The loaded analyzer report.
//!
//! A [`Report`] is read once and never mutated; every pipeline stage derives a
//! fresh module list from it.

pub mod types;

pub use types::{merge_rules, sort_by_severity, Dependency, Module, Rule, Severity};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{CruiseError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub modules: Vec<Module>,
    /// Analyzer summary, carried through untouched.
    #[serde(default)]
    pub summary: Value,
}

impl Report {
    #[must_use]
    pub fn new(modules: Vec<Module>) -> Self {
        Self {
            modules,
            summary: Value::Null,
        }
    }

    /// Parses a report from JSON text.
    ///
    /// # Errors
    /// Returns error if the text is not a dependency-cruiser report.
    pub fn from_json(text: &str) -> Result<Self> {
        let report: Report = serde_json::from_str(text)?;
        debug!(modules = report.modules.len(), "parsed report");
        Ok(report)
    }

    /// Reads and parses a report file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CruiseError::io(e, path))?;
        Self::from_json(&text)
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Total number of dependency edges across all modules.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        count_dependencies(&self.modules)
    }
}

#[must_use]
pub fn count_dependencies(modules: &[Module]) -> usize {
    modules.iter().map(|m| m.dependencies.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "modules": [
            {
                "source": "src/App.tsx",
                "dependencies": [
                    {
                        "resolved": "src/components/index.ts",
                        "dynamic": false,
                        "dependencyTypes": ["local", "import"],
                        "valid": true,
                        "circular": false
                    }
                ],
                "rules": [{ "name": "no-orphans", "severity": "warn" }],
                "valid": false,
                "orphan": false
            },
            { "source": "src/components/index.ts", "dependencies": [], "valid": true, "orphan": true }
        ],
        "summary": { "violations": [], "totalCruised": 2 }
    }"#;

    #[test]
    fn parses_modules_and_keeps_unknown_fields() {
        let report = Report::from_json(SAMPLE).unwrap();
        assert_eq!(report.modules.len(), 2);
        assert_eq!(report.dependency_count(), 1);

        let app = &report.modules[0];
        assert!(!app.valid);
        assert!(!app.consolidated);
        assert_eq!(app.rules.as_ref().unwrap()[0].severity, Severity::Warn);

        let dep = &app.dependencies[0];
        assert_eq!(dep.dependency_types, vec!["local", "import"]);
        assert_eq!(dep.extra.get("circular"), Some(&Value::Bool(false)));
        assert!(report.modules[1].orphan);
        assert_eq!(report.summary["totalCruised"], 2);
    }

    #[test]
    fn rejects_non_report_json() {
        assert!(matches!(
            Report::from_json(r#"{"files": []}"#),
            Err(CruiseError::Json(_))
        ));
    }

    #[test]
    fn severity_sort_is_stable_and_most_severe_first() {
        let mut rules = vec![
            Rule::new("a", Severity::Info),
            Rule::new("b", Severity::Error),
            Rule::new("c", Severity::Ignore),
            Rule::new("d", Severity::Warn),
            Rule::new("e", Severity::Error),
        ];
        sort_by_severity(&mut rules);
        let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "e", "d", "a", "c"]);
    }

    #[test]
    fn merge_rules_keeps_absence() {
        assert_eq!(merge_rules(None, None), None);
        let merged = merge_rules(None, Some(&vec![Rule::new("x", Severity::Info)]));
        assert_eq!(merged.map(|r| r.len()), Some(1));
    }
}
