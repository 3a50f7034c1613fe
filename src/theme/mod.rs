// src/theme/mod.rs
//! Rule-based visual attributes for modules and dependencies.
//!
//! A theme is an ordered list of [`CriteriaTheme`]s. Every theme whose criteria
//! all hold contributes its attributes; earlier themes take precedence, so an
//! attribute key is only ever set by the first matching theme that names it.

pub mod matcher;

pub use matcher::{Criterion, FieldPath, Matcher};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::report::{Dependency, Module};

/// Attribute name to rendered value.
pub type Attributes = BTreeMap<String, String>;

const BUILTIN_THEME: &str = include_str!("builtin.toml");

/// Declared form of a criteria theme, as read from config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriteriaThemeSpec {
    #[serde(default)]
    pub criteria: BTreeMap<String, Value>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

/// A compiled criteria theme.
#[derive(Debug, Clone)]
pub struct CriteriaTheme {
    criteria: Vec<Criterion>,
    attributes: Attributes,
}

impl CriteriaTheme {
    /// Compiles declared criteria into matchers.
    ///
    /// # Errors
    /// Returns error if a criterion value is an invalid pattern.
    pub fn compile(spec: &CriteriaThemeSpec) -> Result<Self> {
        let criteria = spec
            .criteria
            .iter()
            .map(|(path, declared)| Criterion::new(path, declared))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            criteria,
            attributes: render_attributes(&spec.attributes),
        })
    }

    /// Convenience constructor from JSON-like criteria and string attributes.
    ///
    /// # Errors
    /// Returns error if a criterion value is an invalid pattern.
    pub fn new(criteria: &[(&str, Value)], attributes: &[(&str, &str)]) -> Result<Self> {
        let spec = CriteriaThemeSpec {
            criteria: criteria
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
                .collect(),
        };
        Self::compile(&spec)
    }

    #[must_use]
    pub fn matches(&self, entity: &Value) -> bool {
        self.criteria.iter().all(|c| c.is_satisfied(entity))
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Folds every matching theme into one attribute map, first theme winning.
#[must_use]
pub fn attributes_for<T: Serialize>(entity: &T, themes: &[CriteriaTheme]) -> Attributes {
    let value = serde_json::to_value(entity).unwrap_or(Value::Null);
    attributes_for_value(&value, themes)
}

/// [`attributes_for`] over an already serialized entity.
#[must_use]
pub fn attributes_for_value(entity: &Value, themes: &[CriteriaTheme]) -> Attributes {
    let mut resolved = Attributes::new();
    for theme in themes.iter().filter(|t| t.matches(entity)) {
        for (key, value) in &theme.attributes {
            resolved
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    resolved
}

fn render_attributes(raw: &BTreeMap<String, Value>) -> Attributes {
    raw.iter()
        .map(|(k, v)| (k.clone(), matcher::stringify(v)))
        .collect()
}

/// Declared theme: general graph/node/edge attributes plus criteria themes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeSpec {
    /// Replace the built-in theme instead of layering on top of it.
    #[serde(default)]
    pub replace: bool,
    #[serde(default)]
    pub graph: BTreeMap<String, Value>,
    #[serde(default)]
    pub node: BTreeMap<String, Value>,
    #[serde(default)]
    pub edge: BTreeMap<String, Value>,
    #[serde(default)]
    pub modules: Vec<CriteriaThemeSpec>,
    #[serde(default)]
    pub dependencies: Vec<CriteriaThemeSpec>,
}

/// Everything the DOT emitter needs to style a graph.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub graph: Attributes,
    pub node: Attributes,
    pub edge: Attributes,
    pub modules: Vec<CriteriaTheme>,
    pub dependencies: Vec<CriteriaTheme>,
}

impl Theme {
    /// The stock theme shipped with the crate.
    ///
    /// # Errors
    /// Returns error if the embedded theme fails to parse.
    pub fn builtin() -> Result<Self> {
        let spec: ThemeSpec = toml::from_str(BUILTIN_THEME)?;
        Self::from_spec(&spec)
    }

    /// Compiles a declared theme on its own.
    ///
    /// # Errors
    /// Returns error if a criterion value is an invalid pattern.
    pub fn from_spec(spec: &ThemeSpec) -> Result<Self> {
        Ok(Self {
            graph: render_attributes(&spec.graph),
            node: render_attributes(&spec.node),
            edge: render_attributes(&spec.edge),
            modules: compile_all(&spec.modules)?,
            dependencies: compile_all(&spec.dependencies)?,
        })
    }

    /// Layers a user theme over this one.
    ///
    /// User criteria themes take priority over existing ones and user
    /// graph/node/edge attributes replace existing keys.
    ///
    /// # Errors
    /// Returns error if a criterion value is an invalid pattern.
    pub fn with_overrides(self, spec: &ThemeSpec) -> Result<Self> {
        let user = Self::from_spec(spec)?;
        if spec.replace {
            return Ok(user);
        }

        let mut modules = user.modules;
        modules.extend(self.modules);
        let mut dependencies = user.dependencies;
        dependencies.extend(self.dependencies);

        Ok(Self {
            graph: overlay(self.graph, user.graph),
            node: overlay(self.node, user.node),
            edge: overlay(self.edge, user.edge),
            modules,
            dependencies,
        })
    }

    #[must_use]
    pub fn module_attributes(&self, module: &Module) -> Attributes {
        attributes_for(module, &self.modules)
    }

    #[must_use]
    pub fn dependency_attributes(&self, dependency: &Dependency) -> Attributes {
        attributes_for(dependency, &self.dependencies)
    }
}

fn compile_all(specs: &[CriteriaThemeSpec]) -> Result<Vec<CriteriaTheme>> {
    specs.iter().map(CriteriaTheme::compile).collect()
}

fn overlay(mut base: Attributes, top: Attributes) -> Attributes {
    base.extend(top);
    base
}
