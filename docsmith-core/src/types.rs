//! Shared rendering data model — parameters, templates, and the action
//! capability.
//!
//! [`Template`] and [`Parameter`] are produced by the assembly engine in
//! docsmith-renderer and consumed by downstream rendering stages.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConstructionError;

// ---------------------------------------------------------------------------
// Parameter
// ---------------------------------------------------------------------------

/// An immutable key/value configuration entry.
///
/// Equality is structural: two parameters are equal when both key and value
/// are equal. Values are opaque to the assembly engine: scalars and
/// structured values are carried verbatim. Parameters have value semantics;
/// the same logical parameter may be cloned into multiple owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    key: String,
    value: Value,
}

impl Parameter {
    /// Create a parameter. `key` must be non-empty; validated at the
    /// configuration boundary.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        debug_assert!(!key.is_empty(), "parameter key must be non-empty");
        Self { key, value: value.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Keyed mapping of effective parameters, ordered by key.
pub type ParameterSet = BTreeMap<String, Parameter>;

// ---------------------------------------------------------------------------
// Action capability
// ---------------------------------------------------------------------------

/// The capability a type must satisfy to be usable as a rendering action.
///
/// An action is constructed once with its merged parameter set and owned by
/// the [`Template`] that contains it. What an action subsequently does with
/// its parameters is up to the rendering stage; the assembly engine only
/// guarantees which parameters it receives: the union of template-level and
/// action-level parameters, action-level winning on key collision.
pub trait Action: fmt::Debug + Send + Sync {
    /// The merged effective parameter set this instance was constructed with.
    fn parameters(&self) -> &ParameterSet;
}

/// Construction entry point for an action type.
///
/// Held by the renderer's action registry. Returns the constructed instance
/// or a [`ConstructionError`] describing why the type produced none.
pub type ConstructFn = fn(ParameterSet) -> Result<Box<dyn Action>, ConstructionError>;

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A named, ordered composition of parameters and actions.
///
/// Constructed exactly once from a validated configuration; immutable
/// afterwards. Action order matches configuration order.
#[derive(Debug)]
pub struct Template {
    name: String,
    parameters: Vec<Parameter>,
    actions: Vec<Box<dyn Action>>,
}

impl Template {
    /// Assemble a template. `name` must be non-empty and `parameters` keys
    /// unique; both are validated at the configuration boundary.
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        actions: Vec<Box<dyn Action>>,
    ) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "template name must be non-empty");
        Self { name, parameters, actions }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template-level parameters in configuration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Actions in configuration order.
    pub fn actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct Recorded {
        parameters: ParameterSet,
    }

    impl Action for Recorded {
        fn parameters(&self) -> &ParameterSet {
            &self.parameters
        }
    }

    #[test]
    fn parameter_equality_is_structural() {
        assert_eq!(Parameter::new("k", "v"), Parameter::new("k", "v"));
        assert_ne!(Parameter::new("k", "v"), Parameter::new("k", "w"));
        assert_ne!(Parameter::new("k", "v"), Parameter::new("j", "v"));
    }

    #[test]
    fn parameter_carries_structured_values() {
        let p = Parameter::new("exclude", json!(["drafts", "internal"]));
        assert_eq!(p.key(), "exclude");
        assert_eq!(p.value(), &json!(["drafts", "internal"]));
    }

    #[test]
    fn parameter_serde_roundtrip() {
        let p = Parameter::new("theme", "dark");
        let text = serde_json::to_string(&p).expect("serialize");
        let back: Parameter = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(p, back);
    }

    #[test]
    fn template_preserves_parameter_order() {
        let parameters = vec![Parameter::new("b", json!(1)), Parameter::new("a", json!(2))];
        let actions: Vec<Box<dyn Action>> = vec![Box::new(Recorded {
            parameters: ParameterSet::new(),
        })];
        let template = Template::new("manual", parameters.clone(), actions);
        assert_eq!(template.name(), "manual");
        assert_eq!(template.parameters(), parameters.as_slice());
        assert_eq!(template.actions().len(), 1);
    }

    #[test]
    fn construction_error_reason_is_displayed() {
        let err = ConstructionError::new("no instance");
        assert_eq!(err.to_string(), "no instance");
        assert_eq!(err.reason(), "no instance");
    }
}
