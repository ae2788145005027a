//! Parameter-scope merging — template-level base plus action-level overrides.

use docsmith_core::{Parameter, ParameterSet};
use serde_json::Value;

use crate::error::TemplateError;

/// Parse one `{key, value}` configuration entry into a [`Parameter`].
///
/// A `null` field counts as absent. `context` names the entry in error
/// messages.
pub(crate) fn parse_parameter(entry: &Value, context: &str) -> Result<Parameter, TemplateError> {
    let map = entry
        .as_object()
        .ok_or_else(|| TemplateError::invalid(format!("{context} must be a mapping")))?;

    let key = match map.get("key") {
        None | Some(Value::Null) => {
            return Err(TemplateError::invalid(format!("{context} is missing 'key'")))
        }
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(_) => {
            return Err(TemplateError::invalid(format!(
                "{context}: 'key' must be a non-empty string"
            )))
        }
    };

    let value = match map.get("value") {
        None | Some(Value::Null) => {
            return Err(TemplateError::invalid(format!("{context} is missing 'value'")))
        }
        Some(v) => v.clone(),
    };

    Ok(Parameter::new(key, value))
}

/// Merge action-level `overrides` into a copy of `base`.
///
/// `base` is never mutated; it is reused as-is for the next action. An
/// override sharing a key with a base entry replaces it in the result, and
/// the last entry wins when a key repeats within the override list itself.
pub fn merge(base: &ParameterSet, overrides: &[Value]) -> Result<ParameterSet, TemplateError> {
    let mut merged = base.clone();
    for (index, entry) in overrides.iter().enumerate() {
        let parameter = parse_parameter(entry, &format!("'parameters' entry {index}"))?;
        merged.insert(parameter.key().to_owned(), parameter);
    }
    Ok(merged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
