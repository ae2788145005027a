//! Template assembly — validates a configuration value and composes the
//! final [`Template`].

use std::collections::HashMap;

use docsmith_core::{Parameter, ParameterSet, Template};
use serde_json::Value;

use crate::error::TemplateError;
use crate::merge::{merge, parse_parameter};
use crate::registry::{ActionRegistry, ResolveError};

/// Assembles [`Template`]s from declarative configuration values.
///
/// The factory takes ownership of a populated [`ActionRegistry`]; from then
/// on the registry is read-only and `create` takes `&self`, so concurrent
/// calls with independent configurations are safe.
pub struct TemplateFactory {
    registry: ActionRegistry,
}

impl TemplateFactory {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Assemble a [`Template`] from `config`.
    ///
    /// `config` is the in-memory tree of a parsed template definition: a
    /// mapping with a required string `name`, an optional `parameters`
    /// sequence of `{key, value}` entries, and an optional `actions`
    /// sequence of `{name, parameters?}` entries.
    ///
    /// Fails atomically: the first validation, resolution, or construction
    /// error aborts the whole call and no partial template is returned.
    /// Validation order is top-level shape first, then per action entry:
    /// existence, capability, override shape, construction.
    pub fn create(&self, config: &Value) -> Result<Template, TemplateError> {
        let map = config
            .as_object()
            .ok_or_else(|| TemplateError::invalid("template configuration must be a mapping"))?;

        let name = match map.get("name") {
            None | Some(Value::Null) => {
                return Err(TemplateError::invalid("'name' is required"))
            }
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(_) => {
                return Err(TemplateError::invalid("'name' must be a non-empty string"))
            }
        };

        let parameters =
            parse_parameter_list(sequence_field(map, "parameters", "'parameters'")?)?;
        let base: ParameterSet = parameters
            .iter()
            .map(|p| (p.key().to_owned(), p.clone()))
            .collect();

        let entries = sequence_field(map, "actions", "'actions'")?;
        let mut actions = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let context = format!("action entry {index}");
            let action_map = entry
                .as_object()
                .ok_or_else(|| TemplateError::invalid(format!("{context} must be a mapping")))?;

            let action_name = match action_map.get("name") {
                None | Some(Value::Null) => {
                    return Err(TemplateError::invalid(format!("{context} is missing 'name'")))
                }
                Some(Value::String(s)) if !s.is_empty() => s.as_str(),
                Some(_) => {
                    return Err(TemplateError::invalid(format!(
                        "{context}: 'name' must be a non-empty string"
                    )))
                }
            };

            let resolved = self.registry.resolve(action_name).map_err(|e| match e {
                ResolveError::Unknown { name } => {
                    TemplateError::UnknownAction { entry: index, name }
                }
                ResolveError::Unsupported { name } => {
                    TemplateError::UnsupportedAction { entry: index, name }
                }
            })?;

            let overrides =
                sequence_field(action_map, "parameters", &format!("{context}: 'parameters'"))?;
            let effective = merge(&base, overrides).map_err(|e| e.in_context(&context))?;

            let action = resolved.construct(effective).map_err(|source| {
                TemplateError::ActionConstructionFailed {
                    entry: index,
                    name: resolved.name().to_owned(),
                    source,
                }
            })?;
            actions.push(action);
        }

        tracing::debug!(
            template = %name,
            parameters = parameters.len(),
            actions = actions.len(),
            "assembled template"
        );
        Ok(Template::new(name, parameters, actions))
    }
}

/// Read an optional sequence field. Absent (or null) means empty; any other
/// non-sequence value is a shape error.
fn sequence_field<'a>(
    map: &'a serde_json::Map<String, Value>,
    field: &str,
    context: &str,
) -> Result<&'a [Value], TemplateError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(TemplateError::invalid(format!("{context} must be a sequence"))),
    }
}

/// Build the template-level parameter sequence: original order, deduplicated
/// by key. The first occurrence keeps its position, the last value wins.
fn parse_parameter_list(entries: &[Value]) -> Result<Vec<Parameter>, TemplateError> {
    let mut ordered: Vec<Parameter> = Vec::with_capacity(entries.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        let parameter = parse_parameter(entry, &format!("'parameters' entry {index}"))?;
        match positions.get(parameter.key()) {
            Some(&position) => ordered[position] = parameter,
            None => {
                positions.insert(parameter.key().to_owned(), ordered.len());
                ordered.push(parameter);
            }
        }
    }
    Ok(ordered)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
