//! Name-to-constructor registry for action types.
//!
//! The registry is the single place that answers "which concrete type does
//! this configuration name denote, and how is it constructed". It holds a
//! catalog keyed by fully-qualified name plus an ordered list of
//! [`ActionLoader`] fallbacks for types outside the built-in catalog.
//!
//! # Name resolution
//!
//! A name containing `::` is treated as fully qualified and used verbatim.
//! Any other name is short: it is qualified under the registry's default
//! namespace. `register("CopyAssets", …)` and a configuration referencing
//! `docsmith::render::action::CopyAssets` therefore meet at the same entry.
//!
//! # Concurrency
//!
//! Populate the registry before handing it to a
//! [`TemplateFactory`](crate::TemplateFactory); all resolution takes
//! `&self`, so a populated registry is read-only and safe to share.

use std::collections::HashMap;

use docsmith_core::{Action, ConstructFn, ConstructionError, ParameterSet};
use thiserror::Error;

/// Path separator in fully-qualified action names.
pub const SEPARATOR: &str = "::";

/// Namespace short action names resolve under unless overridden.
pub const DEFAULT_NAMESPACE: &str = "docsmith::render::action";

/// What a fully-qualified name maps to in the catalog.
#[derive(Debug, Clone, Copy)]
pub enum CatalogEntry {
    /// A type providing the action construction entry point.
    Action(ConstructFn),
    /// A known type without the entry point; referencing it from a template
    /// configuration is an error.
    NotAnAction,
}

/// Resolves fully-qualified names that are not in the built-in catalog.
///
/// Loaders model extension actions living outside the registry's own catalog
/// (separate crates, plugins). They always receive the qualified name;
/// short names have already been namespaced.
pub trait ActionLoader: Send + Sync {
    /// Return the catalog entry for `qualified`, or `None` if this loader
    /// does not know the type.
    fn load(&self, qualified: &str) -> Option<CatalogEntry>;
}

/// Resolution failures; the factory maps these onto
/// [`TemplateError`](crate::TemplateError) variants with entry context.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no type registered for '{name}'")]
    Unknown { name: String },

    #[error("type '{name}' does not provide an action constructor")]
    Unsupported { name: String },
}

/// A successfully resolved action type: qualified name plus constructor.
#[derive(Debug, Clone)]
pub struct ResolvedAction {
    name: String,
    constructor: ConstructFn,
}

impl ResolvedAction {
    /// Fully-qualified name of the resolved type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the type's construction entry point with `parameters`.
    pub fn construct(
        &self,
        parameters: ParameterSet,
    ) -> Result<Box<dyn Action>, ConstructionError> {
        (self.constructor)(parameters)
    }
}

/// Registry of action types, keyed by fully-qualified name.
pub struct ActionRegistry {
    namespace: String,
    catalog: HashMap<String, CatalogEntry>,
    loaders: Vec<Box<dyn ActionLoader>>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }
}

impl ActionRegistry {
    /// Create an empty registry whose short names resolve under `namespace`.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            catalog: HashMap::new(),
            loaders: Vec::new(),
        }
    }

    /// The namespace short names resolve under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register an action constructor. Short names are qualified under the
    /// default namespace; names containing `::` are stored verbatim.
    pub fn register(&mut self, name: &str, constructor: ConstructFn) {
        let qualified = self.qualify(name);
        self.catalog.insert(qualified, CatalogEntry::Action(constructor));
    }

    /// Record a type that exists but does not provide the action capability.
    ///
    /// Resolving such a name fails with [`ResolveError::Unsupported`] rather
    /// than [`ResolveError::Unknown`], so configuration authors can tell a
    /// real-but-unusable name from a typo.
    pub fn register_type(&mut self, name: &str) {
        let qualified = self.qualify(name);
        self.catalog.insert(qualified, CatalogEntry::NotAnAction);
    }

    /// Append a loader consulted (in registration order) for qualified names
    /// missing from the catalog.
    pub fn add_loader(&mut self, loader: Box<dyn ActionLoader>) {
        self.loaders.push(loader);
    }

    /// Qualify `name`: verbatim if it contains `::`, namespaced otherwise.
    pub fn qualify(&self, name: &str) -> String {
        if name.contains(SEPARATOR) {
            name.to_owned()
        } else {
            format!("{}{}{}", self.namespace, SEPARATOR, name)
        }
    }

    /// Resolve `name` to a constructible action type.
    pub fn resolve(&self, name: &str) -> Result<ResolvedAction, ResolveError> {
        let qualified = self.qualify(name);
        let entry = self
            .catalog
            .get(&qualified)
            .copied()
            .or_else(|| self.loaders.iter().find_map(|l| l.load(&qualified)));

        match entry {
            Some(CatalogEntry::Action(constructor)) => {
                tracing::trace!(name = %qualified, "resolved action type");
                Ok(ResolvedAction { name: qualified, constructor })
            }
            Some(CatalogEntry::NotAnAction) => Err(ResolveError::Unsupported { name: qualified }),
            None => Err(ResolveError::Unknown { name: qualified }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use docsmith_core::{Action, ConstructionError, ParameterSet};

    use super::*;

    #[derive(Debug)]
    struct Probe {
        parameters: ParameterSet,
    }

    impl Action for Probe {
        fn parameters(&self) -> &ParameterSet {
            &self.parameters
        }
    }

    fn probe(parameters: ParameterSet) -> Result<Box<dyn Action>, ConstructionError> {
        Ok(Box::new(Probe { parameters }))
    }

    #[test]
    fn short_name_resolves_under_default_namespace() {
        let mut registry = ActionRegistry::default();
        registry.register("Probe", probe);
        let resolved = registry.resolve("Probe").expect("resolve");
        assert_eq!(resolved.name(), "docsmith::render::action::Probe");
    }

    #[test]
    fn short_and_qualified_names_meet_at_the_same_entry() {
        let mut registry = ActionRegistry::default();
        registry.register("Probe", probe);
        let short = registry.resolve("Probe").expect("short");
        let qualified = registry
            .resolve("docsmith::render::action::Probe")
            .expect("qualified");
        assert_eq!(short.name(), qualified.name());
    }

    #[test]
    fn namespace_is_configurable() {
        let mut registry = ActionRegistry::with_namespace("ext::actions");
        registry.register("Probe", probe);
        let resolved = registry.resolve("Probe").expect("resolve");
        assert_eq!(resolved.name(), "ext::actions::Probe");
    }

    #[test]
    fn qualified_registration_is_stored_verbatim() {
        let mut registry = ActionRegistry::default();
        registry.register("vendor::extras::Probe", probe);
        let resolved = registry.resolve("vendor::extras::Probe").expect("resolve");
        assert_eq!(resolved.name(), "vendor::extras::Probe");
    }

    #[test]
    fn unknown_name_errors_with_qualified_path() {
        let registry = ActionRegistry::default();
        let err = registry.resolve("Missing").unwrap_err();
        assert!(matches!(err, ResolveError::Unknown { .. }), "got: {err}");
        assert!(err.to_string().contains("docsmith::render::action::Missing"));
    }

    #[test]
    fn type_without_capability_is_unsupported() {
        let mut registry = ActionRegistry::default();
        registry.register_type("XmlWriter");
        let err = registry.resolve("XmlWriter").unwrap_err();
        assert!(matches!(err, ResolveError::Unsupported { .. }), "got: {err}");
    }

    struct ExtensionLoader;

    impl ActionLoader for ExtensionLoader {
        fn load(&self, qualified: &str) -> Option<CatalogEntry> {
            (qualified == "ext::Fancy").then_some(CatalogEntry::Action(probe))
        }
    }

    #[test]
    fn loader_resolves_external_qualified_names() {
        let mut registry = ActionRegistry::default();
        registry.add_loader(Box::new(ExtensionLoader));
        let resolved = registry.resolve("ext::Fancy").expect("resolve");
        assert_eq!(resolved.name(), "ext::Fancy");
        let action = resolved.construct(ParameterSet::new()).expect("construct");
        assert!(action.parameters().is_empty());
    }

    #[test]
    fn loader_can_report_known_non_action_types() {
        struct KnowsWriter;

        impl ActionLoader for KnowsWriter {
            fn load(&self, qualified: &str) -> Option<CatalogEntry> {
                (qualified == "ext::Writer").then_some(CatalogEntry::NotAnAction)
            }
        }

        let mut registry = ActionRegistry::default();
        registry.add_loader(Box::new(KnowsWriter));
        let err = registry.resolve("ext::Writer").unwrap_err();
        assert!(matches!(err, ResolveError::Unsupported { .. }), "got: {err}");
    }

    #[test]
    fn catalog_takes_precedence_over_loaders() {
        struct NeverAsked;

        impl ActionLoader for NeverAsked {
            fn load(&self, _qualified: &str) -> Option<CatalogEntry> {
                Some(CatalogEntry::NotAnAction)
            }
        }

        let mut registry = ActionRegistry::default();
        registry.register("Probe", probe);
        registry.add_loader(Box::new(NeverAsked));
        assert!(registry.resolve("Probe").is_ok());
    }
}
