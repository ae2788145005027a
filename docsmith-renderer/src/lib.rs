//! # docsmith-renderer
//!
//! Template assembly engine: turns a declarative rendering configuration
//! (name, parameter list, ordered action list) into a composed
//! [`Template`](docsmith_core::Template) of typed parameters and polymorphic
//! actions, each carrying its own merged parameter set.
//!
//! ## Usage
//!
//! ```rust
//! use docsmith_core::{Action, ConstructionError, ParameterSet};
//! use docsmith_renderer::{ActionRegistry, TemplateFactory, TemplateError};
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct CopyAssets {
//!     parameters: ParameterSet,
//! }
//!
//! impl Action for CopyAssets {
//!     fn parameters(&self) -> &ParameterSet {
//!         &self.parameters
//!     }
//! }
//!
//! fn copy_assets(parameters: ParameterSet) -> Result<Box<dyn Action>, ConstructionError> {
//!     Ok(Box::new(CopyAssets { parameters }))
//! }
//!
//! fn assemble() -> Result<(), TemplateError> {
//!     let mut registry = ActionRegistry::default();
//!     registry.register("CopyAssets", copy_assets);
//!
//!     let factory = TemplateFactory::new(registry);
//!     let template = factory.create(&json!({
//!         "name": "clean",
//!         "parameters": [{ "key": "theme", "value": "dark" }],
//!         "actions": [{ "name": "CopyAssets" }],
//!     }))?;
//!     assert_eq!(template.name(), "clean");
//!     Ok(())
//! }
//! # assemble().unwrap();
//! ```

pub mod error;
pub mod factory;
pub mod merge;
pub mod registry;

pub use error::TemplateError;
pub use factory::TemplateFactory;
pub use merge::merge;
pub use registry::{
    ActionLoader, ActionRegistry, CatalogEntry, ResolveError, ResolvedAction, DEFAULT_NAMESPACE,
};
