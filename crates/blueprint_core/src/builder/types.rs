//! Name-to-symbol resolution against the module registry.

use crate::builder::{BuildError, BuildResult};
use crate::model::Value;
use crate::registry::ModuleRegistry;

/// Resolves a (module, symbol) pair to a runtime value.
pub struct TypeResolver<'reg> {
    registry: &'reg ModuleRegistry,
}

impl<'reg> TypeResolver<'reg> {
    pub fn new(registry: &'reg ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Resolves one symbol.
    ///
    /// With a module name the symbol is looked up as a member of that
    /// module; without one (or with an empty name, the document convention
    /// for the unnamed scope) it is looked up in the builtin table.
    ///
    /// # Errors
    /// - `ModuleNotFound` when no module with this name is registered.
    /// - `AttributeNotFound` when the module or builtin table lacks the
    ///   symbol.
    pub fn resolve(&self, module_name: Option<&str>, symbol: &str) -> BuildResult<Value> {
        match module_name.filter(|name| !name.is_empty()) {
            Some(module_name) => {
                let module = self
                    .registry
                    .resolve_module(module_name)
                    .ok_or_else(|| BuildError::ModuleNotFound(module_name.to_string()))?;
                module
                    .symbol(symbol)
                    .cloned()
                    .ok_or_else(|| BuildError::AttributeNotFound {
                        owner: module_name.to_string(),
                        name: symbol.to_string(),
                    })
            }
            None => self
                .registry
                .builtin(symbol)
                .cloned()
                .ok_or_else(|| BuildError::AttributeNotFound {
                    owner: "builtins".to_string(),
                    name: symbol.to_string(),
                }),
        }
    }
}
