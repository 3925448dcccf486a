//! Module registry: the explicit factory table behind name resolution.
//!
//! # Responsibility
//! - Hold named modules of symbols registered by the component toolkit.
//! - Load provider-backed modules lazily, exactly once, and cache them.
//! - Hold the builtin symbol table for the unnamed-module scope.
//!
//! # Invariants
//! - Registration happens before builds and validates every name.
//! - The provider cache is append-only; a cached module is never replaced.
//! - Resolution never mutates anything except the provider cache.

use crate::model::Value;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod identifiers;

pub use identifiers::{IdentifierKind, IdentifierTable, IdentifierTables};

static MODULE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("valid module name regex")
});
static SYMBOL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid symbol name regex"));

/// Registration-time errors for modules, providers and builtins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidModuleName(String),
    InvalidSymbolName(String),
    DuplicateModule(String),
    DuplicateBuiltin(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidModuleName(value) => write!(f, "module name is invalid: `{value}`"),
            Self::InvalidSymbolName(value) => write!(f, "symbol name is invalid: `{value}`"),
            Self::DuplicateModule(value) => write!(f, "module already registered: `{value}`"),
            Self::DuplicateBuiltin(value) => write!(f, "builtin already registered: `{value}`"),
        }
    }
}

impl Error for RegistryError {}

/// Deferred module constructor, run at most once on first resolution.
pub type ModuleProvider = Box<dyn Fn() -> ModuleDef + Send + Sync>;

/// A named bag of symbols contributed by the component toolkit.
///
/// Symbols are runtime values: constants, free callables, and factories
/// (callables that yield `Value::Object`). A repeated symbol name replaces
/// the earlier definition.
#[derive(Clone)]
pub struct ModuleDef {
    name: String,
    symbols: BTreeMap<String, Value>,
}

impl ModuleDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: BTreeMap::new(),
        }
    }

    /// Adds or replaces one symbol, builder-style.
    pub fn with_symbol(mut self, name: impl Into<String>, value: Value) -> Self {
        self.symbols.insert(name.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    /// Returns sorted symbol names.
    pub fn symbol_names(&self) -> Vec<String> {
        self.symbols.keys().cloned().collect()
    }

    /// Validates the module and symbol names for registration.
    fn validate(&self) -> Result<(), RegistryError> {
        if !MODULE_NAME_RE.is_match(&self.name) {
            return Err(RegistryError::InvalidModuleName(self.name.clone()));
        }
        for symbol in self.symbols.keys() {
            if !SYMBOL_NAME_RE.is_match(symbol) {
                return Err(RegistryError::InvalidSymbolName(symbol.clone()));
            }
        }
        Ok(())
    }
}

/// Registry of resolvable modules and builtins.
///
/// One registry is one resolution scope: callers own its lifetime and pass
/// it by reference into builds. The lazy-provider cache is the only state
/// shared across builds; it is append-only and read-safe once populated.
#[derive(Default)]
pub struct ModuleRegistry {
    loaded: RwLock<BTreeMap<String, Arc<ModuleDef>>>,
    providers: BTreeMap<String, ModuleProvider>,
    builtins: BTreeMap<String, Value>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one fully built module.
    pub fn register_module(&mut self, module: ModuleDef) -> Result<(), RegistryError> {
        module.validate()?;
        if self.contains_module(module.name()) {
            return Err(RegistryError::DuplicateModule(module.name().to_string()));
        }
        self.write_loaded()
            .insert(module.name().to_string(), Arc::new(module));
        Ok(())
    }

    /// Registers a deferred module. The provider runs on first resolution
    /// and its result is cached for this registry's lifetime.
    pub fn register_provider<F>(&mut self, name: &str, provider: F) -> Result<(), RegistryError>
    where
        F: Fn() -> ModuleDef + Send + Sync + 'static,
    {
        if !MODULE_NAME_RE.is_match(name) {
            return Err(RegistryError::InvalidModuleName(name.to_string()));
        }
        if self.contains_module(name) {
            return Err(RegistryError::DuplicateModule(name.to_string()));
        }
        self.providers.insert(name.to_string(), Box::new(provider));
        Ok(())
    }

    /// Registers one symbol in the unnamed-module scope.
    pub fn register_builtin(&mut self, name: &str, value: Value) -> Result<(), RegistryError> {
        if !SYMBOL_NAME_RE.is_match(name) {
            return Err(RegistryError::InvalidSymbolName(name.to_string()));
        }
        if self.builtins.contains_key(name) {
            return Err(RegistryError::DuplicateBuiltin(name.to_string()));
        }
        self.builtins.insert(name.to_string(), value);
        Ok(())
    }

    /// Resolves one module by name, loading and caching a provider-backed
    /// module on first use.
    pub fn resolve_module(&self, name: &str) -> Option<Arc<ModuleDef>> {
        if let Some(module) = self.read_loaded().get(name) {
            return Some(module.clone());
        }

        let provider = self.providers.get(name)?;
        let module = Arc::new(provider());
        debug!(
            "event=module_load module=registry status=ok name={name} symbols={}",
            module.symbol_names().len()
        );

        let mut loaded = self.write_loaded();
        // First write wins when two builds race on the same provider.
        let cached = loaded.entry(name.to_string()).or_insert(module);
        Some(cached.clone())
    }

    /// Looks up one builtin symbol.
    pub fn builtin(&self, name: &str) -> Option<&Value> {
        self.builtins.get(name)
    }

    /// Returns sorted names of every registered module, loaded or deferred.
    pub fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_loaded().keys().cloned().collect();
        names.extend(self.providers.keys().cloned());
        names.sort();
        names.dedup();
        names
    }

    fn contains_module(&self, name: &str) -> bool {
        self.read_loaded().contains_key(name) || self.providers.contains_key(name)
    }

    fn read_loaded(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<ModuleDef>>> {
        self.loaded.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_loaded(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<ModuleDef>>> {
        self.loaded.write().unwrap_or_else(PoisonError::into_inner)
    }
}
