//! Declarative object-graph construction core.
//!
//! Builds a live hierarchy of runtime objects from a layout document,
//! resolving types and constructor arguments by name at build time. The
//! component toolkit registers its constructible types in a
//! [`registry::ModuleRegistry`] and implements the [`model`] traits; the
//! host then builds any layout the document describes:
//!
//! ```no_run
//! use blueprint_core::{build_graph, ModuleRegistry};
//!
//! let registry = ModuleRegistry::new();
//! let graph = build_graph(&registry, "layouts.json", "main_window", None)?;
//! # Ok::<(), blueprint_core::BuildError>(())
//! ```

pub mod builder;
pub mod document;
pub mod logging;
pub mod model;
pub mod registry;

pub use builder::{
    build_graph, build_graph_from_document, ArgumentResolver, BuildError, BuildResult,
    FeatureApplier, GraphBuilder, TypeResolver,
};
pub use document::{Document, DocumentError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    from_fn, CallArgs, CallError, Callable, CallableRef, Container, ObjectRef, Placement,
    RuntimeObject, Value,
};
pub use registry::{
    IdentifierKind, IdentifierTable, IdentifierTables, ModuleDef, ModuleRegistry, RegistryError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
