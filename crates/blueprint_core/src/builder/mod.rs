//! Graph construction entry points and the build error taxonomy.
//!
//! # Responsibility
//! - Expose the single-pass `build_graph` library call.
//! - Own the error type shared by resolution and construction.
//!
//! # Invariants
//! - Construction is fail-fast and all-or-nothing: any error aborts the
//!   build and no partial graph is returned.
//! - One build call owns its document and identifier tables; only the
//!   module registry outlives the call.

use crate::document::{Document, DocumentError};
use crate::model::{CallError, ObjectRef};
use crate::registry::{IdentifierKind, IdentifierTables, ModuleRegistry};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub mod args;
pub mod feature;
pub mod graph;
pub mod types;

pub use args::ArgumentResolver;
pub use feature::FeatureApplier;
pub use graph::GraphBuilder;
pub use types::TypeResolver;

pub type BuildResult<T> = Result<T, BuildError>;

/// Failure of one build call.
#[derive(Debug)]
pub enum BuildError {
    /// Document loading or decoding failed.
    Document(DocumentError),
    /// No layout definition matches the requested name.
    LayoutNotFound(String),
    /// A short id has no declaration in its identifier table.
    IdentifierNotFound { table: IdentifierKind, id: String },
    /// No module with this name is registered.
    ModuleNotFound(String),
    /// A module, object or caller context has no such attribute.
    AttributeNotFound { owner: String, name: String },
    /// A literal argument could not be cast to its declared kind.
    ArgumentCast { value: String, kind: &'static str },
    /// Instantiation or attachment failed.
    Construction(String),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document(err) => write!(f, "{err}"),
            Self::LayoutNotFound(name) => write!(f, "layout not found: `{name}`"),
            Self::IdentifierNotFound { table, id } => {
                write!(f, "unknown {} id: `{id}`", table.as_str())
            }
            Self::ModuleNotFound(name) => write!(f, "module not found: `{name}`"),
            Self::AttributeNotFound { owner, name } => {
                write!(f, "`{owner}` has no attribute `{name}`")
            }
            Self::ArgumentCast { value, kind } => {
                write!(f, "cannot cast argument value `{value}` as {kind}")
            }
            Self::Construction(reason) => write!(f, "construction failed: {reason}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Document(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DocumentError> for BuildError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<CallError> for BuildError {
    fn from(value: CallError) -> Self {
        Self::Construction(value.message().to_string())
    }
}

/// Builds one named layout from a document file.
///
/// Returns the constructed root container, or `None` when the layout
/// declares no `self` component.
///
/// # Errors
/// Any resolution or construction failure aborts the build; see
/// [`BuildError`]. `LayoutNotFound` is raised before any component is
/// constructed.
///
/// # Side effects
/// - Emits `graph_build` logging events with duration and status.
/// - May populate the registry's provider cache.
pub fn build_graph(
    registry: &ModuleRegistry,
    document_path: impl AsRef<Path>,
    layout_name: &str,
    caller: Option<ObjectRef>,
) -> BuildResult<Option<ObjectRef>> {
    let started_at = Instant::now();
    info!("event=graph_build module=builder status=start layout={layout_name}");

    let result = Document::from_path(document_path)
        .map_err(BuildError::from)
        .and_then(|document| build_graph_from_document(registry, &document, layout_name, caller));

    match &result {
        Ok(_) => info!(
            "event=graph_build module=builder status=ok layout={layout_name} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=graph_build module=builder status=error layout={layout_name} \
             duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }

    result
}

/// Builds one named layout from an already decoded document.
pub fn build_graph_from_document(
    registry: &ModuleRegistry,
    document: &Document,
    layout_name: &str,
    caller: Option<ObjectRef>,
) -> BuildResult<Option<ObjectRef>> {
    let layout = document
        .layout(layout_name)
        .ok_or_else(|| BuildError::LayoutNotFound(layout_name.to_string()))?;
    let tables = IdentifierTables::from_document(document);
    GraphBuilder::new(registry, &tables, caller).build_layout(layout)
}
