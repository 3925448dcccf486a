//! Layout document loading and decoding.
//!
//! # Responsibility
//! - Load one declarative layout document from disk or from a string.
//! - Decode it once into closed, typed node variants.
//! - Reject declaration-level inconsistencies before any construction runs.
//!
//! # Invariants
//! - A decoded `Document` is immutable for the rest of the build call.
//! - String-constant enumerations from the wire format never leak past this
//!   module; downstream code matches on variants.
//! - A layout declares at most one `self` component.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub mod nodes;

pub use nodes::{
    ArgPass, ArgValue, ArgumentSpec, AttrScope, AttributeStep, ChildNode, ComponentRole,
    ComponentSpec, FeatureSpec, IdEntry, LayoutNode,
};

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document loading/decoding failures.
#[derive(Debug)]
pub enum DocumentError {
    /// The document file could not be read.
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document text parsed or validated incorrectly.
    Malformed { detail: String },
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path, source } => {
                write!(f, "layout document `{}` not found: {source}", path.display())
            }
            Self::Malformed { detail } => write!(f, "malformed layout document: {detail}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { source, .. } => Some(source),
            Self::Malformed { .. } => None,
        }
    }
}

/// One decoded layout document.
///
/// Holds the id declarations from the `common` section and every named
/// layout definition. Owned by one build invocation and discarded after it
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub modules: Vec<IdEntry>,
    pub classes: Vec<IdEntry>,
    pub layouts: Vec<LayoutNode>,
}

impl Document {
    /// Reads and decodes a document file.
    ///
    /// # Errors
    /// - `DocumentError::NotFound` when the file cannot be read.
    /// - `DocumentError::Malformed` when parsing or validation fails.
    pub fn from_path(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DocumentError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Decodes a document from JSON text.
    pub fn from_json(text: &str) -> DocumentResult<Self> {
        nodes::decode_document(text)
    }

    /// Returns the first layout definition with the given name.
    pub fn layout(&self, name: &str) -> Option<&LayoutNode> {
        self.layouts.iter().find(|layout| layout.name == name)
    }
}
