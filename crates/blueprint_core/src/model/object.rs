//! Collaborator traits implemented by the component toolkit.

use crate::model::value::{CallArgs, CallError, Placement, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to one constructed runtime object.
pub type ObjectRef = Arc<dyn RuntimeObject>;

/// Shared handle to one invocable value (factory, method, free function).
pub type CallableRef = Arc<dyn Callable>;

/// A constructed runtime object the builder can read attributes from.
///
/// Attribute lookup backs the scoped-reference rules: the object under
/// construction, the caller context, and intermediate feature-chain values
/// are all read through this trait.
pub trait RuntimeObject: Send + Sync {
    /// Stable type label used in diagnostics and error messages.
    fn type_name(&self) -> &str;

    /// Reads one named attribute; `None` when the object has no such
    /// attribute.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Container view of this object, when it accepts children.
    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    /// Concrete-type escape hatch for hosts that need to downcast the
    /// finished graph.
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn RuntimeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeObject")
            .field("type_name", &self.type_name())
            .finish()
    }
}

/// A composite object that owns an ordered collection of children.
pub trait Container: RuntimeObject {
    /// Attaches one constructed leaf, optionally at a grid position.
    fn attach_leaf(&self, child: ObjectRef, placement: Option<Placement>) -> Result<(), CallError>;

    /// Attaches one fully built sub-container, optionally at a grid
    /// position.
    fn attach_container(
        &self,
        child: ObjectRef,
        placement: Option<Placement>,
    ) -> Result<(), CallError>;
}

/// An invocable value.
///
/// Factories are callables whose invocation yields `Value::Object`;
/// feature targets are callables invoked for their side effects.
pub trait Callable: Send + Sync {
    fn invoke(&self, args: &CallArgs) -> Result<Value, CallError>;
}

struct FnCallable<F> {
    f: F,
}

impl<F> Callable for FnCallable<F>
where
    F: Fn(&CallArgs) -> Result<Value, CallError> + Send + Sync,
{
    fn invoke(&self, args: &CallArgs) -> Result<Value, CallError> {
        (self.f)(args)
    }
}

/// Wraps a plain closure as a shared `Callable`.
pub fn from_fn<F>(f: F) -> CallableRef
where
    F: Fn(&CallArgs) -> Result<Value, CallError> + Send + Sync + 'static,
{
    Arc::new(FnCallable { f })
}
