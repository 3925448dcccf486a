//! Runtime value and object model shared with the component toolkit.
//!
//! # Responsibility
//! - Define the `Value` currency exchanged between builder and toolkit.
//! - Define the traits a component toolkit implements to become
//!   constructible (`Callable`), inspectable (`RuntimeObject`) and
//!   composable (`Container`).
//!
//! # Invariants
//! - The builder never inspects toolkit internals beyond these traits.
//! - Attribute lookup is read-only; mutation happens inside toolkit
//!   callables.

pub mod object;
pub mod value;

pub use object::{from_fn, Callable, CallableRef, Container, ObjectRef, RuntimeObject};
pub use value::{CallArgs, CallError, Placement, Value};
