//! Post-construction feature application.
//!
//! A feature names an invocable through an ordered attribute-step chain
//! (e.g. `clicked` then `connect` for a button signal) and invokes it with
//! its own resolved arguments. Features mutate the target by side effect;
//! invocation results are discarded.

use crate::builder::args::{attribute_of, ArgumentResolver};
use crate::builder::{BuildError, BuildResult};
use crate::document::{AttrScope, FeatureSpec};
use crate::model::{Callable, ObjectRef, RuntimeObject, Value};
use crate::registry::{IdentifierTable, ModuleRegistry};

/// Applies feature specifications to freshly constructed objects.
pub struct FeatureApplier<'a> {
    args: ArgumentResolver<'a>,
}

impl<'a> FeatureApplier<'a> {
    pub fn new(registry: &'a ModuleRegistry, module_ids: &'a IdentifierTable) -> Self {
        Self {
            args: ArgumentResolver::new(registry, module_ids),
        }
    }

    /// Resolves and invokes one feature against `target`.
    ///
    /// The step chain folds from `target`: a current-object step reads an
    /// attribute off the value produced by the previous step, while module
    /// and caller steps resolve through their usual scopes. The final
    /// value must be invocable.
    pub fn apply(
        &self,
        target: &ObjectRef,
        feature: &FeatureSpec,
        caller: Option<&ObjectRef>,
    ) -> BuildResult<()> {
        let mut resolved = Value::Object(target.clone());
        for step in &feature.steps {
            resolved = match &step.scope {
                AttrScope::CurrentObject => match &resolved {
                    Value::Object(object) => attribute_of(object, &step.name)?,
                    other => {
                        return Err(BuildError::Construction(format!(
                            "attribute step `{}` applied to a {} value",
                            step.name,
                            other.kind_name()
                        )))
                    }
                },
                AttrScope::Module { .. } | AttrScope::CallerContext => {
                    self.args.resolve_scoped(&step.name, &step.scope, None, caller)?
                }
            };
        }

        let callable = match resolved {
            Value::Callable(callable) => callable,
            other => {
                return Err(BuildError::Construction(format!(
                    "feature chain on `{}` resolved to a {} value, which is not invocable",
                    target.type_name(),
                    other.kind_name()
                )))
            }
        };

        let call_args = self.args.resolve(&feature.args, Some(target), caller)?;
        callable.invoke(&call_args)?;
        Ok(())
    }
}
