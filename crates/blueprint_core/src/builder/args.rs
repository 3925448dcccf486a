//! Argument decoding and scoped variable resolution.

use crate::builder::types::TypeResolver;
use crate::builder::{BuildError, BuildResult};
use crate::document::{ArgPass, ArgValue, ArgumentSpec, AttrScope};
use crate::model::{CallArgs, ObjectRef, RuntimeObject, Value};
use crate::registry::{IdentifierKind, IdentifierTable, ModuleRegistry};

/// Resolves argument specifications into call-ready collections.
pub struct ArgumentResolver<'a> {
    registry: &'a ModuleRegistry,
    module_ids: &'a IdentifierTable,
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(registry: &'a ModuleRegistry, module_ids: &'a IdentifierTable) -> Self {
        Self {
            registry,
            module_ids,
        }
    }

    /// Resolves every argument declaration in document order.
    ///
    /// `current` is the object under construction or modification (`None`
    /// while constructor arguments are resolved, since the object does not
    /// exist yet); `caller` is the caller-supplied context. An empty
    /// declaration list resolves to empty collections.
    pub fn resolve(
        &self,
        specs: &[ArgumentSpec],
        current: Option<&ObjectRef>,
        caller: Option<&ObjectRef>,
    ) -> BuildResult<CallArgs> {
        let mut args = CallArgs::new();
        for spec in specs {
            let value = self.resolve_value(&spec.value, current, caller)?;
            match &spec.pass {
                ArgPass::Positional => args.push_positional(value),
                ArgPass::Named(name) => args.insert_named(name.clone(), value),
            }
        }
        Ok(args)
    }

    fn resolve_value(
        &self,
        value: &ArgValue,
        current: Option<&ObjectRef>,
        caller: Option<&ObjectRef>,
    ) -> BuildResult<Value> {
        match value {
            ArgValue::Int(raw) => {
                raw.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| BuildError::ArgumentCast {
                        value: raw.clone(),
                        kind: "int",
                    })
            }
            ArgValue::Str(text) => Ok(Value::Str(text.clone())),
            ArgValue::Var { name, scope } => self.resolve_scoped(name, scope, current, caller),
        }
    }

    /// Resolves one name through the three-way scope rule.
    pub(crate) fn resolve_scoped(
        &self,
        name: &str,
        scope: &AttrScope,
        current: Option<&ObjectRef>,
        caller: Option<&ObjectRef>,
    ) -> BuildResult<Value> {
        match scope {
            AttrScope::CurrentObject => {
                let object = current.ok_or_else(|| {
                    BuildError::Construction(format!(
                        "no component under construction to resolve `{name}` against"
                    ))
                })?;
                attribute_of(object, name)
            }
            AttrScope::Module { module_id } => {
                let module_name = self.module_ids.lookup(module_id).ok_or_else(|| {
                    BuildError::IdentifierNotFound {
                        table: IdentifierKind::Module,
                        id: module_id.clone(),
                    }
                })?;
                TypeResolver::new(self.registry).resolve(Some(module_name), name)
            }
            AttrScope::CallerContext => {
                let object = caller.ok_or_else(|| {
                    BuildError::Construction(format!(
                        "no caller context to resolve `{name}` against"
                    ))
                })?;
                attribute_of(object, name)
            }
        }
    }
}

/// Reads one attribute off a runtime object.
pub(crate) fn attribute_of(object: &ObjectRef, name: &str) -> BuildResult<Value> {
    object
        .attribute(name)
        .ok_or_else(|| BuildError::AttributeNotFound {
            owner: object.type_name().to_string(),
            name: name.to_string(),
        })
}
