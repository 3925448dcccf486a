//! Recursive layout construction.

use crate::builder::args::ArgumentResolver;
use crate::builder::feature::FeatureApplier;
use crate::builder::types::TypeResolver;
use crate::builder::{BuildError, BuildResult};
use crate::document::{ChildNode, ComponentRole, ComponentSpec, LayoutNode};
use crate::model::{Callable, Container, ObjectRef, RuntimeObject, Value};
use crate::registry::{IdentifierKind, IdentifierTables, ModuleRegistry};
use log::debug;

/// Builds one layout definition into a live container hierarchy.
pub struct GraphBuilder<'a> {
    registry: &'a ModuleRegistry,
    tables: &'a IdentifierTables,
    caller: Option<ObjectRef>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        registry: &'a ModuleRegistry,
        tables: &'a IdentifierTables,
        caller: Option<ObjectRef>,
    ) -> Self {
        Self {
            registry,
            tables,
            caller,
        }
    }

    /// Walks the layout's children in document order.
    ///
    /// The `self` component becomes the local container; widgets and
    /// nested layouts attach to it with their decoded placement. Returns
    /// `None` when the layout declares no `self` component and nothing
    /// needed to attach.
    pub fn build_layout(&self, layout: &LayoutNode) -> BuildResult<Option<ObjectRef>> {
        let mut container: Option<ObjectRef> = None;

        for child in &layout.components {
            match child {
                ChildNode::Component(spec) => match spec.role {
                    ComponentRole::Primary => {
                        container = Some(self.build_component(spec)?);
                    }
                    ComponentRole::Widget => {
                        let parent = container.clone().ok_or_else(|| {
                            BuildError::Construction(format!(
                                "no container available in layout `{}` to attach a widget",
                                layout.name
                            ))
                        })?;
                        let object = self.build_component(spec)?;
                        as_container(&parent)?.attach_leaf(object, spec.placement)?;
                    }
                },
                ChildNode::Layout(nested) => {
                    let sub = self.build_layout(nested)?.ok_or_else(|| {
                        BuildError::Construction(format!(
                            "nested layout `{}` produced no container",
                            nested.name
                        ))
                    })?;
                    let parent = container.clone().ok_or_else(|| {
                        BuildError::Construction(format!(
                            "no container available in layout `{}` to attach nested layout `{}`",
                            layout.name, nested.name
                        ))
                    })?;
                    as_container(&parent)?.attach_container(sub, nested.placement)?;
                }
            }
        }

        Ok(container)
    }

    /// Constructs one leaf: type, arguments, instantiation, features.
    fn build_component(&self, spec: &ComponentSpec) -> BuildResult<ObjectRef> {
        let class_name = self.tables.classes.lookup(&spec.class_id).ok_or_else(|| {
            BuildError::IdentifierNotFound {
                table: IdentifierKind::Class,
                id: spec.class_id.clone(),
            }
        })?;
        let module_name = self.tables.modules.lookup(&spec.module_id).ok_or_else(|| {
            BuildError::IdentifierNotFound {
                table: IdentifierKind::Module,
                id: spec.module_id.clone(),
            }
        })?;

        let resolved = TypeResolver::new(self.registry).resolve(Some(module_name), class_name)?;
        let factory = match resolved {
            Value::Callable(factory) => factory,
            other => {
                return Err(BuildError::Construction(format!(
                    "`{class_name}` resolved to a {} value and cannot be constructed",
                    other.kind_name()
                )))
            }
        };

        // The object does not exist yet, so constructor arguments resolve
        // with no current object.
        let args = ArgumentResolver::new(self.registry, &self.tables.modules).resolve(
            &spec.constructor_args,
            None,
            self.caller.as_ref(),
        )?;

        let object = match factory.invoke(&args)? {
            Value::Object(object) => object,
            other => {
                return Err(BuildError::Construction(format!(
                    "constructor `{class_name}` returned a {} value instead of an object",
                    other.kind_name()
                )))
            }
        };

        debug!(
            "event=component_build module=builder status=ok class={class_name} features={}",
            spec.features.len()
        );

        let applier = FeatureApplier::new(self.registry, &self.tables.modules);
        for feature in &spec.features {
            applier.apply(&object, feature, self.caller.as_ref())?;
        }

        Ok(object)
    }
}

fn as_container(object: &ObjectRef) -> BuildResult<&dyn Container> {
    object.as_container().ok_or_else(|| {
        BuildError::Construction(format!("`{}` does not accept children", object.type_name()))
    })
}
