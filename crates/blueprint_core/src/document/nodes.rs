//! Typed document nodes and the raw-wire decoding pass.
//!
//! The wire format keeps every literal as text and every enumeration as a
//! string or small integer constant. Decoding closes those into variants
//! exactly once; downstream code never compares wire strings.

use crate::document::{DocumentError, DocumentResult};
use crate::model::Placement;
use serde::Deserialize;

/// One id/name declaration from the `common` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdEntry {
    pub id: String,
    pub name: String,
}

/// A named container definition with ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub name: String,
    /// Placement inside the parent container; only meaningful for nested
    /// layouts.
    pub placement: Option<Placement>,
    pub components: Vec<ChildNode>,
}

/// One child of a layout: a leaf component or a nested layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildNode {
    Component(ComponentSpec),
    Layout(LayoutNode),
}

/// Role of a leaf component inside its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ComponentRole {
    /// Constructs the layout's own container object.
    #[serde(rename = "self")]
    Primary,
    /// Constructs a child object attached to the container.
    #[serde(rename = "widget")]
    Widget,
}

/// Declaration of one constructible leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    pub role: ComponentRole,
    pub class_id: String,
    pub module_id: String,
    pub placement: Option<Placement>,
    pub constructor_args: Vec<ArgumentSpec>,
    pub features: Vec<FeatureSpec>,
}

/// One argument declaration for a constructor or feature invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub value: ArgValue,
    pub pass: ArgPass,
}

/// Literal payload or scoped reference of one argument.
///
/// `Int` keeps the raw text: the cast to an integer happens at resolve
/// time so a bad literal surfaces as an argument-cast error, not a parse
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Int(String),
    Str(String),
    Var { name: String, scope: AttrScope },
}

/// Where a referenced name is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrScope {
    /// The object currently under construction or modification.
    CurrentObject,
    /// A registered module, addressed by module id.
    Module { module_id: String },
    /// The caller-supplied context object.
    CallerContext,
}

/// Positional or named classification of one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgPass {
    Positional,
    Named(String),
}

/// One post-construction mutation: an attribute-step chain plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    pub args: Vec<ArgumentSpec>,
    pub steps: Vec<AttributeStep>,
}

/// One step of a feature's attribute resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeStep {
    pub name: String,
    pub scope: AttrScope,
}

// Raw wire shapes. Kept private: everything public is decoded and
// validated before it leaves this module.

#[derive(Deserialize)]
struct RawDocument {
    common: RawCommon,
    layouts: Vec<RawLayout>,
}

#[derive(Deserialize)]
struct RawCommon {
    modules: Vec<IdEntry>,
    classes: Vec<IdEntry>,
}

#[derive(Deserialize)]
struct RawLayout {
    name: String,
    row: Option<u32>,
    column: Option<u32>,
    components: Vec<RawChild>,
}

#[derive(Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
enum RawChild {
    Component(RawComponent),
    Layout(RawLayout),
}

#[derive(Deserialize)]
struct RawComponent {
    #[serde(rename = "type")]
    role: ComponentRole,
    class_id: String,
    module_id: String,
    row: Option<u32>,
    column: Option<u32>,
    #[serde(default)]
    constructor_args: Vec<RawArgument>,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RawArgKind {
    Int,
    Str,
    Var,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RawArgPass {
    Named,
    Unnamed,
}

#[derive(Deserialize)]
struct RawArgument {
    #[serde(rename = "type")]
    data_kind: RawArgKind,
    value: String,
    kind: RawArgPass,
    arg_name: Option<String>,
    parent_type_id: Option<u8>,
    module_id: Option<String>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    feature_args: Vec<RawArgument>,
    setting_attributes: Vec<RawStep>,
}

#[derive(Deserialize)]
struct RawStep {
    name: String,
    parent_type_id: u8,
    module_id: Option<String>,
}

pub(crate) fn decode_document(text: &str) -> DocumentResult<super::Document> {
    let raw: RawDocument = serde_json::from_str(text).map_err(|err| DocumentError::Malformed {
        detail: err.to_string(),
    })?;

    let mut layouts = Vec::with_capacity(raw.layouts.len());
    for layout in raw.layouts {
        layouts.push(decode_layout(layout)?);
    }

    Ok(super::Document {
        modules: raw.common.modules,
        classes: raw.common.classes,
        layouts,
    })
}

fn decode_layout(raw: RawLayout) -> DocumentResult<LayoutNode> {
    let name = raw.name;
    let placement = placement_of(raw.row, raw.column);

    let mut primary_seen = false;
    let mut components = Vec::with_capacity(raw.components.len());
    for child in raw.components {
        match child {
            RawChild::Component(component) => {
                let spec = decode_component(component, &name)?;
                if spec.role == ComponentRole::Primary {
                    if primary_seen {
                        return Err(DocumentError::Malformed {
                            detail: format!(
                                "layout `{name}` declares more than one self component"
                            ),
                        });
                    }
                    primary_seen = true;
                }
                components.push(ChildNode::Component(spec));
            }
            RawChild::Layout(nested) => {
                components.push(ChildNode::Layout(decode_layout(nested)?));
            }
        }
    }

    Ok(LayoutNode {
        name,
        placement,
        components,
    })
}

fn decode_component(raw: RawComponent, layout_name: &str) -> DocumentResult<ComponentSpec> {
    let placement = placement_of(raw.row, raw.column);

    let mut constructor_args = Vec::with_capacity(raw.constructor_args.len());
    for argument in raw.constructor_args {
        constructor_args.push(decode_argument(argument, layout_name)?);
    }

    let mut features = Vec::with_capacity(raw.features.len());
    for feature in raw.features {
        features.push(decode_feature(feature, layout_name)?);
    }

    Ok(ComponentSpec {
        role: raw.role,
        class_id: raw.class_id,
        module_id: raw.module_id,
        placement,
        constructor_args,
        features,
    })
}

fn decode_argument(raw: RawArgument, layout_name: &str) -> DocumentResult<ArgumentSpec> {
    let pass = match raw.kind {
        RawArgPass::Unnamed => ArgPass::Positional,
        RawArgPass::Named => {
            let name = raw
                .arg_name
                .filter(|name| !name.trim().is_empty())
                .ok_or_else(|| DocumentError::Malformed {
                    detail: format!(
                        "named argument in layout `{layout_name}` is missing `arg_name`"
                    ),
                })?;
            ArgPass::Named(name)
        }
    };

    let value = match raw.data_kind {
        RawArgKind::Int => ArgValue::Int(raw.value),
        RawArgKind::Str => ArgValue::Str(raw.value),
        RawArgKind::Var => ArgValue::Var {
            name: raw.value,
            scope: decode_scope(raw.parent_type_id, raw.module_id, layout_name)?,
        },
    };

    Ok(ArgumentSpec { value, pass })
}

fn decode_feature(raw: RawFeature, layout_name: &str) -> DocumentResult<FeatureSpec> {
    let mut args = Vec::with_capacity(raw.feature_args.len());
    for argument in raw.feature_args {
        args.push(decode_argument(argument, layout_name)?);
    }

    let mut steps = Vec::with_capacity(raw.setting_attributes.len());
    for step in raw.setting_attributes {
        steps.push(AttributeStep {
            scope: decode_scope(Some(step.parent_type_id), step.module_id, layout_name)?,
            name: step.name,
        });
    }

    Ok(FeatureSpec { args, steps })
}

fn decode_scope(
    parent_type_id: Option<u8>,
    module_id: Option<String>,
    layout_name: &str,
) -> DocumentResult<AttrScope> {
    match parent_type_id {
        Some(0) => Ok(AttrScope::CurrentObject),
        Some(1) => {
            let module_id = module_id.ok_or_else(|| DocumentError::Malformed {
                detail: format!(
                    "scoped reference in layout `{layout_name}` with parent_type_id 1 \
                     is missing `module_id`"
                ),
            })?;
            Ok(AttrScope::Module { module_id })
        }
        Some(2) => Ok(AttrScope::CallerContext),
        Some(other) => Err(DocumentError::Malformed {
            detail: format!(
                "scoped reference in layout `{layout_name}` has unsupported \
                 parent_type_id {other}, expected 0|1|2"
            ),
        }),
        None => Err(DocumentError::Malformed {
            detail: format!(
                "scoped reference in layout `{layout_name}` is missing `parent_type_id`"
            ),
        }),
    }
}

fn placement_of(row: Option<u32>, column: Option<u32>) -> Option<Placement> {
    match (row, column) {
        (Some(row), Some(column)) => Some(Placement { row, column }),
        _ => None,
    }
}
