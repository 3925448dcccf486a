//! Mock component toolkit shared by the integration suites.
//!
//! Implements the collaborator traits the way a real widget toolkit
//! adapter would: factories registered as module symbols, containers
//! recording attachments, and a signal object for callback wiring.
#![allow(dead_code)]

use blueprint_core::{
    CallArgs, CallError, Callable, Container, ModuleDef, ModuleRegistry, ObjectRef, Placement,
    RuntimeObject, Value,
};
use std::any::Any;
use std::sync::{Arc, Mutex};

/// One recorded attachment.
#[derive(Clone)]
pub struct Attached {
    pub child: ObjectRef,
    pub placement: Option<Placement>,
    pub nested: bool,
}

/// Grid container recording every attachment in order.
pub struct GridPanel {
    pub title: Mutex<Option<String>>,
    pub spacing: Arc<Mutex<i64>>,
    pub children: Mutex<Vec<Attached>>,
}

impl GridPanel {
    pub fn from_args(args: &CallArgs) -> Result<Value, CallError> {
        let title = match args.positional.first() {
            None => None,
            Some(Value::Str(text)) => Some(text.clone()),
            Some(other) => {
                return Err(CallError::new(format!(
                    "Panel title must be a string, got {}",
                    other.kind_name()
                )))
            }
        };
        let spacing = match args.named.get("spacing") {
            None => 0,
            Some(Value::Int(value)) => *value,
            Some(other) => {
                return Err(CallError::new(format!(
                    "Panel spacing must be an int, got {}",
                    other.kind_name()
                )))
            }
        };
        Ok(Value::Object(Arc::new(GridPanel {
            title: Mutex::new(title),
            spacing: Arc::new(Mutex::new(spacing)),
            children: Mutex::new(Vec::new()),
        })))
    }

    pub fn children(&self) -> Vec<Attached> {
        self.children.lock().expect("children lock").clone()
    }

    pub fn spacing(&self) -> i64 {
        *self.spacing.lock().expect("spacing lock")
    }

    pub fn title(&self) -> Option<String> {
        self.title.lock().expect("title lock").clone()
    }
}

impl RuntimeObject for GridPanel {
    fn type_name(&self) -> &str {
        "GridPanel"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "title" => Some(Value::Str(self.title().unwrap_or_default())),
            "set_spacing" => {
                let spacing = self.spacing.clone();
                Some(Value::callable(move |args| match args.positional.first() {
                    Some(Value::Int(value)) => {
                        *spacing.lock().expect("spacing lock") = *value;
                        Ok(Value::Int(*value))
                    }
                    _ => Err(CallError::new("set_spacing expects one int")),
                }))
            }
            _ => None,
        }
    }

    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Container for GridPanel {
    fn attach_leaf(&self, child: ObjectRef, placement: Option<Placement>) -> Result<(), CallError> {
        self.children.lock().expect("children lock").push(Attached {
            child,
            placement,
            nested: false,
        });
        Ok(())
    }

    fn attach_container(
        &self,
        child: ObjectRef,
        placement: Option<Placement>,
    ) -> Result<(), CallError> {
        self.children.lock().expect("children lock").push(Attached {
            child,
            placement,
            nested: true,
        });
        Ok(())
    }
}

/// Callback registration point, mirroring a toolkit signal.
pub struct Signal {
    handlers: Arc<Mutex<Vec<Value>>>,
}

impl Signal {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().expect("handlers lock").len()
    }

    /// Invokes every registered handler with empty arguments.
    pub fn fire(&self) {
        let handlers = self.handlers.lock().expect("handlers lock").clone();
        for handler in handlers {
            if let Value::Callable(callable) = handler {
                callable
                    .invoke(&CallArgs::new())
                    .expect("handler invocation should succeed");
            }
        }
    }
}

impl RuntimeObject for Signal {
    fn type_name(&self) -> &str {
        "Signal"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        if name != "register" {
            return None;
        }
        let handlers = self.handlers.clone();
        Some(Value::callable(move |args| {
            let handler = args
                .positional
                .first()
                .cloned()
                .ok_or_else(|| CallError::new("register expects one handler"))?;
            handlers.lock().expect("handlers lock").push(handler);
            Ok(Value::Int(0))
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Leaf widget with text state and an activation signal.
pub struct Label {
    pub text: Arc<Mutex<String>>,
    pub activate: Arc<Signal>,
}

impl Label {
    pub fn from_args(args: &CallArgs) -> Result<Value, CallError> {
        let text = match args.positional.first() {
            None => String::new(),
            Some(Value::Str(text)) => text.clone(),
            Some(other) => {
                return Err(CallError::new(format!(
                    "Label text must be a string, got {}",
                    other.kind_name()
                )))
            }
        };
        Ok(Value::Object(Arc::new(Label {
            text: Arc::new(Mutex::new(text)),
            activate: Arc::new(Signal::new()),
        })))
    }

    pub fn text(&self) -> String {
        self.text.lock().expect("text lock").clone()
    }
}

impl RuntimeObject for Label {
    fn type_name(&self) -> &str {
        "Label"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "text" => Some(Value::Str(self.text())),
            "upper_text" => Some(Value::Str(self.text().to_uppercase())),
            "on_activate" => Some(Value::Object(self.activate.clone())),
            "set_text" => {
                let text = self.text.clone();
                Some(Value::callable(move |args| match args.positional.first() {
                    Some(Value::Str(new_text)) => {
                        *text.lock().expect("text lock") = new_text.clone();
                        Ok(Value::Int(0))
                    }
                    _ => Err(CallError::new("set_text expects one string")),
                }))
            }
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Featureless leaf registered as a builtin factory.
pub struct Spacer;

impl RuntimeObject for Spacer {
    fn type_name(&self) -> &str {
        "Spacer"
    }

    fn attribute(&self, _name: &str) -> Option<Value> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Caller-context object supplying callback targets and values.
pub struct Harness {
    pub clicks: Arc<Mutex<u32>>,
    pub window_title: String,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            clicks: Arc::new(Mutex::new(0)),
            window_title: "host window".to_string(),
        }
    }

    pub fn clicks(&self) -> u32 {
        *self.clicks.lock().expect("clicks lock")
    }
}

impl RuntimeObject for Harness {
    fn type_name(&self) -> &str {
        "Harness"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "window_title" => Some(Value::Str(self.window_title.clone())),
            "handle_click" => {
                let clicks = self.clicks.clone();
                Some(Value::callable(move |_args| {
                    *clicks.lock().expect("clicks lock") += 1;
                    Ok(Value::Int(0))
                }))
            }
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registry preloaded with the mock toolkit.
pub fn toolkit_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry
        .register_module(
            ModuleDef::new("widgets")
                .with_symbol("Panel", Value::callable(GridPanel::from_args))
                .with_symbol("Label", Value::callable(Label::from_args))
                .with_symbol("DEFAULT_TITLE", Value::Str("untitled".to_string()))
                .with_symbol("ALIGN_CENTER", Value::Int(4)),
        )
        .expect("toolkit module should register");
    registry
        .register_builtin(
            "Spacer",
            Value::callable(|_args| Ok(Value::Object(Arc::new(Spacer)))),
        )
        .expect("builtin factory should register");
    registry
}

pub fn as_panel(object: &ObjectRef) -> &GridPanel {
    object
        .as_any()
        .downcast_ref::<GridPanel>()
        .expect("object should be a GridPanel")
}

pub fn as_label(object: &ObjectRef) -> &Label {
    object
        .as_any()
        .downcast_ref::<Label>()
        .expect("object should be a Label")
}
