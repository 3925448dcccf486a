mod support;

use blueprint_core::{
    build_graph_from_document, BuildError, Document, ModuleDef, ModuleRegistry, RegistryError,
    Value,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use support::{as_panel, GridPanel};

const PANEL_DOCUMENT: &str = r#"{
    "common": {
        "modules": [{"id": "1", "name": "widgets"}],
        "classes": [{"id": "1", "name": "Panel"}]
    },
    "layouts": [{
        "name": "main",
        "components": [
            {"node": "component", "type": "self", "class_id": "1", "module_id": "1"}
        ]
    }]
}"#;

#[test]
fn provider_module_loads_once_across_builds() {
    let loads = Arc::new(AtomicUsize::new(0));
    let loads_in_provider = loads.clone();

    let mut registry = ModuleRegistry::new();
    registry
        .register_provider("widgets", move || {
            loads_in_provider.fetch_add(1, Ordering::SeqCst);
            ModuleDef::new("widgets").with_symbol("Panel", Value::callable(GridPanel::from_args))
        })
        .expect("provider should register");

    let document = Document::from_json(PANEL_DOCUMENT).expect("document should decode");
    assert_eq!(loads.load(Ordering::SeqCst), 0);

    for _ in 0..3 {
        let root = build_graph_from_document(&registry, &document, "main", None)
            .expect("build should succeed")
            .expect("layout should yield a container");
        as_panel(&root);
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn unregistered_module_fails_resolution() {
    let registry = ModuleRegistry::new();
    let document = Document::from_json(PANEL_DOCUMENT).expect("document should decode");

    let error = build_graph_from_document(&registry, &document, "main", None)
        .expect_err("unregistered module must fail");
    assert!(matches!(
        error,
        BuildError::ModuleNotFound(name) if name == "widgets"
    ));
}

#[test]
fn missing_symbol_reports_owning_module() {
    let mut registry = ModuleRegistry::new();
    registry
        .register_module(ModuleDef::new("widgets"))
        .expect("module should register");
    let document = Document::from_json(PANEL_DOCUMENT).expect("document should decode");

    let error = build_graph_from_document(&registry, &document, "main", None)
        .expect_err("missing symbol must fail");
    assert!(matches!(
        error,
        BuildError::AttributeNotFound { owner, name }
            if owner == "widgets" && name == "Panel"
    ));
}

#[test]
fn duplicate_registration_is_rejected_with_readable_message() {
    let mut registry = ModuleRegistry::new();
    registry
        .register_module(ModuleDef::new("widgets"))
        .expect("first registration should succeed");

    let error = registry
        .register_module(ModuleDef::new("widgets"))
        .expect_err("duplicate registration must fail");
    assert_eq!(error, RegistryError::DuplicateModule("widgets".to_string()));
    assert!(error.to_string().contains("already registered"));
}
