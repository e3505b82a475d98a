use serde_json::json;
use std::sync::Arc;
use typeweave_chain::{Resolver, ResolverRegistry, TypeDataProvider};
use typeweave_core::test_utils::{Counter, counter_type, linear_hierarchy};
use typeweave_core::{ClassType, Instance, Reflect, TypeData, TypeDataExt};
use typeweave_manifest::{DEFAULT_PRIORITY, ManifestResolver};

// --- Lookup ---

#[test]
fn resolves_by_name() {
    let resolver = ManifestResolver::new().with(counter_type());
    let ty = resolver.type_data("Counter").unwrap().unwrap();
    assert!(ty.type_eq(counter_type().as_ref()));
}

#[test]
fn unknown_name_is_none() {
    let resolver = ManifestResolver::new().with(counter_type());
    assert!(resolver.type_data("Nope").unwrap().is_none());
}

#[test]
fn resolves_by_native_instance() {
    let resolver = ManifestResolver::new().with(counter_type());
    let counter: Instance = Arc::new(Counter::default());
    let ty = resolver.type_data_of(&counter).unwrap().unwrap();
    assert_eq!(ty.name(), "Counter");

    let member = ty.member("Value").unwrap();
    member.set_value(&counter, json!(3)).unwrap();
    assert_eq!(counter.downcast_ref::<Counter>().unwrap().value(), 3);
}

#[test]
fn unbound_class_not_resolvable_by_instance() {
    let resolver = ManifestResolver::new().with(ClassType::builder("Loose").build());
    let value: Instance = Arc::new(1.5f64);
    assert!(resolver.type_data_of(&value).unwrap().is_none());
    assert!(resolver.type_data("Loose").unwrap().is_some());
}

#[test]
fn hierarchy_survives_resolution() {
    let resolver = ManifestResolver::new();
    let types = linear_hierarchy(&["Base", "Derived"]);
    for ty in &types {
        resolver.register(ty.clone());
    }

    let derived = resolver.type_data("Derived").unwrap().unwrap();
    let base = resolver.type_data("Base").unwrap().unwrap();
    assert!(derived.descends_to(base.as_ref()));
}

// --- In a registry ---

#[test]
fn default_priority() {
    assert_eq!(ManifestResolver::new().priority(), DEFAULT_PRIORITY);
    assert_eq!(ManifestResolver::new().with_priority(7.0).priority(), 7.0);
}

#[test]
fn higher_priority_manifest_shadows_lower() {
    let special = ClassType::builder("Counter").build();
    let registry = ResolverRegistry::new()
        .with(Resolver::direct(ManifestResolver::new().with(counter_type())))
        .with(Resolver::direct(
            ManifestResolver::new().with_priority(5.0).with(special.clone()),
        ));

    let ty = registry.resolve("Counter").unwrap().unwrap();
    assert!(ty.type_eq(special.as_ref()));
    assert!(!ty.can_create_instance());

    // Instances still fall through to the lower manifest, which binds Counter.
    let counter: Instance = Arc::new(Counter::default());
    let by_instance = registry.resolve_instance(&counter).unwrap().unwrap();
    assert!(by_instance.can_create_instance());
}

#[test]
fn registered_after_chain_creation_is_visible() {
    let manifest = Arc::new(ManifestResolver::new());
    let registry = ResolverRegistry::new().with(Resolver::Direct(manifest.clone()));
    let chain = registry.chain();

    assert!(chain.resolve("Counter").unwrap().is_none());
    manifest.register(counter_type());
    assert!(chain.resolve("Counter").unwrap().is_some());
}
