//! Tests for the type registry and the linkme manifest

use std::collections::BTreeSet;

use cdi_application::{
    COMPONENTS, CapabilityDescriptor, Component, ComponentEntry, Error, Injector, TypeRegistry,
    construct,
};

use crate::test_utils::*;

fn descriptor(text: &str) -> CapabilityDescriptor {
    CapabilityDescriptor::parse(text).expect("valid descriptor")
}

fn names(set: &BTreeSet<&'static str>) -> Vec<&'static str> {
    set.iter().copied().collect()
}

// ============================================================================
// Global manifest
// ============================================================================

#[derive(Default)]
struct Probe;

impl Component for Probe {}

#[linkme::distributed_slice(COMPONENTS)]
static GLOBAL_PROBE: ComponentEntry = ComponentEntry {
    factory: Some(construct::<Probe>),
    ..ComponentEntry::new("GlobalProbe", "Registered by the test binary")
};

#[test]
fn test_global_registry_collects_manifest() {
    let registry = TypeRegistry::global().expect("global registry");
    assert!(registry.contains("GlobalProbe"));
    assert!(registry.contains("Object"));

    let again = TypeRegistry::global().expect("global registry");
    assert!(std::sync::Arc::ptr_eq(&registry, &again), "snapshot is built once");
}

#[test]
fn test_shared_injector_creates_manifest_types() {
    let injector = Injector::shared().expect("shared injector");
    let probe = injector.create("GlobalProbe").expect("probe is instantiable");
    assert_eq!(probe.type_name(), "GlobalProbe");
    assert!(probe.downcast::<Probe>().is_ok());
}

#[test]
fn test_global_snapshot_is_built_once_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| TypeRegistry::global().expect("global registry")))
        .collect();
    let registries: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread finished"))
        .collect();
    for registry in &registries[1..] {
        assert!(std::sync::Arc::ptr_eq(&registries[0], registry));
    }
}

// ============================================================================
// Candidate search
// ============================================================================

#[test]
fn test_concrete_candidate_is_the_named_type() {
    let registry = registry(&[&ENGLISH_GREETER, &FRENCH_GREETER]);
    let found = registry
        .candidates_for(&descriptor("EnglishGreeter"))
        .expect("known type");
    assert_eq!(names(&found), vec!["EnglishGreeter"]);
}

#[test]
fn test_unknown_concrete_type_fails() {
    let registry = registry(&[&ENGLISH_GREETER]);
    let err = registry
        .candidates_for(&descriptor("GermanGreeter"))
        .expect_err("unknown type");
    assert!(matches!(err, Error::UnknownType { ref type_name } if type_name == "GermanGreeter"));
}

#[test]
fn test_capability_candidates_are_all_implementors() {
    let registry = registry(&[&ENGLISH_GREETER, &FRENCH_GREETER, &BUTLER, &WELCOME]);
    let found = registry
        .candidates_for(&descriptor("<Nameable>"))
        .expect("search succeeds");
    assert_eq!(names(&found), vec!["Butler", "EnglishGreeter", "FrenchGreeter"]);
}

#[test]
fn test_capability_set_requires_every_capability() {
    let registry = registry(&[&ENGLISH_GREETER, &BUTLER]);
    let found = registry
        .candidates_for(&descriptor("<Nameable><Loggable>"))
        .expect("search succeeds");
    assert_eq!(names(&found), vec!["Butler"]);

    let none = registry
        .candidates_for(&descriptor("<Nameable><Serializable>"))
        .expect("search succeeds");
    assert!(none.is_empty());
}

#[test]
fn test_any_resolves_to_root_placeholder() {
    let registry = registry(&[&ENGLISH_GREETER]);
    let found = registry
        .candidates_for(&CapabilityDescriptor::Any)
        .expect("search succeeds");
    assert_eq!(names(&found), vec!["Object"]);
}

// ============================================================================
// Inheritance and abstract types
// ============================================================================

#[test]
fn test_capabilities_are_inherited_from_supertypes() {
    let registry = registry(&[&ABSTRACT_GREETER, &POLITE_GREETER]);
    let effective = registry
        .effective_capabilities("PoliteGreeter")
        .expect("registered");
    assert!(effective.contains("Nameable"));
    assert!(effective.contains("Loggable"));
    assert!(registry.is_subtype_of("PoliteGreeter", "AbstractGreeter"));
    assert!(registry.is_subtype_of("PoliteGreeter", "Object"));
    assert!(!registry.is_subtype_of("AbstractGreeter", "PoliteGreeter"));
}

#[test]
fn test_abstract_types_are_never_capability_candidates() {
    let registry = registry(&[&ABSTRACT_GREETER, &POLITE_GREETER]);
    let found = registry
        .candidates_for(&descriptor("<Nameable>"))
        .expect("search succeeds");
    assert_eq!(names(&found), vec!["PoliteGreeter"]);
}

#[test]
fn test_unknown_supertype_is_rejected() {
    let err = TypeRegistry::from_entries([&POLITE_GREETER], all_interceptors())
        .expect_err("AbstractGreeter is missing");
    assert!(matches!(err, Error::UnknownType { ref type_name } if type_name == "AbstractGreeter"));
}

// ============================================================================
// Registry construction
// ============================================================================

#[test]
fn test_duplicate_type_names_are_rejected() {
    let err = TypeRegistry::from_entries([&ENGLISH_GREETER, &ENGLISH_GREETER], all_interceptors())
        .expect_err("duplicate name");
    assert!(matches!(err, Error::DuplicateType { ref type_name } if type_name == "EnglishGreeter"));
}

#[test]
fn test_duplicate_interceptor_names_are_rejected() {
    let err = TypeRegistry::from_entries([&ENGLISH_GREETER], [&LOGGING, &LOGGING])
        .expect_err("duplicate interceptor");
    assert!(matches!(err, Error::DuplicateType { ref type_name } if type_name == "Logging"));
}

#[test]
fn test_listings_are_sorted() {
    let registry = registry(&[&FRENCH_GREETER, &ENGLISH_GREETER]);
    let components: Vec<_> = registry.list_components().into_iter().map(|(name, _)| name).collect();
    assert_eq!(components, vec!["EnglishGreeter", "FrenchGreeter", "Object"]);
    assert_eq!(registry.len(), 3);

    let interceptors: Vec<_> = registry
        .list_interceptors()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(interceptors, vec!["Caching", "Deny", "Logging", "Offset"]);
}

#[test]
fn test_unknown_interceptor_lookup() {
    let registry = registry(&[]);
    assert!(registry.interceptor("Logging").is_ok());
    let err = registry.interceptor("Auditing").expect_err("not registered");
    assert!(matches!(err, Error::UnknownInterceptor { ref name } if name == "Auditing"));
}
