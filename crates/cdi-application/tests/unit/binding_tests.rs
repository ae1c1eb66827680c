//! Tests for manual wiring through injector bindings

use cdi_application::Error;

use crate::test_utils::*;

#[test]
fn test_binding_settles_ambiguity() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER, &WELCOME]);
    injector
        .bind("<Nameable>", "FrenchGreeter")
        .expect("bind succeeds");

    let welcome = injector.create_as::<Welcome>("Welcome").expect("wired");
    assert_eq!(welcome.greet().as_deref(), Some("Bonjour"));
}

#[test]
fn test_binding_overrides_unambiguous_search() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER, &BUTLER]);
    let found = injector
        .resolve("<Loggable>", None)
        .expect("only Butler logs");
    assert_eq!(found.type_name(), "Butler");

    injector
        .bind("EnglishGreeter", "FrenchGreeter")
        .expect("bind succeeds");
    let resolved = injector
        .resolve("EnglishGreeter", None)
        .expect("bound type resolves");
    assert_eq!(resolved.type_name(), "FrenchGreeter");
    assert_eq!(
        resolved
            .into_capability::<dyn Nameable>()
            .expect("FrenchGreeter is Nameable")
            .name(),
        "Bonjour"
    );
}

#[test]
fn test_capability_binding_ignores_declaration_order() {
    let injector = injector(&[&BUTLER, &POLITE_GREETER, &ABSTRACT_GREETER]);
    injector
        .bind("<Nameable><Loggable>", "PoliteGreeter")
        .expect("bind succeeds");

    let first = injector
        .resolve("<Loggable><Nameable>", None)
        .expect("bound type resolves");
    let second = injector
        .resolve("<Nameable><Loggable>", None)
        .expect("bound type resolves");
    assert_eq!(first.type_name(), "PoliteGreeter");
    assert_eq!(second.type_name(), "PoliteGreeter");
}

#[test]
fn test_concrete_binding_beats_capability_binding() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER, &BUTLER, &FRENCH_WELCOME]);
    injector
        .bind("<Nameable>", "EnglishGreeter")
        .expect("bind succeeds");
    injector.bind("FrenchGreeter", "Butler").expect("bind succeeds");

    // FrenchWelcome narrows <Nameable> to FrenchGreeter, which is bound to Butler
    let welcome = injector.create_as::<Welcome>("FrenchWelcome").expect("wired");
    assert_eq!(welcome.greet().as_deref(), Some("Good evening"));
}

#[test]
fn test_override_bypasses_capability_binding() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER, &FRENCH_WELCOME]);
    injector
        .bind("<Nameable>", "EnglishGreeter")
        .expect("bind succeeds");

    let welcome = injector.create_as::<Welcome>("FrenchWelcome").expect("wired");
    assert_eq!(welcome.greet().as_deref(), Some("Bonjour"));
}

#[test]
fn test_last_binding_wins() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER]);
    injector
        .bind("<Nameable>", "EnglishGreeter")
        .expect("bind succeeds");
    injector
        .bind("<Nameable>", "FrenchGreeter")
        .expect("bind succeeds");
    assert_eq!(
        injector.binding("<Nameable>").expect("lookup"),
        Some("FrenchGreeter".to_string())
    );
}

#[test]
fn test_unbind_restores_registry_search() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER]);
    injector
        .bind("<Nameable>", "EnglishGreeter")
        .expect("bind succeeds");
    assert!(injector.unbind("<Nameable>").expect("unbind"));
    assert!(!injector.unbind("<Nameable>").expect("unbind"));

    let err = injector.resolve("<Nameable>", None).expect_err("ambiguous again");
    assert!(matches!(err, Error::AmbiguousImplementation { .. }));
}

#[test]
fn test_clear_bindings() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER]);
    injector
        .bind("<Nameable>", "EnglishGreeter")
        .expect("bind succeeds");
    injector.clear_bindings().expect("clear");
    assert_eq!(injector.binding("<Nameable>").expect("lookup"), None);
}

#[test]
fn test_bind_rejects_unknown_implementation() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let err = injector
        .bind("<Nameable>", "GermanGreeter")
        .expect_err("unknown implementation");
    assert!(matches!(err, Error::UnknownType { ref type_name } if type_name == "GermanGreeter"));
}

#[test]
fn test_bind_rejects_malformed_descriptor() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let err = injector
        .bind("<Nameable", "EnglishGreeter")
        .expect_err("malformed descriptor");
    assert!(matches!(err, Error::MalformedDescriptor { .. }));
}

#[test]
fn test_binding_to_abstract_type_fails_at_resolution() {
    let injector = injector(&[&ABSTRACT_GREETER, &POLITE_GREETER]);
    injector
        .bind("<Nameable>", "AbstractGreeter")
        .expect("known type can be bound");
    let err = injector
        .resolve("<Nameable>", None)
        .expect_err("abstract type cannot be built");
    assert!(matches!(err, Error::NoImplementationFound { ref descriptor, .. } if descriptor == "AbstractGreeter"));
}

#[test]
fn test_any_binding_replaces_root_placeholder() {
    let injector = injector(&[&ENGLISH_GREETER, &DRAWER]);
    injector.bind("@", "EnglishGreeter").expect("bind succeeds");
    let drawer = injector.create_as::<Drawer>("Drawer").expect("wired");
    assert_eq!(drawer.content, Some("EnglishGreeter"));
}
