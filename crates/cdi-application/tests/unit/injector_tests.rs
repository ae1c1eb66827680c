//! Tests for resolution and recursive wiring

use std::sync::Arc;

use cdi_application::{Error, InjectionPoint};

use crate::test_utils::*;

// ============================================================================
// Selection policy
// ============================================================================

#[test]
fn test_single_implementation_is_selected() {
    let injector = injector(&[&ENGLISH_GREETER, &WELCOME]);
    let greeter = injector
        .resolve("<Nameable>", None)
        .expect("exactly one Nameable");
    assert_eq!(greeter.type_name(), "EnglishGreeter");
    assert!(greeter.downcast::<EnglishGreeter>().is_ok());
}

#[test]
fn test_second_implementation_makes_resolution_ambiguous() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER, &WELCOME]);
    let err = injector
        .resolve("<Nameable>", None)
        .expect_err("two Nameable types");
    match err {
        Error::AmbiguousImplementation {
            descriptor,
            candidates,
        } => {
            assert_eq!(descriptor, "<Nameable>");
            assert_eq!(candidates, vec!["EnglishGreeter", "FrenchGreeter"]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn test_ambiguity_message_names_every_candidate() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER, &BUTLER]);
    let message = injector
        .resolve("<Nameable>", None)
        .expect_err("three Nameable types")
        .to_string();
    assert!(message.contains("Butler, EnglishGreeter, FrenchGreeter"), "{message}");
}

#[test]
fn test_no_implementation_found() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let err = injector
        .resolve("<Loggable>", None)
        .expect_err("nothing logs");
    assert!(matches!(err, Error::NoImplementationFound { ref descriptor, .. } if descriptor == "<Loggable>"));
}

#[test]
fn test_declaration_order_does_not_matter() {
    let injector = injector(&[&ENGLISH_GREETER, &BUTLER]);
    let first = injector
        .resolve("<Nameable><Loggable>", None)
        .expect("only Butler has both");
    let second = injector
        .resolve("<Loggable><Nameable>", None)
        .expect("only Butler has both");
    assert_eq!(first.type_name(), second.type_name());
    assert_eq!(first.type_name(), "Butler");
}

#[test]
fn test_type_override_narrows_the_need() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER]);
    let greeter = injector
        .resolve("<Nameable>", Some("FrenchGreeter"))
        .expect("override picks one");
    assert_eq!(greeter.type_name(), "FrenchGreeter");
}

#[test]
fn test_unknown_override_fails() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let err = injector
        .resolve("<Nameable>", Some("GermanGreeter"))
        .expect_err("unknown override");
    assert!(matches!(err, Error::UnknownType { .. }));
}

#[test]
fn test_any_yields_root_placeholder() {
    let injector = injector(&[&DRAWER]);
    let drawer = injector.create_as::<Drawer>("Drawer").expect("wired");
    assert_eq!(drawer.content, Some("Object"));
}

#[test]
fn test_resolve_point_uses_declared_override() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER]);
    let point = InjectionPoint::new("greeter", "<Nameable>").with_type("EnglishGreeter");
    let resolved = injector.resolve_point(&point).expect("override resolves");
    assert_eq!(resolved.type_name(), "EnglishGreeter");
}

#[test]
fn test_point_with_invalid_override_fails() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let point = InjectionPoint::new("greeter", "<Nameable>").with_type("<EnglishGreeter>");
    let err = injector
        .resolve_point(&point)
        .err()
        .expect("override is not a type name");
    assert!(matches!(err, Error::MalformedDescriptor { .. }));
}

#[test]
fn test_resolve_as_capability() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let greeter = injector
        .resolve_as::<dyn Nameable>("<Nameable>")
        .expect("viewable as Nameable");
    assert_eq!(greeter.name(), "Hello");

    let err = injector
        .resolve_as::<dyn Loggable>("EnglishGreeter")
        .err()
        .expect("EnglishGreeter does not log");
    assert!(matches!(err, Error::CapabilityMismatch { .. }));
}

#[test]
fn test_each_capability_of_a_type_is_viewable() {
    let injector = injector(&[&BUTLER]);
    let logger = injector
        .resolve_as::<dyn Loggable>("<Loggable><Nameable>")
        .expect("Butler logs");
    assert_eq!(logger.log_line(), "butler on duty");

    let injector = crate::test_utils::injector(&[&ABSTRACT_GREETER, &POLITE_GREETER]);
    let logger = injector
        .resolve_as::<dyn Loggable>("<Loggable>")
        .expect("PoliteGreeter logs");
    assert_eq!(logger.log_line(), "polite greeting");
}

#[test]
fn test_inherited_capability_view() {
    let injector = injector(&[&ABSTRACT_GREETER, &POLITE_GREETER]);
    let greeter = injector
        .resolve_as::<dyn Nameable>("<Nameable>")
        .expect("cast comes from the supertype entry");
    assert_eq!(greeter.name(), "How do you do");
}

// ============================================================================
// Recursive wiring
// ============================================================================

#[test]
fn test_injection_is_transitive() {
    let injector = injector(&[&ENGLISH_GREETER, &WELCOME, &RECEPTION]);
    let reception = injector.create_as::<Reception>("Reception").expect("wired");
    assert_eq!(reception.greet().as_deref(), Some("Hello"));
}

#[test]
fn test_nested_failure_aborts_outer_wiring() {
    let injector = injector(&[&ENGLISH_GREETER, &FRENCH_GREETER, &WELCOME, &RECEPTION]);
    let err = injector
        .create("Reception")
        .expect_err("Welcome cannot be wired");
    assert!(matches!(err, Error::AmbiguousImplementation { .. }));
}

#[test]
fn test_each_point_gets_a_fresh_prototype() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let first = injector.create("EnglishGreeter").expect("created");
    let second = injector.create("EnglishGreeter").expect("created");
    assert!(!Arc::ptr_eq(first.instance(), second.instance()));
}

#[test]
fn test_singleton_is_shared_per_injector() {
    let injector = injector(&[&CLOCK]);
    let first = injector.create_as::<Clock>("Clock").expect("created");
    let second = injector.create_as::<Clock>("Clock").expect("created");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.serial, second.serial);

    let other = crate::test_utils::injector(&[&CLOCK]);
    let third = other.create_as::<Clock>("Clock").expect("created");
    assert_ne!(first.serial, third.serial);
}

#[test]
fn test_cycle_is_reported() {
    let injector = injector(&[&CHICKEN, &EGG]);
    let err = injector.create("Chicken").expect_err("cycle");
    match err {
        Error::CircularDependency { path } => {
            assert_eq!(path, vec!["Chicken", "Egg", "Chicken"]);
        }
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn test_unknown_slot_aborts_wiring() {
    let injector = injector(&[&ENGLISH_GREETER, &BROKEN_SLOT]);
    let err = injector.create("BrokenSlot").expect_err("no such slot");
    assert!(matches!(err, Error::UnknownSlot { ref slot, .. } if slot == "missing"));
}

#[test]
fn test_malformed_point_aborts_wiring() {
    let injector = injector(&[&ENGLISH_GREETER, &BAD_DECLARATION]);
    let err = injector
        .create("BadDeclaration")
        .expect_err("malformed declaration");
    assert!(matches!(err, Error::MalformedDescriptor { .. }));
    assert!(err.is_resolution_error());
}

#[test]
fn test_abstract_type_cannot_be_created() {
    let injector = injector(&[&ABSTRACT_GREETER, &POLITE_GREETER]);
    let err = injector
        .create("AbstractGreeter")
        .expect_err("no factory");
    assert!(matches!(err, Error::NoImplementationFound { .. }));
}

#[test]
fn test_create_as_wrong_type() {
    let injector = injector(&[&ENGLISH_GREETER]);
    let err = injector
        .create_as::<FrenchGreeter>("EnglishGreeter")
        .expect_err("different Rust type");
    assert!(matches!(err, Error::CapabilityMismatch { .. }));
}

#[test]
fn test_concurrent_resolution() {
    let injector = Arc::new(injector(&[&ENGLISH_GREETER, &WELCOME, &CLOCK]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let injector = Arc::clone(&injector);
            std::thread::spawn(move || {
                let welcome = injector.create_as::<Welcome>("Welcome").expect("wired");
                let clock = injector.create_as::<Clock>("Clock").expect("created");
                (welcome.greet(), clock.serial)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread finished"))
        .collect();
    assert!(results.iter().all(|(greeting, _)| greeting.as_deref() == Some("Hello")));
    let serial = injector.create_as::<Clock>("Clock").expect("created").serial;
    assert!(results.iter().all(|(_, s)| *s == serial), "one clock per injector");
}
