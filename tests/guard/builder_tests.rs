/*!
 * Guard Builder Tests
 */

use crate::common::Greeter;
use release_guard::{Guard, GuardBuilder, GuardError, ReleaseGuard, DEFAULT_RELEASE_OP};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_builder_object_guard() {
    let greeter = Greeter::new();
    let cleaned = Rc::clone(&greeter.cleaned);

    {
        let guard = ReleaseGuard::builder()
            .object(greeter)
            .release_op("cleanup")
            .label("greeter")
            .build()
            .unwrap();
        assert_eq!(guard.metadata().label(), "greeter");
        assert_eq!(guard.release_op(), Some("cleanup"));
    }

    assert!(cleaned.get());
}

#[test]
fn test_builder_action_guard() {
    let counter = Rc::new(Cell::new(0));
    let count = Rc::clone(&counter);

    let guard = GuardBuilder::new()
        .action(move || count.set(count.get() + 1))
        .label("counter")
        .build()
        .unwrap();
    assert_eq!(guard.release_op(), None);
    drop(guard);

    assert_eq!(counter.get(), 1);
}

#[test]
fn test_builder_default_release_op_missing() {
    let err = GuardBuilder::new().object(Greeter::new()).build().unwrap_err();
    assert_eq!(
        err,
        GuardError::MissingCapability {
            kind: "Greeter".to_string(),
            operation: DEFAULT_RELEASE_OP.to_string(),
        }
    );
}

#[test]
fn test_builder_rejects_no_target() {
    let err = GuardBuilder::new().label("empty").build().unwrap_err();
    assert!(matches!(err, GuardError::InvalidTarget(_)));
}

#[test]
fn test_builder_rejects_both_forms() {
    let greeter = Greeter::new();
    let cleanups = Rc::clone(&greeter.cleanups);
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);

    let err = GuardBuilder::new()
        .object(greeter)
        .release_op("cleanup")
        .action(move || flag.set(true))
        .build()
        .unwrap_err();

    assert!(matches!(err, GuardError::InvalidTarget(_)));
    assert_eq!(cleanups.get(), 0);
    assert!(!ran.get());
}

#[test]
fn test_builder_rejects_duplicate_object() {
    let err = GuardBuilder::new()
        .object(Greeter::new())
        .object(Greeter::new())
        .release_op("cleanup")
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        GuardError::InvalidTarget("an object was supplied twice".to_string())
    );
}

#[test]
fn test_builder_try_action() {
    let mut guard = GuardBuilder::new()
        .try_action(|| "x".parse::<u8>().map(|_| ()))
        .build()
        .unwrap();

    let err = guard.release().unwrap_err();
    assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
    guard.dismiss();
}

#[test]
fn test_invalid_target_diagnostic() {
    use miette::Diagnostic;

    let err = GuardBuilder::new().build().unwrap_err();
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("guard::invalid_target")
    );
    assert!(err.help().is_some());
}
