/*!
 * Composite Guard Tests
 */

use crate::common::Greeter;
use release_guard::{CompositeGuard, Guard, ReleaseGuard};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_composite_mixed_guards() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let greeter = Greeter::new();
    let cleaned = Rc::clone(&greeter.cleaned);

    {
        let first = Rc::clone(&order);
        let last = Rc::clone(&order);
        let _composite = CompositeGuard::new()
            .with_label("session")
            .add(ReleaseGuard::from_fn(move || first.borrow_mut().push("first")))
            .add(ReleaseGuard::with_release_op(greeter, "cleanup").unwrap())
            .add(ReleaseGuard::from_fn(move || last.borrow_mut().push("last")));
    }

    assert_eq!(*order.borrow(), vec!["last", "first"]);
    assert!(cleaned.get());
}

#[test]
fn test_composite_nested() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let push = |name: &'static str| {
        let order = Rc::clone(&order);
        ReleaseGuard::from_fn(move || order.borrow_mut().push(name))
    };

    {
        let inner = CompositeGuard::new().add(push("a")).add(push("b"));
        let _outer = CompositeGuard::new().add(inner).add(push("c"));
    }

    assert_eq!(*order.borrow(), vec!["c", "b", "a"]);
}

#[test]
fn test_composite_add_boxed() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&order);
    let boxed: Box<dyn Guard> = Box::new(ReleaseGuard::from_fn(move || log.borrow_mut().push(1)));

    let mut composite = CompositeGuard::default().add_boxed(boxed);
    assert!(!composite.is_empty());
    composite.release().unwrap();

    assert_eq!(*order.borrow(), vec![1]);
    assert!(!composite.is_active());
}
