/*!
 * Shared Handle Dispatch
 *
 * Forwarding through the handles cyclic structures are usually built from
 */

use super::{Dispatch, Value};
use parking_lot::Mutex;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

impl<T: Dispatch + ?Sized> Dispatch for &mut T {
    fn kinds(&self) -> &'static [&'static str] {
        (**self).kinds()
    }

    fn operations(&self) -> &'static [&'static str] {
        (**self).operations()
    }

    fn is_accessible(&self) -> bool {
        (**self).is_accessible()
    }

    #[inline]
    fn invoke(&mut self, operation: &str, args: &[Value]) -> anyhow::Result<Value> {
        (**self).invoke(operation, args)
    }
}

impl<T: Dispatch + ?Sized> Dispatch for Box<T> {
    fn kinds(&self) -> &'static [&'static str] {
        (**self).kinds()
    }

    fn operations(&self) -> &'static [&'static str] {
        (**self).operations()
    }

    fn is_accessible(&self) -> bool {
        (**self).is_accessible()
    }

    #[inline]
    fn invoke(&mut self, operation: &str, args: &[Value]) -> anyhow::Result<Value> {
        (**self).invoke(operation, args)
    }
}

/// Single-threaded shared node, the usual shape of a parent/child cycle
///
/// Queries made while the cell is mutably borrowed answer as if the object
/// had no kinds or operations, and `is_accessible` is `false`. `invoke` fails
/// with the `BorrowMutError`.
impl<T: Dispatch + ?Sized> Dispatch for Rc<RefCell<T>> {
    fn kinds(&self) -> &'static [&'static str] {
        self.try_borrow().map(|target| target.kinds()).unwrap_or(&[])
    }

    fn operations(&self) -> &'static [&'static str] {
        self.try_borrow()
            .map(|target| target.operations())
            .unwrap_or(&[])
    }

    fn is_accessible(&self) -> bool {
        self.try_borrow()
            .map(|target| target.is_accessible())
            .unwrap_or(false)
    }

    fn invoke(&mut self, operation: &str, args: &[Value]) -> anyhow::Result<Value> {
        let mut target = self.try_borrow_mut()?;
        target.invoke(operation, args)
    }
}

/// Thread-shared node; the lock is held for one operation at a time
impl<T: Dispatch + ?Sized> Dispatch for Arc<Mutex<T>> {
    fn kinds(&self) -> &'static [&'static str] {
        self.lock().kinds()
    }

    fn operations(&self) -> &'static [&'static str] {
        self.lock().operations()
    }

    fn is_accessible(&self) -> bool {
        self.lock().is_accessible()
    }

    fn invoke(&mut self, operation: &str, args: &[Value]) -> anyhow::Result<Value> {
        self.lock().invoke(operation, args)
    }
}
