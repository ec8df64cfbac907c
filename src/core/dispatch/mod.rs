/*!
 * Dispatch
 *
 * Invoke-by-name method tables used to forward operations through a guard.
 *
 * ## Design
 *
 * A guard cannot re-declare every method of every type it might wrap, so
 * forwarding goes through a small object-safe trait instead:
 *
 * - `kinds()` / `is_kind()`: what the object is
 * - `operations()` / `responds_to()`: what the object can do
 * - `invoke()`: run an operation by name with positional arguments
 *
 * Arguments and results travel as `serde_json::Value`. Errors raised by an
 * operation are returned as-is; the dispatcher never wraps them.
 *
 * Most types should not implement `Dispatch` by hand. Use
 * [`dispatch_table!`](crate::dispatch_table) to derive it from a method list.
 */

mod codec;
mod macros;
mod shared;

pub use codec::{check_arity, decode_arg, encode_result, encode_value};
pub use serde_json::Value;

/// Object-safe method table for invoke-by-name forwarding
pub trait Dispatch {
    /// Kind names this object satisfies, most specific first
    fn kinds(&self) -> &'static [&'static str];

    /// Operation names `invoke` accepts
    fn operations(&self) -> &'static [&'static str];

    /// Check whether the object is of kind `kind`
    fn is_kind(&self, kind: &str) -> bool {
        self.kinds().contains(&kind)
    }

    /// Check whether the object supports `operation`
    fn responds_to(&self, operation: &str) -> bool {
        self.operations().contains(&operation)
    }

    /// Check whether the object can be reached right now
    ///
    /// Handles that put the object behind a runtime borrow answer `false`
    /// while it is exclusively borrowed elsewhere.
    fn is_accessible(&self) -> bool {
        true
    }

    /// Invoke `operation` with positional `args`
    ///
    /// Whatever the operation itself fails with is returned unchanged.
    fn invoke(&mut self, operation: &str, args: &[Value]) -> anyhow::Result<Value>;
}

/// Target type of guards built around a bare release action
///
/// Uninhabited: an action guard never holds an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unbound {}

impl Dispatch for Unbound {
    fn kinds(&self) -> &'static [&'static str] {
        match *self {}
    }

    fn operations(&self) -> &'static [&'static str] {
        match *self {}
    }

    fn invoke(&mut self, _operation: &str, _args: &[Value]) -> anyhow::Result<Value> {
        match *self {}
    }
}

/// Primary kind of `target`, for diagnostics
pub(crate) fn primary_kind<T: Dispatch + ?Sized>(target: &T) -> &'static str {
    target.kinds().first().copied().unwrap_or("unknown")
}
