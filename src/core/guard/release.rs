/*!
 * Release Guard
 *
 * RAII guard that releases a cyclic object exactly once, on scope exit
 */

use super::builder::GuardBuilder;
use super::target::Target;
use super::traits::{Guard, GuardDrop};
use super::{GuardError, GuardMetadata, GuardResult};
use crate::core::dispatch::{check_arity, decode_arg, Dispatch, Unbound, Value};
use crate::core::limits::{DEFAULT_RELEASE_OP, GUARD_KINDS, RESERVED_OPERATIONS};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, error};

/// Scope-bound release of an object or action
///
/// A guard wraps either an object plus the name of its release operation
/// (default `finalize`), or a zero-argument action. When the guard drops,
/// the release step runs once unless the guard was dismissed.
///
/// # Capability queries
///
/// There are two pairs of queries, and they answer for different things:
///
/// - `guard.is_kind(k)` / `guard.responds_to(op)` and the guard's
///   [`Dispatch`] impl answer for the **wrapped object**. This is what code
///   treating the guard as a stand-in expects. Both are `false` for an action
///   guard.
/// - `ReleaseGuard::guard_is_kind(&guard, k)` /
///   `ReleaseGuard::guard_responds_to(&guard, op)` answer for the **guard's
///   own** reserved surface only, never the object's.
///
/// The asymmetry is deliberate; do not expect the two to agree.
///
/// # Forwarding
///
/// `forward` passes any operation name straight to the object.
/// Driving the guard through `Dispatch::invoke` instead answers the
/// [`RESERVED_OPERATIONS`] itself and forwards everything else. `as_target`
/// gives typed access for statically dispatched calls.
///
/// # Example
///
/// ```ignore
/// let guard = ReleaseGuard::with_release_op(Rc::clone(&root), "cleanup")?;
/// let name = guard.forward("name", &[])?;
/// // dropping `guard` invokes `cleanup` on `root`
/// ```
pub struct ReleaseGuard<T: Dispatch = Unbound> {
    target: Target<T>,
    dismissed: bool,
    released: bool,
    metadata: GuardMetadata,
}

impl<T: Dispatch> ReleaseGuard<T> {
    /// Guard `object`, releasing it through [`DEFAULT_RELEASE_OP`]
    pub fn new(object: T) -> GuardResult<Self> {
        Self::with_release_op(object, DEFAULT_RELEASE_OP)
    }

    /// Guard `object`, releasing it through `release_op`
    ///
    /// Fails with `MissingCapability` if the object does not respond to
    /// `release_op`.
    pub fn with_release_op(
        object: T,
        release_op: impl Into<Cow<'static, str>>,
    ) -> GuardResult<Self> {
        GuardBuilder::new()
            .object(object)
            .release_op(release_op)
            .build()
    }

    pub(super) fn from_parts(target: Target<T>, metadata: GuardMetadata) -> Self {
        debug!(
            resource_type = metadata.resource_type,
            label = metadata.label(),
            form = ?target,
            "guard created"
        );
        Self {
            target,
            dismissed: false,
            released: false,
            metadata,
        }
    }

    /// Run the release step if it has not run yet
    ///
    /// A dismissed guard consumes the release without running it. If the
    /// release step fails, its error is returned unchanged and the guard
    /// stays pending, so a later call retries.
    pub fn release(&mut self) -> anyhow::Result<()> {
        if self.released {
            return Ok(());
        }

        if self.dismissed {
            self.released = true;
            return Ok(());
        }

        self.target.run_release()?;
        self.released = true;

        debug!(
            label = self.metadata.label(),
            release_op = self.target.release_op().unwrap_or("<action>"),
            lifetime_us = self.metadata.lifetime_micros(),
            "guard released"
        );
        Ok(())
    }

    /// Cancel the release step; forwarding keeps working
    pub fn dismiss(&mut self) {
        if !self.dismissed {
            debug!(label = self.metadata.label(), "guard dismissed");
        }
        self.dismissed = true;
    }

    /// Dismiss the guard and hand back the object
    ///
    /// Returns `None` for an action guard.
    pub fn into_inner(mut self) -> Option<T> {
        self.dismissed = true;
        self.released = true;
        match std::mem::replace(&mut self.target, Target::vacant()) {
            Target::Object { object, .. } => Some(object),
            Target::Action(_) => None,
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release operation name, `None` for an action guard
    pub fn release_op(&self) -> Option<&str> {
        self.target.release_op()
    }

    /// Borrow the wrapped object
    #[inline]
    pub fn as_target(&self) -> GuardResult<&T> {
        self.target
            .object()
            .ok_or_else(|| GuardError::UnsupportedForward {
                operation: "as_target".to_string(),
            })
    }

    /// Mutably borrow the wrapped object
    #[inline]
    pub fn as_target_mut(&mut self) -> GuardResult<&mut T> {
        self.target
            .object_mut()
            .ok_or_else(|| GuardError::UnsupportedForward {
                operation: "as_target_mut".to_string(),
            })
    }

    /// Forward `operation` to the wrapped object, verbatim
    ///
    /// The object's result and error are returned unchanged. Fails with
    /// `UnsupportedForward` for an action guard.
    #[inline]
    pub fn forward(&mut self, operation: &str, args: &[Value]) -> anyhow::Result<Value> {
        match self.target.object_mut() {
            Some(object) => object.invoke(operation, args),
            None => Err(GuardError::UnsupportedForward {
                operation: operation.to_string(),
            }
            .into()),
        }
    }

    /// Is the wrapped object of kind `kind`
    pub fn is_kind(&self, kind: &str) -> bool {
        self.target
            .object()
            .map_or(false, |object| object.is_kind(kind))
    }

    /// Does the wrapped object support `operation`
    pub fn responds_to(&self, operation: &str) -> bool {
        self.target
            .object()
            .map_or(false, |object| object.responds_to(operation))
    }

    /// Is the guard itself of kind `kind`; never consults the object
    pub fn guard_is_kind(_this: &Self, kind: &str) -> bool {
        GUARD_KINDS.contains(&kind)
    }

    /// Does the guard itself support `operation`; never consults the object
    pub fn guard_responds_to(_this: &Self, operation: &str) -> bool {
        RESERVED_OPERATIONS.contains(&operation)
    }
}

impl ReleaseGuard<Unbound> {
    /// Guard a release action
    pub fn from_fn<F>(action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        GuardBuilder::new().action(action).into_guard()
    }

    /// Guard a fallible release action
    ///
    /// A failed action leaves the guard pending; see [`release`](Self::release).
    pub fn from_try_fn<F, E>(action: F) -> Self
    where
        F: FnMut() -> Result<(), E> + 'static,
        E: Into<anyhow::Error>,
    {
        GuardBuilder::new().try_action(action).into_guard()
    }

    /// Start building a guard
    pub fn builder() -> GuardBuilder<Unbound> {
        GuardBuilder::new()
    }
}

impl<T: Dispatch> Guard for ReleaseGuard<T> {
    fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        !self.released && !self.dismissed
    }

    fn release(&mut self) -> anyhow::Result<()> {
        ReleaseGuard::release(self)
    }

    fn dismiss(&mut self) {
        ReleaseGuard::dismiss(self)
    }
}

impl<T: Dispatch> GuardDrop for ReleaseGuard<T> {
    fn on_drop(&mut self) {
        if let Err(e) = ReleaseGuard::release(self) {
            error!(
                label = self.metadata.label(),
                release_op = self.target.release_op().unwrap_or("<action>"),
                error = %e,
                "implicit release failed"
            );
        }
    }
}

impl<T: Dispatch> Drop for ReleaseGuard<T> {
    fn drop(&mut self) {
        self.on_drop();
    }
}

/// The guard as a stand-in for its object
///
/// Reserved operations are answered here and never reach the object:
///
/// - `release()` and `dismiss()` act on the guard.
/// - `is_kind(kind)` and `responds_to(operation)` answer for the object, as
///   JSON booleans.
/// - `forward(operation, args)` forwards `operation` with the `args` array.
/// - `new` fails with `UnsupportedForward`; construction is not an operation
///   of a live guard.
///
/// Every other operation is forwarded.
impl<T: Dispatch> Dispatch for ReleaseGuard<T> {
    fn kinds(&self) -> &'static [&'static str] {
        self.target
            .object()
            .map(|object| object.kinds())
            .unwrap_or(&[])
    }

    fn operations(&self) -> &'static [&'static str] {
        self.target
            .object()
            .map(|object| object.operations())
            .unwrap_or(&[])
    }

    fn is_accessible(&self) -> bool {
        self.target
            .object()
            .map_or(true, |object| object.is_accessible())
    }

    #[inline]
    fn invoke(&mut self, operation: &str, args: &[Value]) -> anyhow::Result<Value> {
        match operation {
            "release" => {
                check_arity(operation, 0, args.len())?;
                ReleaseGuard::release(self).map(|_| Value::Null)
            }
            "dismiss" => {
                check_arity(operation, 0, args.len())?;
                ReleaseGuard::dismiss(self);
                Ok(Value::Null)
            }
            "is_kind" => {
                check_arity(operation, 1, args.len())?;
                let kind: String = decode_arg(operation, "kind", args.first())?;
                Ok(Value::Bool(ReleaseGuard::is_kind(self, &kind)))
            }
            "responds_to" => {
                check_arity(operation, 1, args.len())?;
                let name: String = decode_arg(operation, "operation", args.first())?;
                Ok(Value::Bool(ReleaseGuard::responds_to(self, &name)))
            }
            "forward" => {
                check_arity(operation, 2, args.len())?;
                let name: String = decode_arg(operation, "operation", args.first())?;
                let forwarded: Vec<Value> = decode_arg(operation, "args", args.get(1))?;
                self.forward(&name, &forwarded)
            }
            "new" => Err(GuardError::UnsupportedForward {
                operation: operation.to_string(),
            }
            .into()),
            _ => self.forward(operation, args),
        }
    }
}

impl<T: Dispatch> fmt::Debug for ReleaseGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseGuard")
            .field("target", &self.target)
            .field("dismissed", &self.dismissed)
            .field("released", &self.released)
            .field("label", &self.metadata.label)
            .finish()
    }
}
