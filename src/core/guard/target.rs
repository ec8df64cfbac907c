/*!
 * Guard Targets
 */

use crate::core::dispatch::Dispatch;
use std::borrow::Cow;
use std::fmt;

/// Zero-argument release action
pub type ReleaseAction = Box<dyn FnMut() -> anyhow::Result<()>>;

/// What a guard releases: exactly one form per guard
pub(crate) enum Target<T: Dispatch> {
    Object {
        object: T,
        release_op: Cow<'static, str>,
    },
    Action(ReleaseAction),
}

impl<T: Dispatch> Target<T> {
    /// Run the release step once
    pub(crate) fn run_release(&mut self) -> anyhow::Result<()> {
        match self {
            Target::Object { object, release_op } => {
                object.invoke(release_op.as_ref(), &[]).map(drop)
            }
            Target::Action(action) => action(),
        }
    }

    pub(crate) fn object(&self) -> Option<&T> {
        match self {
            Target::Object { object, .. } => Some(object),
            Target::Action(_) => None,
        }
    }

    pub(crate) fn object_mut(&mut self) -> Option<&mut T> {
        match self {
            Target::Object { object, .. } => Some(object),
            Target::Action(_) => None,
        }
    }

    pub(crate) fn release_op(&self) -> Option<&str> {
        match self {
            Target::Object { release_op, .. } => Some(release_op.as_ref()),
            Target::Action(_) => None,
        }
    }

    /// Placeholder left behind when the object is moved out of a guard
    pub(crate) fn vacant() -> Self {
        Target::Action(Box::new(|| Ok(())))
    }
}

impl<T: Dispatch> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Object { object, release_op } => f
                .debug_struct("Object")
                .field("kinds", &object.kinds())
                .field("release_op", release_op)
                .finish(),
            Target::Action(_) => f.write_str("Action"),
        }
    }
}
