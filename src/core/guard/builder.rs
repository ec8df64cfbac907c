/*!
 * Guard Builder
 *
 * Validated construction of release guards
 */

use super::release::ReleaseGuard;
use super::target::{ReleaseAction, Target};
use super::{GuardError, GuardMetadata, GuardResult};
use crate::core::dispatch::{primary_kind, Dispatch, Unbound};
use crate::core::limits::{DEFAULT_RELEASE_OP, GUARD_KIND};
use std::borrow::Cow;

/// Builder for [`ReleaseGuard`]
///
/// Exactly one of `object` or `action` must be supplied. A release operation
/// only applies to an object; it defaults to [`DEFAULT_RELEASE_OP`].
///
/// # Example
///
/// ```ignore
/// let guard = GuardBuilder::new()
///     .object(Rc::clone(&tree))
///     .release_op("clear")
///     .label("config-tree")
///     .build()?;
/// ```
pub struct GuardBuilder<T: Dispatch = Unbound> {
    object: Option<T>,
    action: Option<ReleaseAction>,
    release_op: Option<Cow<'static, str>>,
    label: Option<String>,
    conflict: Option<&'static str>,
}

impl GuardBuilder<Unbound> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            object: None,
            action: None,
            release_op: None,
            label: None,
            conflict: None,
        }
    }
}

impl Default for GuardBuilder<Unbound> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Dispatch> GuardBuilder<T> {
    /// Guard an object
    pub fn object<U: Dispatch>(self, object: U) -> GuardBuilder<U> {
        let conflict = if self.object.is_some() {
            Some("an object was supplied twice")
        } else {
            self.conflict
        };

        GuardBuilder {
            object: Some(object),
            action: self.action,
            release_op: self.release_op,
            label: self.label,
            conflict,
        }
    }

    /// Guard a release action
    pub fn action<F>(self, mut action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.set_action(Box::new(move || {
            action();
            Ok(())
        }))
    }

    /// Guard a fallible release action
    pub fn try_action<F, E>(self, mut action: F) -> Self
    where
        F: FnMut() -> Result<(), E> + 'static,
        E: Into<anyhow::Error>,
    {
        self.set_action(Box::new(move || action().map_err(Into::into)))
    }

    /// Name the operation invoked on the object at release time
    pub fn release_op(mut self, release_op: impl Into<Cow<'static, str>>) -> Self {
        self.release_op = Some(release_op.into());
        self
    }

    /// Attach a label to the guard's log events
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn set_action(mut self, action: ReleaseAction) -> Self {
        if self.action.is_some() {
            self.conflict.get_or_insert("an action was supplied twice");
        }
        self.action = Some(action);
        self
    }

    fn metadata(&mut self) -> GuardMetadata {
        let metadata = GuardMetadata::new(GUARD_KIND);
        match self.label.take() {
            Some(label) => metadata.with_label(label),
            None => metadata,
        }
    }

    /// Validate and build the guard
    ///
    /// Nothing is invoked on the object here; on failure the object is
    /// dropped untouched. An object that is exclusively borrowed elsewhere,
    /// such as an `Rc<RefCell<_>>` with a live `borrow_mut`, cannot be
    /// checked for its release operation and fails with `InvalidTarget`.
    pub fn build(mut self) -> GuardResult<ReleaseGuard<T>> {
        if let Some(reason) = self.conflict {
            return Err(GuardError::InvalidTarget(reason.to_string()));
        }

        let metadata = self.metadata();
        let target = match (self.object, self.action) {
            (Some(object), None) => {
                let release_op = self
                    .release_op
                    .unwrap_or(Cow::Borrowed(DEFAULT_RELEASE_OP));
                if !object.is_accessible() {
                    return Err(GuardError::InvalidTarget(
                        "object is exclusively borrowed elsewhere".to_string(),
                    ));
                }
                if !object.responds_to(&release_op) {
                    return Err(GuardError::MissingCapability {
                        kind: primary_kind(&object).to_string(),
                        operation: release_op.into_owned(),
                    });
                }
                Target::Object { object, release_op }
            }
            (None, Some(action)) => {
                if let Some(release_op) = self.release_op {
                    return Err(GuardError::InvalidTarget(format!(
                        "release operation `{release_op}` given for an action"
                    )));
                }
                Target::Action(action)
            }
            (Some(_), Some(_)) => {
                return Err(GuardError::InvalidTarget(
                    "both an object and an action were supplied".to_string(),
                ))
            }
            (None, None) => {
                return Err(GuardError::InvalidTarget(
                    "neither an object nor an action was supplied".to_string(),
                ))
            }
        };

        Ok(ReleaseGuard::from_parts(target, metadata))
    }
}

impl GuardBuilder<Unbound> {
    /// Build an action guard whose shape is already known to be valid
    pub(super) fn into_guard(mut self) -> ReleaseGuard<Unbound> {
        let metadata = self.metadata();
        let action = self
            .action
            .unwrap_or_else(|| Box::new(|| Ok(())));
        ReleaseGuard::from_parts(Target::Action(action), metadata)
    }
}
