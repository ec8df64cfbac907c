/*!
 * Composite Guards
 *
 * Combine multiple guards into a single guard with unified lifecycle
 */

use super::traits::{Guard, GuardDrop};
use super::GuardMetadata;
use tracing::{debug, error};

/// Composite guard that releases several guards as one
///
/// Members are released last in first out, the order nested scopes would
/// release them in.
///
/// # Example
///
/// ```ignore
/// let tree = ReleaseGuard::new(Rc::clone(&root))?;
/// let index = ReleaseGuard::from_fn(move || index.borrow_mut().clear());
///
/// let composite = CompositeGuard::new().add(tree).add(index);
/// // `index` cleared first, then `tree` finalized, on drop
/// ```
pub struct CompositeGuard {
    guards: Vec<Box<dyn Guard>>,
    metadata: GuardMetadata,
}

impl CompositeGuard {
    /// Create a new empty composite guard
    pub fn new() -> Self {
        Self {
            guards: Vec::new(),
            metadata: GuardMetadata::new("composite"),
        }
    }

    /// Add a guard to the composite
    pub fn add<G: Guard + 'static>(mut self, guard: G) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Add a boxed guard to the composite
    pub fn add_boxed(mut self, guard: Box<dyn Guard>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Attach a label to the composite's log events
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.metadata.label = Some(label.into());
        self
    }

    /// Get number of guards in the composite
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Check if the composite has no guards
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Get all guard resource types
    pub fn guard_types(&self) -> Vec<&'static str> {
        self.guards.iter().map(|g| g.resource_type()).collect()
    }

    /// Release all guards in reverse order (LIFO)
    ///
    /// Continues even if some guards fail, collecting all errors
    pub fn release_all(&mut self) -> Vec<anyhow::Error> {
        let mut errors = Vec::new();

        for guard in self.guards.iter_mut().rev() {
            if let Err(e) = guard.release() {
                errors.push(e);
            }
        }

        errors
    }
}

impl Default for CompositeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Guard for CompositeGuard {
    fn resource_type(&self) -> &'static str {
        "composite"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    /// Active while any member still has a release pending
    fn is_active(&self) -> bool {
        self.guards.iter().any(|g| g.is_active())
    }

    fn release(&mut self) -> anyhow::Result<()> {
        let mut errors = self.release_all().into_iter();

        match errors.next() {
            None => Ok(()),
            Some(first) => {
                // Return first error, log others
                for (i, err) in errors.enumerate() {
                    error!(
                        label = self.metadata.label(),
                        index = i + 1,
                        error = %err,
                        "composite guard release error"
                    );
                }
                Err(first)
            }
        }
    }

    fn dismiss(&mut self) {
        debug!(
            label = self.metadata.label(),
            guards = self.guards.len(),
            "composite guard dismissed"
        );
        for guard in &mut self.guards {
            guard.dismiss();
        }
    }
}

impl GuardDrop for CompositeGuard {
    fn on_drop(&mut self) {
        if !self.is_active() {
            return;
        }

        let errors = self.release_all();
        if !errors.is_empty() {
            error!(
                label = self.metadata.label(),
                errors = errors.len(),
                first = %errors[0],
                "composite guard drop had errors"
            );
        }

        // Failed members were attempted and logged once; their own drop must not retry
        for guard in &mut self.guards {
            guard.dismiss();
        }
    }
}

impl Drop for CompositeGuard {
    fn drop(&mut self) {
        self.on_drop();
    }
}
