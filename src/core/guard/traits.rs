/*!
 * Guard Traits
 *
 * Core abstractions shared by release guards
 */

use super::GuardMetadata;

/// Core guard trait
///
/// Object-safe so heterogeneous guards can be released together
/// (see [`CompositeGuard`](super::CompositeGuard)).
pub trait Guard {
    /// Resource type name for logging/debugging
    fn resource_type(&self) -> &'static str;

    /// Get guard metadata
    fn metadata(&self) -> &GuardMetadata;

    /// Check if release is still pending (neither released nor dismissed)
    fn is_active(&self) -> bool;

    /// Run the release step if it has not run yet
    ///
    /// Idempotent. Errors come from the released object and are returned
    /// unchanged; a failed release stays pending.
    fn release(&mut self) -> anyhow::Result<()>;

    /// Permanently cancel the release step
    fn dismiss(&mut self);
}

/// Guards that release on drop
///
/// Separates Drop logic for better testability and observability
pub trait GuardDrop: Guard {
    /// Perform cleanup on drop
    ///
    /// # Panics
    ///
    /// Should NOT panic. Log errors instead.
    fn on_drop(&mut self);
}
