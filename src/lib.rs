/*!
 * Release Guard Library
 *
 * Deterministic, scope-bound release of objects caught in reference cycles,
 * with transparent forwarding to the guarded object.
 */

pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::dispatch::{Dispatch, Unbound, Value};
pub use crate::core::guard::{
    CompositeGuard, Guard, GuardBuilder, GuardDrop, GuardError, GuardMetadata, GuardResult,
    ReleaseAction, ReleaseGuard,
};
pub use crate::core::limits::{DEFAULT_RELEASE_OP, GUARD_KIND, RESERVED_OPERATIONS};
pub use monitoring::init_tracing;

#[doc(hidden)]
pub use anyhow;
