/*!
 * Core Module
 * Guards, forwarding dispatch and shared constants
 */

pub mod dispatch;
pub mod guard;
pub mod limits;

// Re-export for convenience
pub use dispatch::{Dispatch, Unbound, Value};
pub use guard::{
    CompositeGuard, Guard, GuardBuilder, GuardDrop, GuardError, GuardMetadata, GuardResult,
    ReleaseAction, ReleaseGuard,
};
pub use limits::{DEFAULT_RELEASE_OP, GUARD_KIND, RESERVED_OPERATIONS};
