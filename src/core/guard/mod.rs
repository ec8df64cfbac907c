/*!
 * Release Guards
 *
 * Scope-bound, exactly-once release of objects that reference counting
 * cannot reclaim on its own.
 *
 * ## Design Principles
 *
 * 1. **Scope-Driven**: Release fires when the guard drops, never later
 * 2. **Exactly Once**: `released` and `dismissed` make the trigger idempotent
 * 3. **Fail Fast**: A missing release operation is a construction error
 * 4. **Transparent**: Guards forward everything else to the wrapped object
 *
 * ## Guard Types
 *
 * - **ReleaseGuard**: Object + release operation, or a bare release action
 * - **CompositeGuard**: Several guards released together, last in first out
 *
 * ## Example
 *
 * ```ignore
 * let root = Rc::new(RefCell::new(Node::new("root")));
 * Node::adopt(&root, Node::new("child")); // child holds an Rc to root
 *
 * let guard = ReleaseGuard::new(Rc::clone(&root))?; // calls `finalize`
 * drop(root);
 * // Scope exit: guard invokes `finalize`, breaking the cycle
 * ```
 */

mod builder;
mod composite;
mod release;
mod target;
mod traits;

pub use builder::GuardBuilder;
pub use composite::CompositeGuard;
pub use release::ReleaseGuard;
pub use target::ReleaseAction;
pub use traits::{Guard, GuardDrop};

use miette::Diagnostic;
use std::time::Instant;
use thiserror::Error;

/// Result type for guard construction
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors raised by the guard itself
///
/// Errors raised by a wrapped object's own operations are never converted
/// into a `GuardError`; they reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GuardError {
    #[error("Invalid guard target: {0}")]
    #[diagnostic(
        code(guard::invalid_target),
        help("Supply exactly one of an object or a release action.")
    )]
    InvalidTarget(String),

    #[error("Target `{kind}` does not support release operation `{operation}`")]
    #[diagnostic(
        code(guard::missing_capability),
        help("Check the operation name for typos, or add it to the target's dispatch table.")
    )]
    MissingCapability { kind: String, operation: String },

    #[error("Cannot forward `{operation}`: guard wraps a bare release action")]
    #[diagnostic(
        code(guard::unsupported_forward),
        help("Only guards built around an object can forward operations.")
    )]
    UnsupportedForward { operation: String },

    #[error("Target `{kind}` has no operation `{operation}`")]
    #[diagnostic(code(guard::unknown_operation))]
    UnknownOperation { kind: String, operation: String },

    #[error("Operation `{operation}` takes {expected} argument(s), got {actual}")]
    #[diagnostic(code(guard::arity_mismatch))]
    ArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument `{argument}` for `{operation}`: {reason}")]
    #[diagnostic(code(guard::invalid_argument))]
    InvalidArgument {
        operation: String,
        argument: String,
        reason: String,
    },
}

/// Guard metadata for observability
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub label: Option<String>,
    pub creation_time: Instant,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            label: None,
            creation_time: Instant::now(),
        }
    }

    #[inline]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("-")
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
