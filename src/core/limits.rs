/*!
 * Guard Constants
 *
 * Names and defaults shared by guard construction and capability queries.
 */

// =============================================================================
// RELEASE
// =============================================================================

/// Operation invoked on an object target when no release operation is named
pub const DEFAULT_RELEASE_OP: &str = "finalize";

// =============================================================================
// GUARD SURFACE
// =============================================================================

/// Kind reported by the guard's own capability queries
pub const GUARD_KIND: &str = "ReleaseGuard";

/// Every kind the guard itself satisfies
pub const GUARD_KINDS: &[&str] = &[GUARD_KIND, "Guard"];

/// Operations that belong to the guard
///
/// The guard's `Dispatch` impl answers each of these itself and never
/// forwards them to the target. `new` is listed because construction belongs
/// to the guard, but invoking it on a live guard fails.
pub const RESERVED_OPERATIONS: &[&str] = &[
    "new",
    "release",
    "dismiss",
    "forward",
    "is_kind",
    "responds_to",
];
