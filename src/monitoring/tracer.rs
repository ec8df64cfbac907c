/*!
 * Structured Tracing
 *
 * Guards emit `tracing` events for creation, release, dismissal and failed
 * implicit releases. This module installs a subscriber for binaries and
 * tests that want to see them.
 */

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable enabling JSON output
pub const TRACE_JSON_ENV: &str = "RELEASE_GUARD_TRACE_JSON";

/// Filter used when `RUST_LOG` is unset: guard lifecycle events are debug
pub const DEFAULT_FILTER: &str = "info,release_guard=debug";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: [`DEFAULT_FILTER`])
/// - RELEASE_GUARD_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let filter = env_filter.to_string();

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true),
            )
            .try_init()
            .is_ok();
        if installed {
            info!(filter = %filter, "guard tracing initialized with JSON output");
        }
    } else {
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .compact(),
            )
            .try_init()
            .is_ok();
        if installed {
            info!(filter = %filter, "guard tracing initialized");
        }
    }
}
