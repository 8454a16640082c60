//! Shared helpers for `wf` integration tests: workflow builders, a
//! recording process backend and a scripted executable resolver.

pub mod builders;
pub mod fake_backend;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING: Once = Once::new();

/// Install a test-friendly subscriber once per test binary.
///
/// Output goes through the harness capture, so it only shows up for failing
/// tests. `RUST_LOG` selects the level; the default shows `wf` at debug.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wf=debug"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
