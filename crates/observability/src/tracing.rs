//! Tracing subscriber initialization.
//!
//! JSON lines with timestamps, filtered through `RUST_LOG`. Entity lifecycle
//! events are logged at `debug` under the `entitykit_*` targets.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing for the process with the `info` default filter.
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Initialize tracing; `directives` apply when `RUST_LOG` is unset or invalid.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with_default(directives: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init_with_default("entitykit_core=debug");
        ::tracing::debug!("still usable after repeated init");
    }
}
