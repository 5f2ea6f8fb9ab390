//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Install the global fmt subscriber.
///
/// An explicit `level` wins over `RUST_LOG`. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init(level: Option<&str>) -> Result<(), String> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| format!("invalid log filter '{directive}': {e}"))?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
            .map_err(|e| e.to_string())?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| e.to_string())
}
