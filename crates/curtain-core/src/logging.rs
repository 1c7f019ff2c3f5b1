#![forbid(unsafe_code)]

//! Logging facade.
//!
//! Re-exports the `tracing` macros so downstream crates can log through
//! `curtain_core` without naming `tracing` themselves, and offers a JSON
//! subscriber for production hosts behind the `tracing-json` feature.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber on stderr, filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
