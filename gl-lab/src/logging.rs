//! Ready-made `tracing-subscriber` setup for lab binaries

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter: info+ for the lab and the calling binary, warn+ for
/// everything else (winit and the GL stack are chatty at info).
const DEFAULT_FILTER: &str = "gl_lab=info,gl_lab_demos=info,warn";

/// Initialize a tracing subscriber honoring `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Initialize a tracing subscriber with an explicit filter, ignoring
/// `RUST_LOG`
pub fn init_tracing_with_filter(filter: &str) {
    fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
