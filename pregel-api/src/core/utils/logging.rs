//! Process-wide `tracing` subscriber setup.
//!
//! The engine itself only emits `tracing` events. Binaries and tests that
//! want to see them call one of these initialisers; calling them more than
//! once is harmless, the first installed subscriber wins.
//!
//! `RUST_LOG` takes precedence over the level passed in.
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_global_logger(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // `try_init` fails if a global subscriber is already set
    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_thread_names(true))
        .try_init()
        .is_ok()
    {
        tracing::debug!(log_level, "Installed global logger");
    }
}

pub fn global_info_logger() {
    init_global_logger("INFO")
}

pub fn global_debug_logger() {
    init_global_logger("DEBUG")
}

pub fn global_trace_logger() {
    init_global_logger("TRACE")
}
