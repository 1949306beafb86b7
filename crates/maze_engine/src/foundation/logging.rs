//! Logging utilities and structured logging support
//!
//! The library only emits through the `log` facade; binaries decide whether
//! and how to install `env_logger`.

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a default filter, still overridable via `RUST_LOG`
pub fn init_with_level(default_level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}
