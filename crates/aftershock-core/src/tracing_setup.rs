//! Tracing initialization for applications embedding the forecaster.
//!
//! Library code only emits `tracing` events; it never installs a subscriber.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{defaults, ObservabilityConfig};

static INIT: Once = Once::new();

/// Initialize the global subscriber.
///
/// Reads the `AFTERSHOCK_LOG` environment variable, e.g.
/// `AFTERSHOCK_LOG=aftershock_forecast=debug,aftershock_validation=info`.
/// Falls back to `config.log_filter`, then to the built-in default, if the
/// variable is not set or invalid.
///
/// Idempotent; later calls are no-ops. Returns `false` if another
/// subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter(config))
            .try_init()
            .is_ok();
    });
    installed
}

fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(defaults::LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_FILTER))
}
