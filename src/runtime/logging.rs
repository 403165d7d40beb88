use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::runtime::config;

/// Install the default subscriber.
///
/// Events are filtered by the `UPFIRLERP_LOG` environment variable, falling
/// back to the configured `log_level`. Does nothing if a global subscriber is
/// already set.
pub fn init() {
    let format = fmt::layer()
        .with_level(true)
        .with_target(true)
        .with_thread_names(true)
        .compact();

    let filter = EnvFilter::builder()
        .with_default_directive(config::config().log_level.into())
        .with_env_var("UPFIRLERP_LOG")
        .from_env_lossy();

    if tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
        .is_err()
    {
        debug!("logger already initialized");
    }
}
