//! Default logger installation, based on [tracing_subscriber].

use beanstalk_di::instance_provider::ErrorPtr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global `fmt` subscriber. The filter is taken from `RUST_LOG`, if present, or from
/// `default_filter` otherwise. Fails if the filter is invalid or a global subscriber is already
/// installed.
pub fn install_tracing_logger(default_filter: &str) -> Result<(), ErrorPtr> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|error| Arc::new(error) as ErrorPtr)?;

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(ErrorPtr::from)
}
