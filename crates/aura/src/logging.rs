//! Tracing setup for binaries built on this crate.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::AuraError;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"` or
/// `"aura_session=debug,warn"`) applies.
///
/// # Errors
/// [`AuraError::Config`] if the filter does not parse or a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), AuraError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| AuraError::Config(format!("log filter {default_filter:?}: {e}")))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| AuraError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_second_is_config_error() {
        let _ = init_tracing("info");

        let second = init_tracing("info");

        assert!(matches!(second, Err(AuraError::Config(_))));
    }
}
