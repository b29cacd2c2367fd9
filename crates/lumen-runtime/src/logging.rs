//! Structured logging setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use lumen_core::{LumenError, LumenResult};

use crate::{LogFormat, LoggingConfig};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Fails, rather than panics,
/// when a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> LumenResult<()> {
    let filter = build_env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Plain => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    installed.map_err(|e| LumenError::Logging(e.to_string()))?;

    tracing::debug!(level = %config.level, format = ?config.format, "logging initialised");
    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> LumenResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| LumenError::Logging(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_second_init_fails_cleanly() {
        let config = LoggingConfig::default();
        // A subscriber can be installed once per process.
        let _ = init(&config);
        assert!(matches!(init(&config), Err(LumenError::Logging(_))));
    }

    #[test]
    #[serial]
    fn test_bad_directive() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig {
            level: "lumen=notalevel".to_string(),
            format: LogFormat::Json,
        };
        assert!(matches!(
            build_env_filter(&config),
            Err(LumenError::Logging(_))
        ));
    }
}
