use crate::models::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the level filter; `RUST_LOG` wins over the configured level
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber, human-readable or JSON lines
///
/// Logs go to stderr so stdout stays clean for verdict output.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), String> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| format!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_level() {
        let filter = env_filter("debug");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_init_tracing_twice_reports_error() {
        let config = LoggingConfig::default();
        // First call may already have happened in another test
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err(), "Second global init should fail, not panic");
    }
}
