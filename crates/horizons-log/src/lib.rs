//! Structured logging for the Horizons world generator.
//!
//! Sets up the `tracing` subscriber used by every Horizons crate: console output
//! with uptime timestamps and module paths, plus optional JSON file logging for
//! inspecting long generation runs. The level comes from `RUST_LOG` when set,
//! otherwise from the `debug.log_level` config entry.

use std::path::Path;

use horizons_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written inside the configured log directory.
pub const LOG_FILE_NAME: &str = "horizons.log";

/// Build the filter directive string for a config.
///
/// An empty `log_level` falls back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// When `config.debug.file_logging` is set and `config.debug.log_dir` can be
/// created, a JSON layer writing to [`LOG_FILE_NAME`] is added next to the
/// console layer.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_logging(config: Option<&Config>) {
    let filter_str = filter_directive(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let log_dir = config
        .filter(|c| c.debug.file_logging)
        .and_then(|c| c.debug.log_dir.as_deref());

    if let Some(log_dir) = log_dir
        && let Some(log_file) = open_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(std::sync::Mutex::new(log_file))
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::debug!(filter = %filter_str, dir = %log_dir.display(), "logging initialized");
        return;
    }

    subscriber.init();
    tracing::debug!(filter = %filter_str, "logging initialized");
}

fn open_log_file(log_dir: &Path) -> Option<std::fs::File> {
    std::fs::create_dir_all(log_dir).ok()?;
    std::fs::File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_filter_directive_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "warn,horizons_worldgen=trace".to_string();
        assert_eq!(
            filter_directive(Some(&config)),
            "warn,horizons_worldgen=trace"
        );
    }

    #[test]
    fn test_empty_level_falls_back_to_default() {
        let mut config = Config::default();
        config.debug.log_level.clear();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,horizons_worldgen=trace",
            "warn,horizons_assets=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("logs").join("run");

        let file = open_log_file(&nested);
        assert!(file.is_some());
        assert!(nested.join(LOG_FILE_NAME).exists());
    }
}
