//! Logging setup for the command line tool
//!
//! Console output goes to stderr so that stdout only carries the product
//! summary. An optional plain text log file receives the same events.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt::{self, time::FormatTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

pub const DEFAULT_LOG_FILE: &str = "image_extractor.log";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Debug level instead of info, unless RUST_LOG says otherwise
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// Local wall clock time, seconds precision
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

fn build_filter(verbose: bool) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = if verbose { "debug" } else { "info" };
    Ok(EnvFilter::new(level)
        // HTML parser internals are noisy at debug
        .add_directive("html5ever=warn".parse()?)
        .add_directive("selectors=warn".parse()?)
        .add_directive("ureq=warn".parse()?)
        .add_directive("ureq_proto=warn".parse()?))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file on drop and must be held for as
/// long as the program logs.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = build_filter(config.verbose)?;

    let console_layer = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_timer(LocalTimeFormatter)
        .with_target(false);

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let (writer, guard) = non_blocking(rolling::never(&dir, file_name));
            let layer = fmt::Layer::new()
                .with_writer(writer)
                .with_timer(LocalTimeFormatter)
                .with_target(true)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("image_extractor.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "image_extractor.log");

        let (dir, name) = split_log_path(Path::new("logs/run.log")).unwrap();
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, "run.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_default_config_logs_to_file() {
        let config = LoggingConfig::default();
        assert!(!config.verbose);
        assert_eq!(config.log_file.as_deref(), Some(Path::new(DEFAULT_LOG_FILE)));
    }
}
