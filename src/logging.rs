use crate::error::{AppError, Result};
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, Layer, Registry};

#[derive(Debug)]
pub struct LoggerConfig {
    pub level: Level,
    /// When set, logs are also written to a daily-rolling file in this
    /// directory, in addition to stdout.
    pub directory: Option<String>,
    pub file_name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            directory: None,
            file_name: "sitegrab.log".to_string(),
        }
    }
}

pub fn init_logging(config: LoggerConfig) -> Result<()> {
    let level_filter = tracing::level_filters::LevelFilter::from_level(config.level);

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .with_filter(level_filter);

    let result = match config.directory {
        Some(directory) => {
            std::fs::create_dir_all(&directory)?;
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, directory, config.file_name);
            let file_layer = fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file_appender)
                .with_filter(level_filter);
            tracing::subscriber::set_global_default(
                Registry::default().with(stdout_layer).with(file_layer),
            )
        }
        None => tracing::subscriber::set_global_default(Registry::default().with(stdout_layer)),
    };

    result.map_err(|e| AppError::Logging(format!("Failed to set global subscriber: {}", e)))
}

pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(AppError::Logging(format!("Invalid log level: {}", level))),
    }
}

// Helper macros for consistent logging across the pipeline stages.
#[macro_export]
macro_rules! log_error {
    // Tag the message with the failing stage when given an AppError.
    ($err:expr => $($arg:tt)*) => {{
        let err = &$err;
        let kind = match err {
            $crate::error::AppError::Fetch(_) => "fetch",
            $crate::error::AppError::Parse(_) => "parse",
            $crate::error::AppError::InvalidUrl(_) => "url",
            $crate::error::AppError::Output(_) => "output",
            $crate::error::AppError::Logging(_) => "logging",
            $crate::error::AppError::Io(_) => "io",
        };
        tracing::error!(error = %err, kind = kind, $($arg)*);
    }};
    ($($arg:tt)*) => {
        tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        tracing::warn!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        tracing::info!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        tracing::debug!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_all_levels() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert!(parse_log_level("loud").is_err());
    }
}
