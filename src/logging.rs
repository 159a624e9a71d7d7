// Logging setup for spindle.
//
// Built on the `tracing` ecosystem. Call one of the init functions once at
// process start (typically in a binary or benchmark harness); the library
// itself only emits events and never installs a subscriber on its own.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for the logging subscriber.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to display.
    pub level: Level,
    /// Emit JSON instead of human-readable lines.
    pub json_format: bool,
    /// Include file and line information.
    pub show_file_line: bool,
    /// Include thread names (useful when watching workers spread over the
    /// runtime).
    pub show_thread_info: bool,
    /// Optional `EnvFilter`-style target directives, e.g.
    /// `"spindle=debug,spindle::router=trace"`. Overrides `level` when set.
    pub target_filters: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            show_file_line: false,
            show_thread_info: true,
            target_filters: None,
        }
    }
}

/// Initializes the global subscriber. Safe to call more than once; only the
/// first call takes effect.
pub fn init(config: LogConfig) {
    INIT.call_once(|| {
        let filter = match &config.target_filters {
            Some(directives) => EnvFilter::try_new(directives)
                .unwrap_or_else(|_| EnvFilter::new(config.level.to_string())),
            None => EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(config.level).into())
                .from_env_lossy(),
        };

        if config.json_format {
            let layer = fmt::layer()
                .json()
                .with_file(config.show_file_line)
                .with_line_number(config.show_file_line)
                .with_thread_names(config.show_thread_info)
                .with_target(true);
            tracing_subscriber::registry().with(filter).with(layer).init();
        } else {
            let layer = fmt::layer()
                .with_file(config.show_file_line)
                .with_line_number(config.show_file_line)
                .with_thread_names(config.show_thread_info)
                .with_target(true);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}

/// INFO level, console output.
pub fn init_default() {
    init(LogConfig::default());
}

/// DEBUG level with file/line info, for local development.
pub fn init_development() {
    init(LogConfig {
        level: Level::DEBUG,
        show_file_line: true,
        ..Default::default()
    });
}
