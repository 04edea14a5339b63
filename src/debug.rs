//! Logging bridge for glyphword.
//!
//! Routes every `log::info!()` etc. from the workspace crates to stderr as
//! timestamped lines, keeping stdout free for SVG output:
//!
//! ```text
//! [1718030000.123456] [INFO ] [glyphword_fonts::font_resource] Loaded font ...
//! ```
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config's
//! `log_level`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use glyphword_config::LogLevel;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// `log::Log` implementation writing formatted records to a sink.
pub struct LogBridge {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl LogBridge {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    // The `log` macros filter on `max_level` before calling in.
    fn log(&self, record: &Record<'_>) {
        let line = format_record(&get_timestamp(), record);
        let mut sink = self.sink.lock();
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Install the stderr bridge and set the global max level.
///
/// Returns the level in effect. Calling it again only updates the level.
pub fn init_log_bridge(cli_level: Option<LevelFilter>, config_level: LogLevel) -> LevelFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), config_level);

    if log::set_logger(BRIDGE.get_or_init(LogBridge::stderr)).is_err() {
        log::debug!("Log bridge already installed");
    }
    log::set_max_level(level);
    level
}

/// Pick the effective level: CLI flag, then `RUST_LOG`, then config.
///
/// `RUST_LOG` may be a bare level (`debug`) or `target=level` directives; the
/// most verbose level named wins. Unparseable values are ignored.
pub fn resolve_level(
    cli_level: Option<LevelFilter>,
    rust_log: Option<&str>,
    config_level: LogLevel,
) -> LevelFilter {
    if let Some(level) = cli_level {
        return level;
    }
    if let Some(level) = rust_log.and_then(parse_rust_log) {
        return level;
    }
    config_level.to_level_filter()
}

fn parse_rust_log(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            level.trim().parse::<LevelFilter>().ok()
        })
        .max()
}

fn format_record(timestamp: &str, record: &Record<'_>) -> String {
    let level_str = match record.level() {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    format!(
        "[{}] [{}] [{}] {}\n",
        timestamp,
        level_str,
        record.target(),
        record.args()
    )
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}
