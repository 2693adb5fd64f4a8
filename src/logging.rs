//! A `log` backend that writes styled, column-aligned records.
//!
//! Each record is written as one line: an optional timestamp, the level name
//! padded to a fixed width and styled per level, the target, then the
//! message. Padding is applied to the plain level name before styling, so
//! the message column lines up no matter how long each level's escape
//! sequence is.

use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::macros::format_description;
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::style::Style;
use crate::sync::lock_recover;
use crate::terminal;
use crate::value::StyledValue;

/// Visible width of the level column.
const LEVEL_WIDTH: usize = 5;

/// Styled logger for the `log` crate.
///
/// ```
/// use log::LevelFilter;
/// use tablecloth::logging::TableLogger;
///
/// let logger = TableLogger::new()
///     .level(LevelFilter::Debug)
///     .show_time(false)
///     .colors(false);
/// // logger.init() installs it as the global logger.
/// # let _ = logger;
/// ```
pub struct TableLogger {
    out: Mutex<Box<dyn Write + Send>>,
    level: LevelFilter,
    show_time: bool,
    show_level: bool,
    show_target: bool,
    colors: bool,
    time_format: OwnedFormatItem,
}

impl TableLogger {
    /// Create a logger writing to stderr at `Info` level.
    #[must_use]
    pub fn new() -> Self {
        let time_format = OwnedFormatItem::from(format_description!("[hour]:[minute]:[second]"));
        Self {
            out: Mutex::new(Box::new(io::stderr())),
            level: LevelFilter::Info,
            show_time: true,
            show_level: true,
            show_target: false,
            colors: terminal::stderr_colors_enabled(),
            time_format,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Enable or disable the level column.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Enable or disable the target column.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Enable or disable escape sequences.
    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Override the time format. An unparsable format keeps the current one.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Write records to `out` instead of stderr.
    #[must_use]
    pub fn writer(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Mutex::new(Box::new(out));
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if a global logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn level_style(level: Level) -> Style {
        match level {
            Level::Trace => Style::parse("dim").unwrap_or_default(),
            Level::Debug => Style::parse("blue").unwrap_or_default(),
            Level::Info => Style::parse("green").unwrap_or_default(),
            Level::Warn => Style::parse("yellow").unwrap_or_default(),
            Level::Error => Style::parse("bold red").unwrap_or_default(),
        }
    }

    fn styled(&self, value: &StyledValue) -> String {
        if self.colors {
            value.render(0).0
        } else {
            value.render_plain(0).0
        }
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            line.push_str(&self.format_time());
            line.push(' ');
        }

        if self.show_level {
            let padded = format!("{:<LEVEL_WIDTH$}", record.level());
            let value = StyledValue::new(padded).style(Self::level_style(record.level()));
            line.push_str(&self.styled(&value));
            line.push(' ');
        }

        if self.show_target {
            let value = StyledValue::new(record.target()).style(Style::new().dim());
            line.push_str(&self.styled(&value));
            line.push(' ');
        }

        line.push_str(&record.args().to_string());
        line
    }
}

impl Default for TableLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for TableLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        let mut out = lock_recover(&self.out);
        // write failures are dropped
        let _ = writeln!(out, "{line}");
    }

    fn flush(&self) {
        let _ = lock_recover(&self.out).flush();
    }
}
