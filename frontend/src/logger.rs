//! `log` backend for the browser.
//!
//! Records go to the devtools console through `gloo-console` and are also
//! kept in a bounded in-memory buffer that the console panel renders.

use log::{Level, LevelFilter, Metadata, Record};
use std::cell::RefCell;

const MAX_ENTRIES: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: Level,
    pub line: String,
}

impl LogEntry {
    /// CSS class of the entry in the console panel.
    pub fn class(&self) -> &'static str {
        match self.level {
            Level::Error => "console-error",
            Level::Warn => "console-warn",
            Level::Info => "console-info",
            Level::Debug | Level::Trace => "console-debug",
        }
    }
}

thread_local! {
    static ENTRIES: RefCell<Vec<LogEntry>> = const { RefCell::new(Vec::new()) };
}

struct BrowserLogger;

impl log::Log for BrowserLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stamp: String = js_sys::Date::new_0().to_locale_time_string("en-US").into();
        let line = format!("[{}] {}", stamp, record.args());
        match record.level() {
            Level::Error => gloo_console::error!(line.clone()),
            Level::Warn => gloo_console::warn!(line.clone()),
            Level::Info => gloo_console::info!(line.clone()),
            Level::Debug => gloo_console::debug!(line.clone()),
            Level::Trace => gloo_console::log!(line.clone()),
        }
        // The panel only shows what a user would care about.
        if record.level() <= Level::Info {
            ENTRIES.with(|entries| {
                let mut entries = entries.borrow_mut();
                if entries.len() >= MAX_ENTRIES {
                    entries.remove(0);
                }
                entries.push(LogEntry {
                    level: record.level(),
                    line,
                });
            });
        }
    }

    fn flush(&self) {}
}

static LOGGER: BrowserLogger = BrowserLogger;

pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

/// Snapshot of the panel buffer, oldest first.
pub fn entries() -> Vec<LogEntry> {
    ENTRIES.with(|entries| entries.borrow().clone())
}

pub fn clear() {
    ENTRIES.with(|entries| entries.borrow_mut().clear());
}
