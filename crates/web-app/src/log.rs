use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

/// Maximum number of persisted log entries.
pub const CAPACITY: usize = 100;

pub trait Service {
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn add_log_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Put an entry in front of the most recent entries, dropping the oldest ones.
pub fn push_entry(entries: &mut VecDeque<Entry>, entry: Entry) {
    entries.push_front(entry);
    entries.truncate(CAPACITY);
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(storage: Arc<Mutex<dyn Repository>>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        write_console(record.level(), &message);

        let Ok(log) = LOG.lock() else {
            return;
        };
        if let Some(ref repository) = *log {
            if let Ok(repository) = repository.lock() {
                let _ = repository.write_entry(Entry {
                    time: Utc::now().format("%b %d %H:%M:%S").to_string(),
                    level: record.level(),
                    message,
                });
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, message: &str) {
    match level {
        Level::Error => gloo_console::error!(message.to_string()),
        Level::Warn => gloo_console::warn!(message.to_string()),
        Level::Info => gloo_console::info!(message.to_string()),
        Level::Debug | Level::Trace => gloo_console::debug!(message.to_string()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_: Level, _: &str) {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Entries(Mutex<VecDeque<Entry>>);

    impl Repository for Entries {
        fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn write_entry(&self, entry: Entry) -> Result<(), Error> {
            push_entry(&mut self.0.lock().unwrap(), entry);
            Ok(())
        }
    }

    fn entry(message: &str) -> Entry {
        Entry {
            time: "Jan 01 10:00:00".to_string(),
            level: Level::Info,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_push_entry() {
        let mut entries = VecDeque::new();

        for i in 0..=CAPACITY {
            push_entry(&mut entries, entry(&i.to_string()));
        }

        assert_eq!(entries.len(), CAPACITY);
        assert_eq!(entries.front().map(|e| e.message.as_str()), Some("100"));
        assert_eq!(entries.back().map(|e| e.message.as_str()), Some("1"));
    }

    #[test]
    fn test_logger_persists_entries() {
        let repository = Arc::new(Mutex::new(Entries::default()));
        init(repository.clone()).unwrap();

        log::error!("failed to load sheets");
        log::trace!("not persisted");

        let entries = repository.lock().unwrap().read_entries().unwrap();
        let persisted = entries
            .iter()
            .find(|e| e.message == "failed to load sheets")
            .unwrap();
        assert_eq!(persisted.level, Level::Error);
        assert!(!persisted.time.is_empty());
        assert!(entries.iter().all(|e| e.message != "not persisted"));
        assert!(entries.len() <= CAPACITY);
    }
}
