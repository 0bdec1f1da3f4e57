use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

/// Number of entries kept by a repository.
pub const MAX_ENTRIES: usize = 100;

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

/// Prepend `entry` and drop the oldest entries beyond [`MAX_ENTRIES`].
pub fn push_entry(entries: &mut VecDeque<Entry>, entry: Entry) {
    entries.push_front(entry);
    entries.truncate(MAX_ENTRIES);
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(
    storage: Arc<Mutex<dyn Repository>>,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        eprintln!("[{}] {}: {message}", record.level(), record.target());
        if let Ok(log) = LOG.lock() {
            if let Some(repository) = log.as_ref() {
                if let Ok(repository) = repository.lock() {
                    let _ = repository.write_entry(Entry {
                        time: Local::now().format("%b %d %H:%M:%S").to_string(),
                        level: record.level(),
                        message,
                    });
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(message: &str) -> Entry {
        Entry {
            time: "May 01 12:00:00".to_string(),
            level: Level::Warn,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_push_entry() {
        let mut entries = VecDeque::new();

        for i in 0..=MAX_ENTRIES {
            push_entry(&mut entries, entry(&i.to_string()));
        }

        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries.front(), Some(&entry(&MAX_ENTRIES.to_string())));
        assert_eq!(entries.back(), Some(&entry("1")));
    }

    #[test]
    fn test_entry_serialization() {
        let json = serde_json::to_string(&entry("foo")).unwrap();

        assert_eq!(
            json,
            r#"{"time":"May 01 12:00:00","level":"Warn","message":"foo"}"#
        );
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), entry("foo"));
    }
}
