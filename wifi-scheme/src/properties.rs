/*!
 * Scheme state persistence
 * Flat `key=value` file holding the current interface, scheme and activity flag
 */

use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SchemeError};

pub const INTERFACE_CURRENT: &str = "interface_current";
pub const SCHEME_CURRENT: &str = "scheme_current";
pub const SCHEME_ACTIVE: &str = "scheme_active";

/// In-memory copy of the persisted state.
///
/// Keys are kept sorted so that serialisation order is stable. Keys read
/// from disk are never dropped, including ones this crate does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyRecord {
    entries: BTreeMap<String, String>,
}

impl PropertyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when the key is not set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn interface_current(&self) -> Option<&str> {
        self.get(INTERFACE_CURRENT)
    }

    pub fn scheme_current(&self) -> Option<&str> {
        self.get(SCHEME_CURRENT)
    }

    /// `None` if unset; any value other than `True` reads as inactive.
    pub fn scheme_active(&self) -> Option<bool> {
        self.get(SCHEME_ACTIVE).map(|v| v == "True")
    }

    pub fn set_scheme_active(&mut self, active: bool) {
        self.set(SCHEME_ACTIVE, if active { "True" } else { "False" });
    }

    /// Parse `key=value` lines, splitting on the first `=`. Blank lines are skipped.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut record = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => record.set(key, value),
                None => {
                    return Err(SchemeError::Parse {
                        line: index + 1,
                        content: line,
                    })
                }
            }
        }
        Ok(record)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for (key, value) in self.iter() {
            writeln!(writer, "{}={}", key, value)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// File-backed store for a [`PropertyRecord`].
///
/// There is no locking: concurrent writers race and the last rename wins.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    path: PathBuf,
}

impl PropertyStore {
    /// Create a store for `path`, creating an empty file (and its parent
    /// directories) if none exists yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        store.ensure_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Idempotent; an existing file is left untouched.
    pub fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&self.path)?;
        Ok(())
    }

    pub fn load(&self) -> Result<PropertyRecord> {
        let file = File::open(&self.path)?;
        let record = PropertyRecord::read_from(BufReader::new(file))?;
        debug!(path = %self.path.display(), keys = record.len(), "Loaded scheme state");
        Ok(record)
    }

    /// Replace the file contents with `record`.
    ///
    /// Written to a sibling temp file first and renamed into place, so a
    /// reader sees either the old or the new record.
    pub fn save(&self, record: &PropertyRecord) -> Result<()> {
        let tmp_path = self.tmp_path();
        let result = self.write_and_replace(&tmp_path, record);
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    /// Single property lookup; `None` if the key is absent.
    pub fn property(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).map(str::to_string))
    }

    fn write_and_replace(&self, tmp_path: &Path, record: &PropertyRecord) -> Result<()> {
        let file = File::create(tmp_path)?;
        let mut writer = BufWriter::new(file);
        record.write_to(&mut writer)?;
        writer.get_ref().sync_all()?;
        drop(writer);

        fs::rename(tmp_path, &self.path)?;
        debug!(path = %self.path.display(), keys = record.len(), "Saved scheme state");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("runningconfig"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
