//! Entry store contract and JSON file implementation.
//!
//! # Responsibility
//! - Load and save the full record set as one JSON array.
//! - Provide append/delete as reload, mutate, full rewrite.
//!
//! # Invariants
//! - A missing or blank file is the empty record set, not an error.
//! - Saves replace the file atomically (temp file in the same directory, then rename).
//! - Deletion matches `date` byte-for-byte and removes only the first match.

use crate::model::entry::{DietEntry, EntryValidationError, RecordSet};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Storage exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// Storage content is not a JSON array of entries.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Storage could not be written or replaced.
    Write { path: PathBuf, source: io::Error },
    /// Record set could not be encoded.
    Encode(serde_json::Error),
    /// Entry rejected before it was written.
    Validation(EntryValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "malformed diet data in `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode diet data: {err}"),
            Self::Validation(err) => write!(f, "invalid diet entry: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Durable storage for the record set.
///
/// Implementors provide whole-set `load`/`save`; `append` and
/// `delete_by_date` are defined on top of them.
pub trait EntryStore {
    /// Reads every stored entry in insertion order.
    fn load(&self) -> StoreResult<RecordSet>;

    /// Replaces the stored set with `entries`.
    fn save(&self, entries: &[DietEntry]) -> StoreResult<()>;

    /// Validates `entry`, then appends it as the last stored entry.
    ///
    /// Returns the number of stored entries after the append.
    fn append(&self, entry: &DietEntry) -> StoreResult<usize> {
        entry.validate()?;
        let mut entries = self.load()?;
        entries.push(entry.clone());
        self.save(&entries)?;
        info!(
            "event=entry_append module=store status=ok entries={}",
            entries.len()
        );
        Ok(entries.len())
    }

    /// Removes the first entry whose `date` equals `date` exactly.
    ///
    /// Returns `false` (and leaves storage untouched) when nothing matches.
    fn delete_by_date(&self, date: &str) -> StoreResult<bool> {
        let mut entries = self.load()?;
        let Some(index) = entries.iter().position(|entry| entry.date == date) else {
            info!("event=entry_delete module=store status=not_found");
            return Ok(false);
        };
        entries.remove(index);
        self.save(&entries)?;
        info!(
            "event=entry_delete module=store status=ok entries={}",
            entries.len()
        );
        Ok(true)
    }
}

/// Entry store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonEntryStore {
    path: PathBuf,
}

impl JsonEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, payload: &[u8]) -> StoreResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|err| self.write_error(err))?;

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| self.write_error(err))?;
        staged
            .write_all(payload)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| self.write_error(err))?;
        // Staged files are created 0600; keep the mode of the file being replaced.
        if let Ok(existing) = fs::metadata(&self.path) {
            staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|err| self.write_error(err))?;
        }
        staged
            .persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;
        Ok(())
    }
}

impl EntryStore for JsonEntryStore {
    fn load(&self) -> StoreResult<RecordSet> {
        let started_at = Instant::now();
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=store_load module=store status=ok entries=0 state=absent");
                return Ok(Vec::new());
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error error_code=read_failed error={}",
                    source
                );
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            info!("event=store_load module=store status=ok entries=0 state=empty");
            return Ok(Vec::new());
        }

        match serde_json::from_str::<RecordSet>(&raw) {
            Ok(entries) => {
                info!(
                    "event=store_load module=store status=ok entries={} duration_ms={}",
                    entries.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(entries)
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error error_code=malformed line={} column={}",
                    source.line(),
                    source.column()
                );
                Err(StoreError::Malformed {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn save(&self, entries: &[DietEntry]) -> StoreResult<()> {
        let started_at = Instant::now();
        let payload = serde_json::to_vec_pretty(entries).map_err(StoreError::Encode)?;

        match self.write_atomically(&payload) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok entries={} duration_ms={}",
                    entries.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error error_code=write_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
