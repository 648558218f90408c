//! Durable checkpoint storage for records.

use super::record_lock::{RecordLockGuard, acquire_record_lock};
use super::{Record, RecordUpdate};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use ohno::{IntoAppError, app_err};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use tempfile::NamedTempFile;

const LOG_TARGET: &str = "    record";

/// Where a record is read from once and checkpointed to as it changes.
///
/// Stores make no promise of transactions; a failed `persist` is returned to the caller.
pub trait RecordStore {
    /// Read the record, creating an empty one when it is missing and `initialize` is set.
    fn load_or_init(&mut self, initialize: bool) -> Result<Record>;

    /// Durably apply a partial update to the stored record.
    fn persist(&mut self, update: RecordUpdate<'_>) -> Result<()>;
}

/// A record kept as one JSON document per name inside a data directory.
///
/// The store holds an exclusive lock on the record for as long as it is alive, so a second
/// store for the same record fails to open until this one is dropped.
#[derive(Debug)]
pub struct JsonFileStore {
    name: String,
    path: Utf8PathBuf,
    document: Option<Record>,
    _lock: RecordLockGuard,
}

impl JsonFileStore {
    /// Open the record called `name` in `dir`, creating the directory if needed.
    pub fn open(dir: &Utf8Path, name: &str) -> Result<Self> {
        fs::create_dir_all(dir).into_app_err_with(|| format!("unable to create data directory '{dir}'"))?;

        let lock = acquire_record_lock(dir, name)?;

        Ok(Self {
            name: name.to_string(),
            path: dir.join(format!("{name}.json")),
            document: None,
            _lock: lock,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Record>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to open record '{}'", self.path)),
        };

        let record = serde_json::from_reader(BufReader::new(file))
            .into_app_err_with(|| format!("unable to parse record '{}'", self.path))?;
        Ok(Some(record))
    }

    fn write(&self, record: &Record) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Utf8Path::new("."));
        let tmp = NamedTempFile::new_in(dir).into_app_err_with(|| format!("unable to create temporary file in '{dir}'"))?;

        let mut writer = BufWriter::new(tmp);

        #[cfg(debug_assertions)]
        let result = serde_json::to_writer_pretty(&mut writer, record);
        #[cfg(not(debug_assertions))]
        let result = serde_json::to_writer(&mut writer, record);

        result.into_app_err_with(|| format!("unable to serialize record '{}'", self.name))?;

        let tmp = writer
            .into_inner()
            .map_err(std::io::IntoInnerError::into_error)
            .into_app_err_with(|| format!("unable to flush record '{}'", self.name))?;
        let _ = tmp
            .persist(&self.path)
            .into_app_err_with(|| format!("unable to write record '{}'", self.path))?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load_or_init(&mut self, initialize: bool) -> Result<Record> {
        let record = match self.read()? {
            Some(record) => {
                log::debug!(target: LOG_TARGET, "Loaded record '{}' from '{}'", self.name, self.path);
                record
            }
            None if initialize => {
                let record = Record::default();
                self.write(&record)?;
                log::info!(target: LOG_TARGET, "Created record '{}' at '{}'", self.name, self.path);
                record
            }
            None => {
                return Err(app_err!(
                    "no record named '{}' found at '{}' and initialization was not requested",
                    self.name,
                    self.path
                ));
            }
        };

        self.document = Some(record.clone());
        Ok(record)
    }

    fn persist(&mut self, update: RecordUpdate<'_>) -> Result<()> {
        let mut document = match self.document.take() {
            Some(document) => document,
            None => self.read()?.unwrap_or_default(),
        };

        document.apply(&update);
        document.updated_at = Some(Utc::now());

        let result = self.write(&document);
        self.document = Some(document);
        result
    }
}
