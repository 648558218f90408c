use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use fs4::fs_std::FileExt;
use ohno::{IntoAppError, bail};
use std::fs::{File, OpenOptions};

const LOG_TARGET: &str = "    record";

/// Exclusive claim on one named record, released when dropped.
///
/// Two runs writing the same record would overwrite each other's checkpoints, so a record
/// that is already claimed is reported instead of waited on.
#[derive(Debug)]
pub struct RecordLockGuard {
    file: File,
    name: String,
    path: Utf8PathBuf,
}

impl RecordLockGuard {
    /// The lock file backing this claim.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Drop for RecordLockGuard {
    fn drop(&mut self) {
        match FileExt::unlock(&self.file) {
            Ok(()) => log::debug!(target: LOG_TARGET, "Released record '{}'", self.name),
            Err(e) => log::warn!(target: LOG_TARGET, "Could not release record '{}' at '{}': {e:#}", self.name, self.path),
        }
    }
}

/// Claim the record called `name` in `dir` through the lock file `<name>.lock`.
///
/// Fails immediately when another process, or another store in this one, holds the record.
pub fn acquire_record_lock(dir: &Utf8Path, name: &str) -> Result<RecordLockGuard> {
    let path = dir.join(format!("{name}.lock"));

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)
        .into_app_err_with(|| format!("opening lock file for record '{name}' at '{path}'"))?;

    let acquired = file
        .try_lock_exclusive()
        .into_app_err_with(|| format!("locking record '{name}' at '{path}'"))?;
    if !acquired {
        bail!("record '{name}' is in use by another lang-rank run (lock file '{path}')");
    }

    log::debug!(target: LOG_TARGET, "Claimed record '{name}' at '{path}'");
    Ok(RecordLockGuard {
        file,
        name: name.to_string(),
        path,
    })
}
