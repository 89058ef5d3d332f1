use crate::error::Result;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

pub const LOCK_FILE: &str = ".lock";

/// Exclusive advisory lock on one company partition, released on drop.
#[derive(Debug)]
pub struct CompanyLock {
    file: File,
}

impl CompanyLock {
    pub fn acquire(company_dir: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(company_dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for CompanyLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %err, "failed to release company lock");
        }
    }
}
