// ABOUTME: Audit sinks — where classified tool invocations end up.
// ABOUTME: FileAuditSink appends one line per record to a flat text file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::audit::record::AuditRecord;
use crate::error::Result;

/// Destination for audit records. Callers treat failures as non-fatal.
pub trait AuditSink {
    fn append(&mut self, record: &AuditRecord) -> Result<()>;
}

/// Collects records in memory.
impl AuditSink for Vec<AuditRecord> {
    fn append(&mut self, record: &AuditRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Appends records to a text file, creating its directory on first use.
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditSink {
    fn append(&mut self, record: &AuditRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.to_line())?;
        Ok(())
    }
}
