//! Audit log - append-only record of pool events
//!
//! One JSON object per line, in sequence order.

use crate::events::PoolEvent;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes pool events to a JSON-lines file
pub struct AuditWriter {
    writer: BufWriter<File>,
    entry_count: u64,
}

impl AuditWriter {
    /// Open (or create) the audit file at `path`, appending to existing content
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            entry_count: 0,
        })
    }

    /// Write a single event and flush it
    pub fn write_event(&mut self, event: &PoolEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.entry_count += 1;
        Ok(())
    }

    /// Number of entries written by this writer
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }
}
