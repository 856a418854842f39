//! Intake journal for food and exercise entries.
//!
//! Entries are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access.

use crate::{Error, JournalEntry, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Journal sink trait for persisting entries
pub trait JournalSink {
    fn append(&mut self, entry: &JournalEntry) -> Result<()>;
}

/// JSONL-based journal with file locking
pub struct JsonlJournal {
    path: PathBuf,
}

impl JsonlJournal {
    /// Create a new JSONL journal for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl JournalSink for JsonlJournal {
    fn append(&mut self, entry: &JournalEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let torn_tail = !ends_with_newline(&file)?;

        let mut writer = std::io::BufWriter::new(&file);
        if torn_tail {
            tracing::warn!("Journal {:?} ends in a partial line, terminating it", self.path);
            writer.write_all(b"\n")?;
        }
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.sync_data()?;
        file.unlock()?;

        tracing::debug!("Appended entry {} ({}) to journal", entry.id, entry.name());
        Ok(())
    }
}

/// Whether the file is empty or its last byte is a newline
fn ends_with_newline(mut file: &File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Parse one raw journal line
fn parse_line(raw: &[u8], line_num: usize) -> Result<JournalEntry> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| Error::Journal(format!("line {} is not valid UTF-8: {}", line_num, e)))?;
    serde_json::from_str(text)
        .map_err(|e| Error::Journal(format!("line {} is not a valid entry: {}", line_num, e)))
}

/// Read all entries from a journal file
///
/// Blank lines are skipped. Lines that fail to parse (e.g. a torn write,
/// possibly cut inside a multi-byte character) are logged and skipped.
pub fn read_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut reader = BufReader::new(&file);
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut line_num = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_num += 1;

        if buf.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }

        match parse_line(&buf, line_num) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!("Skipping journal entry: {}", e),
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from journal", entries.len());
    Ok(entries)
}

/// Entries counting towards `day`, in the order they were logged
pub fn entries_for_day(path: &Path, day: NaiveDate) -> Result<Vec<JournalEntry>> {
    let entries = read_entries(path)?
        .into_iter()
        .filter(|e| e.day == day)
        .collect();
    Ok(entries)
}
