//! Reading history: one JSON reading per line, appended in order.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tarot_core::Reading;
use tempfile::NamedTempFile;
use tracing::warn;

/// Append-only reading log.
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
}

impl History {
    /// History stored at `path`. Nothing is created until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one reading, creating the file and its directory if needed.
    pub fn append(&self, reading: &Reading) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(reading)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }

    /// Every saved reading, oldest first. Lines that fail to parse are
    /// skipped with a warning; a missing file is an empty history.
    pub fn load_all(&self) -> io::Result<Vec<Reading>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut readings = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(reading) => readings.push(reading),
                Err(e) => warn!(line = index + 1, error = %e, "skipping unreadable history entry"),
            }
        }
        Ok(readings)
    }

    /// The `n` most recent readings, oldest first.
    pub fn load_last(&self, n: usize) -> io::Result<Vec<Reading>> {
        let mut all = self.load_all()?;
        let skip = all.len().saturating_sub(n);
        Ok(all.split_off(skip))
    }

    /// Remove the `n` most recent readings. Returns how many were removed.
    ///
    /// Unreadable lines are dropped in the rewrite.
    pub fn delete_last(&self, n: usize) -> io::Result<usize> {
        let mut all = self.load_all()?;
        let removed = n.min(all.len());
        if removed == 0 {
            return Ok(0);
        }
        all.truncate(all.len() - removed);

        if all.is_empty() {
            self.clear()?;
            return Ok(removed);
        }

        self.rewrite(&all)?;
        Ok(removed)
    }

    /// Replace the log with `readings` via a sibling temp file and rename.
    fn rewrite(&self, readings: &[Reading]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        for reading in readings {
            serde_json::to_writer(&mut tmp, reading)?;
            tmp.write_all(b"\n")?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }

    /// Delete the history file.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
