//! Size-rotated trace file.
//!
//! Lines are appended to one file. Once it grows past the limit it is shifted
//! to `<name>.1`, older backups move up by one (`.1` → `.2` ...) and the
//! oldest beyond the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Append-only line writer with numbered backups.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened on first write.
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Writer with the default 10 MB / 3 backups policy.
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// I/O failures from rotation, opening, or writing, and a poisoned lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        let current_len = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if current_len > self.max_bytes {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file not open"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    /// Path of backup number `n` (1 is the newest).
    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.max_backups))?;
        for n in (1..self.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rentdesk-otlp.json");
        let writer = RotatingFile::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rentdesk-otlp.json");
        let writer = RotatingFile::with_limits(path.clone(), 8, 2);

        for i in 0..5 {
            writer.write_line(&format!("line-{i}-padding")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-4-padding\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "line-3-padding\n");
        assert_eq!(fs::read_to_string(writer.backup_path(2)).unwrap(), "line-2-padding\n");
        assert!(!writer.backup_path(3).exists());
    }
}
