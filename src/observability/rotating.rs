//! Append-only line file with size-based rotation.
//!
//! When the active file grows past [`RotationPolicy::max_bytes`], it is shifted
//! to `<name>.1`, existing backups move up by one (`.1` → `.2`, ...), and
//! anything past [`RotationPolicy::max_backups`] is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Size threshold and retention for a [`RotatingFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MB per file, three backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Line writer shared between exporter calls.
///
/// The handle is opened lazily so construction never touches the filesystem.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error
    /// if a previous writer panicked while holding the lock.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        let size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if size > self.policy.max_bytes {
            *handle = None;
            self.shift_backups()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn shift_backups(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.policy.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_policy() -> RotationPolicy {
        RotationPolicy {
            max_bytes: 8,
            max_backups: 2,
        }
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let writer = RotatingFile::new(path.clone(), RotationPolicy::default());
        writer.append_line("one").unwrap();
        writer.append_line("two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn rotates_and_caps_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let writer = RotatingFile::new(path.clone(), small_policy());

        for line in ["first-line", "second-line", "third-line", "fourth-line"] {
            writer.append_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("t.json.1")).unwrap(), "third-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("t.json.2")).unwrap(), "second-line\n");
        assert!(!dir.path().join("t.json.3").exists());
    }
}
