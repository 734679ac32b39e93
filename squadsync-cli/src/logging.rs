//! Subscriber setup and size-based rotation of the run log.
//!
//! Without a log file, events go to stderr so stdout stays clean for
//! reports. With one, the file is rotated when it exceeds [`MAX_LOG_BYTES`]
//! (keeping [`MAX_ROTATED_FILES`] copies: `run.log` → `run.log.1` → … →
//! `run.log.5`) and then opened for append.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use squadsync_core::config::LogSettings;

/// Maximum log file size before rotation (10 MiB).
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum number of rotated backup files to keep.
pub const MAX_ROTATED_FILES: usize = 5;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(log: &LogSettings) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&log.level)
            .with_context(|| format!("invalid log level '{}'", log.level))?,
    };

    let Some(path) = log.file.as_deref() else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init();
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    let rotation = rotate_if_needed(path, MAX_LOG_BYTES, MAX_ROTATED_FILES);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    match rotation {
        Ok(true) => tracing::info!(path = %path.display(), "log file rotated"),
        Ok(false) => {}
        Err(err) => tracing::warn!(path = %path.display(), error = %err, "log rotation failed"),
    }
    Ok(())
}

/// Rotate `log_path` if its size is at least `max_bytes`.
///
/// Shifts `<name>.<n>` to `<name>.<n+1>` (dropping the oldest), moves the
/// live file to `<name>.1`, and leaves `<name>` absent for the caller to
/// recreate. Returns `true` if rotation occurred; a missing file is not an
/// error.
pub fn rotate_if_needed(log_path: &Path, max_bytes: u64, max_files: usize) -> io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    if size < max_bytes || max_files == 0 {
        return Ok(false);
    }

    let oldest = numbered_path(log_path, max_files);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..max_files).rev() {
        let src = numbered_path(log_path, n);
        if src.exists() {
            fs::rename(&src, numbered_path(log_path, n + 1))?;
        }
    }
    fs::rename(log_path, numbered_path(log_path, 1))?;
    Ok(true)
}

/// `squadsync.log` + 2 → `squadsync.log.2`.
fn numbered_path(base: &Path, n: usize) -> PathBuf {
    let name = base
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("squadsync.log");
    base.with_file_name(format!("{name}.{n}"))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SMALL: u64 = 64;

    fn write_log(path: &Path, bytes: usize) {
        fs::write(path, vec![b'x'; bytes]).unwrap();
    }

    #[test]
    fn under_threshold_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("squadsync.log");
        write_log(&log, 10);
        assert!(!rotate_if_needed(&log, SMALL, 5).unwrap());
        assert!(log.exists());
        assert!(!numbered_path(&log, 1).exists());
    }

    #[test]
    fn oversized_file_moves_to_first_backup() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("squadsync.log");
        write_log(&log, SMALL as usize + 1);
        assert!(rotate_if_needed(&log, SMALL, 5).unwrap());
        assert!(!log.exists());
        assert_eq!(fs::metadata(numbered_path(&log, 1)).unwrap().len(), SMALL + 1);
    }

    #[test]
    fn backups_are_capped() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("squadsync.log");
        for n in 1..=3 {
            fs::write(numbered_path(&log, n), format!("rotated-{n}")).unwrap();
        }
        write_log(&log, SMALL as usize);
        assert!(rotate_if_needed(&log, SMALL, 3).unwrap());

        assert_eq!(fs::read_to_string(numbered_path(&log, 3)).unwrap(), "rotated-2");
        assert_eq!(fs::read_to_string(numbered_path(&log, 2)).unwrap(), "rotated-1");
        assert!(!numbered_path(&log, 4).exists());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(!rotate_if_needed(&dir.path().join("absent.log"), SMALL, 5).unwrap());
    }
}
