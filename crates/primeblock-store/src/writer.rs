use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Tuning for the advisory-lock acquisition loop.
#[derive(Clone, Debug)]
pub struct WriterConfig {
    /// Total time to keep retrying a contended lock before giving up
    /// (default: 5 s).
    pub lock_deadline: Duration,
    /// Upper bound for the randomized pause between lock attempts
    /// (default: 100 ms).
    pub max_backoff: Duration,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            lock_deadline: Duration::from_secs(5),
            max_backoff: Duration::from_millis(100),
        }
    }
}

/// Durable, mutually-exclusive whole-file writer.
///
/// Every durable artifact (the checkpoint and the block files) reaches
/// disk through this type. The destination is opened without truncation,
/// an exclusive advisory lock is acquired with randomized backoff and a
/// bounded deadline, and only then is the file truncated and rewritten.
/// A contended lock that never frees up yields [`StoreError::LockTimeout`]
/// with the old content intact.
///
/// Locks are scoped per destination path; writers to different paths never
/// contend with each other.
#[derive(Clone, Debug, Default)]
pub struct LockedWriter {
    config: WriterConfig,
}

impl LockedWriter {
    /// Writer with the default deadline and backoff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with explicit lock tuning.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Replace the contents of `path` with `bytes` under an exclusive
    /// advisory lock.
    ///
    /// Creates the parent directory if missing. On success the file holds
    /// exactly `bytes` and has been fsynced; on [`StoreError::LockTimeout`]
    /// the previous contents are untouched.
    pub fn write(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        self.acquire(&file, path)?;
        let written = write_locked(&mut file, bytes);
        let unlocked = fs2::FileExt::unlock(&file);
        written?;
        unlocked?;

        debug!(path = %path.display(), bytes = bytes.len(), "file written");
        Ok(())
    }

    /// Acquire the exclusive lock, pausing 0..=`max_backoff` between
    /// attempts, until `lock_deadline` has elapsed.
    fn acquire(&self, file: &File, path: &Path) -> StoreResult<()> {
        let started = Instant::now();
        loop {
            match fs2::FileExt::try_lock_exclusive(file) {
                Ok(()) => return Ok(()),
                Err(err) if lock_contended(&err) => {
                    let waited = started.elapsed();
                    if waited >= self.config.lock_deadline {
                        warn!(path = %path.display(), ?waited, "exclusive lock timed out");
                        return Err(StoreError::LockTimeout {
                            path: path.to_path_buf(),
                            waited,
                        });
                    }
                    let pause = rand::thread_rng()
                        .gen_range(0..=self.config.max_backoff.as_millis() as u64);
                    thread::sleep(Duration::from_millis(pause));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Truncate and rewrite the locked file. Truncation is deferred to this
/// point so a writer that never obtains the lock cannot leave the
/// destination empty.
fn write_locked(file: &mut File, bytes: &[u8]) -> StoreResult<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

fn lock_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_writer() -> LockedWriter {
        LockedWriter::with_config(WriterConfig {
            lock_deadline: Duration::from_millis(200),
            max_backoff: Duration::from_millis(10),
        })
    }

    #[test]
    fn write_creates_file_and_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/out.txt");
        LockedWriter::new().write(&path, b"payload").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"payload");
    }

    #[test]
    fn write_replaces_longer_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let writer = LockedWriter::new();
        writer.write(&path, b"a much longer first payload").unwrap();
        writer.write(&path, b"short").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn timeout_leaves_old_content_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contended.txt");
        let writer = quick_writer();
        writer.write(&path, b"old content").unwrap();

        // Hold the lock from a second handle on the same path.
        let holder = OpenOptions::new().read(true).write(true).open(&path).unwrap();
        fs2::FileExt::lock_exclusive(&holder).unwrap();

        let err = writer.write(&path, b"new content").unwrap_err();
        assert!(matches!(err, StoreError::LockTimeout { .. }));
        assert_eq!(fs::read(&path).unwrap(), b"old content");

        fs2::FileExt::unlock(&holder).unwrap();
        writer.write(&path, b"new content").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new content");
    }

    #[test]
    fn racing_writers_leave_exactly_one_full_payload() {
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let path = Arc::new(dir.path().join("raced.txt"));
        let payload_a = vec![b'a'; 64 * 1024];
        let payload_b = vec![b'b'; 64 * 1024];

        let handles: Vec<_> = [payload_a.clone(), payload_b.clone()]
            .into_iter()
            .map(|payload| {
                let path = Arc::clone(&path);
                thread::spawn(move || LockedWriter::new().write(&path, &payload))
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread panicked").unwrap();
        }

        let contents = fs::read(path.as_path()).unwrap();
        assert!(contents == payload_a || contents == payload_b);
    }

    #[test]
    fn timeout_reports_path_and_wait() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        let writer = quick_writer();
        writer.write(&path, b"x").unwrap();

        let holder = OpenOptions::new().read(true).write(true).open(&path).unwrap();
        fs2::FileExt::lock_exclusive(&holder).unwrap();

        match writer.write(&path, b"y").unwrap_err() {
            StoreError::LockTimeout { path: p, waited } => {
                assert_eq!(p, path);
                assert!(waited >= Duration::from_millis(200));
            }
            other => panic!("expected LockTimeout, got {other}"),
        }
    }
}
