//! Single-instance enforcement.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Lock file name placed in the temp directory.
pub const LOCK_FILE_NAME: &str = "bgn_eur_converter.lock";

/// Capability checked once at process start.
pub trait InstanceGuard {
    /// Claims the instance slot. False when another instance holds it.
    fn try_acquire(&mut self) -> bool;

    /// Gives the slot back. Safe to call when not held.
    fn release(&mut self);
}

/// Guard backed by an exclusively created lock file holding the owner's PID.
#[derive(Debug)]
pub struct LockFileGuard {
    path: PathBuf,
    held: bool,
}

impl LockFileGuard {
    /// Creates a guard for `path`. Nothing is touched until acquired.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            held: false,
        }
    }

    /// Guard on `<tmp>/bgn_eur_converter.lock`.
    #[must_use]
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join(LOCK_FILE_NAME))
    }

    /// Lock file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this guard holds the lock.
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }
}

impl InstanceGuard for LockFileGuard {
    fn try_acquire(&mut self) -> bool {
        if self.held {
            return true;
        }
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path);
        match file {
            Ok(mut file) => {
                if let Err(err) = write!(file, "{}", std::process::id()) {
                    warn!(error = %err, "could not record pid in lock file");
                }
                self.held = true;
                debug!(path = %self.path.display(), "instance lock acquired");
                true
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %self.path.display(), "another instance holds the lock");
                false
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "instance lock unavailable");
                false
            }
        }
    }

    fn release(&mut self) {
        if !self.held {
            return;
        }
        if let Err(err) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %err, "could not remove lock file");
        }
        self.held = false;
    }
}

impl Drop for LockFileGuard {
    fn drop(&mut self) {
        self.release();
    }
}
