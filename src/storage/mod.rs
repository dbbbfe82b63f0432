//! Filesystem collaborator.
//!
//! The certificate lifecycle only needs a handful of filesystem primitives,
//! expressed as the [`Filesystem`] trait so tests can observe or replace
//! them. [`fs::DiskFilesystem`] is the shipped implementation.

pub mod fs;

use crate::error::Result;
use std::path::Path;

/// File ownership to apply to created directories and files.
///
/// When the CLI runs under `sudo`, artifacts should still belong to the
/// invoking user, not root. Absent an owner, files keep the process default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    /// Numeric user id
    pub uid: u32,
    /// Numeric group id
    pub gid: u32,
}

impl Owner {
    /// Detect the invoking user behind a `sudo` call from `SUDO_UID` and
    /// `SUDO_GID`. Returns `None` when not running under sudo.
    pub fn from_sudo_env() -> Option<Self> {
        let uid = std::env::var("SUDO_UID").ok()?.parse().ok()?;
        let gid = std::env::var("SUDO_GID").ok()?.parse().ok()?;
        Some(Self { uid, gid })
    }
}

/// The filesystem operations the certificate lifecycle depends on.
pub trait Filesystem: Send + Sync {
    /// Create the directory tree if absent, applying ownership. Idempotent.
    fn ensure_dir_exists(&self, path: &Path, owner: Option<Owner>) -> Result<()>;

    /// Whether a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file to a string.
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Write a file, applying ownership.
    fn write_file_as_owner(&self, path: &Path, contents: &str, owner: Option<Owner>)
        -> Result<()>;

    /// Tighten a private-key file to owner-only access (0600 on unix).
    fn restrict_permissions(&self, path: &Path) -> Result<()>;

    /// Remove a file. Used to clean up partial artifacts after a failed
    /// issuance step.
    fn remove_file(&self, path: &Path) -> Result<()>;
}
