//! Disk-backed implementation of the [`Filesystem`] trait.

use crate::error::Result;
use crate::storage::{Filesystem, Owner};
use std::fs;
use std::path::Path;

/// Real filesystem operations with optional ownership handling.
#[derive(Debug, Clone, Default)]
pub struct DiskFilesystem;

impl DiskFilesystem {
    /// Create a disk filesystem collaborator.
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn apply_owner(path: &Path, owner: Option<Owner>) -> Result<()> {
        if let Some(owner) = owner {
            std::os::unix::fs::chown(path, Some(owner.uid), Some(owner.gid))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn apply_owner(_path: &Path, _owner: Option<Owner>) -> Result<()> {
        Ok(())
    }
}

impl Filesystem for DiskFilesystem {
    fn ensure_dir_exists(&self, path: &Path, owner: Option<Owner>) -> Result<()> {
        fs::create_dir_all(path)?;
        Self::apply_owner(path, owner)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn write_file_as_owner(
        &self,
        path: &Path,
        contents: &str,
        owner: Option<Owner>,
    ) -> Result<()> {
        fs::write(path, contents)?;
        Self::apply_owner(path, owner)
    }

    #[cfg(unix)]
    fn restrict_permissions(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_exists_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let fs = DiskFilesystem::new();
        let nested = dir.path().join("a/b/c");

        fs.ensure_dir_exists(&nested, None).unwrap();
        fs.ensure_dir_exists(&nested, None).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let fs = DiskFilesystem::new();
        let path = dir.path().join("note.txt");

        fs.write_file_as_owner(&path, "hello", None).unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_file(&path).unwrap(), "hello");
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let fs = DiskFilesystem::new();
        assert!(fs.read_file(&dir.path().join("absent")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_restrict_permissions_sets_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let fs = DiskFilesystem::new();
        let path = dir.path().join("secret.key");

        fs.write_file_as_owner(&path, "key material", None).unwrap();
        fs.restrict_permissions(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_remove_file() {
        let dir = TempDir::new().unwrap();
        let fs = DiskFilesystem::new();
        let path = dir.path().join("gone.txt");

        fs.write_file_as_owner(&path, "x", None).unwrap();
        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
    }
}
