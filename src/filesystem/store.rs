use crate::core::ports::ByteStore;
use crate::filesystem::secure::{touch_secure, write_with_backups_n};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub struct FileByteStore {
    path: PathBuf,
    backups: usize,
}

impl FileByteStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, backups: 0 }
    }

    pub fn new_with_backups(path: PathBuf, backups: usize) -> Self {
        Self { path, backups }
    }
}

impl ByteStore for FileByteStore {
    /// Reads the credential file, creating it empty on first use.
    fn read(&self) -> Result<Vec<u8>> {
        touch_secure(&self.path)?;
        fs::read(&self.path)
            .with_context(|| format!("Failed to read credential file {}", self.path.display()))
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        write_with_backups_n(&self.path, bytes, self.backups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_read_creates_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".ctfcred.yml");
        let store = FileByteStore::new(path.clone());
        assert!(store.read().unwrap().is_empty());
        assert!(path.is_file());
    }
}
