//! Local filesystem attachment storage.
//!
//! Bytes are stored under the configured upload directory, keyed by the
//! opaque attachment id. The database keeps only metadata and the id.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Handle to the attachment directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (or create) the attachment directory.
    pub fn new(root: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }

    /// Write attachment bytes under the id.
    pub async fn save(&self, id: Uuid, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.path_for(id), bytes).await
    }

    /// Read attachment bytes. `None` when the id has no stored payload.
    pub async fn read(&self, id: Uuid) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Remove attachment bytes, ignoring ids that were never stored.
    pub async fn remove(&self, id: Uuid) -> io::Result<()> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_read_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let id = Uuid::now_v7();

        store.save(id, b"essay body").await.unwrap();
        assert_eq!(store.read(id).await.unwrap().unwrap(), b"essay body");

        store.remove(id).await.unwrap();
        assert!(store.read(id).await.unwrap().is_none());

        // Removing again is not an error.
        store.remove(id).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_id_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(store.read(Uuid::now_v7()).await.unwrap().is_none());
    }
}
