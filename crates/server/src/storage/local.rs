use std::path::{Component, Path, PathBuf};

use super::ObjectStore;

/// Filesystem store rooted at the upload directory. Keys map to relative paths.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, String> {
        let rel = Path::new(key);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(format!("Invalid object key: {key}"));
        }
        Ok(self.root.join(rel))
    }
}

impl ObjectStore for LocalObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, String> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))
    }

    async fn put(&self, key: &str, _content_type: &str, body: Vec<u8>) -> Result<(), String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to delete {}: {e}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("casebook-store-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn put_get_delete() {
        let root = scratch_dir("roundtrip");
        let store = LocalObjectStore::new(&root);

        store
            .put("legal-cases/1/a/notes.txt", "text/plain", b"hello".to_vec())
            .await
            .unwrap();
        assert_eq!(store.get("legal-cases/1/a/notes.txt").await.unwrap(), b"hello");

        store.delete("legal-cases/1/a/notes.txt").await.unwrap();
        assert!(store.get("legal-cases/1/a/notes.txt").await.is_err());
        // second delete is a no-op
        store.delete("legal-cases/1/a/notes.txt").await.unwrap();

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn rejects_escaping_keys() {
        let store = LocalObjectStore::new(scratch_dir("escape"));
        assert!(store.get("../secret").await.is_err());
        assert!(store.put("/abs/path", "text/plain", vec![]).await.is_err());
    }
}
