use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::errors::{ClientError, Result};

/// 基于 JSON 文件的键值存储
///
/// 文件内容是一个 `{ key: string }` 对象。每次写操作都会重写整个文件
/// （先写临时文件再 rename），写完才返回。
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("State file {} does not exist yet", self.path.display());
                return BTreeMap::new();
            }
            Err(e) => {
                warn!("Failed to read state file {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(slots) => slots,
            Err(e) => {
                warn!(
                    "State file {} is not a valid key-value object, ignoring it: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(slots)
            .map_err(|e| ClientError::storage(format!("Failed to serialize state: {}", e)))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| {
            ClientError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            ClientError::storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_all().remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut slots = self.read_all();
        slots.insert(key.to_string(), value.to_string());
        self.write_all(&slots)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut slots = self.read_all();
        if slots.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&slots)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get("recentLinks").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = FileStore::new(&path);
        store.set("recentLinks", "[]").unwrap();
        store.set("authToken", "tok").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("recentLinks").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("authToken").unwrap().as_deref(), Some("tok"));

        reopened.remove("recentLinks").unwrap();
        assert_eq!(store.get("recentLinks").unwrap(), None);
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn test_garbage_file_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("recentLinks").unwrap(), None);

        store.set("recentLinks", "[]").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("recentLinks"));
    }
}
