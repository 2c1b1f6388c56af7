//! JSON File Storage
//!
//! One pretty-printed JSON file per key inside a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::traits::{Storage, StorageError, StorageResult};

pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Open storage rooted at `dir`, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        log::debug!("JSON storage at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn io(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io(key, e)),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StorageError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| Self::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::io(key, e))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io(key, e)),
        }
    }

    /// Rename the file to `<key>.json.corrupt-<timestamp>`
    fn set_aside(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let aside = self.dir.join(format!("{}.json.corrupt-{}", key, stamp));
        fs::rename(&path, &aside).map_err(|e| Self::io(key, e))?;
        log::warn!("Moved unreadable {} to {}", path.display(), aside.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonFileStorage) {
        let dir = TempDir::new().expect("temp dir");
        let storage = JsonFileStorage::open(dir.path().join("data")).expect("open storage");
        (dir, storage)
    }

    #[test]
    fn test_missing_key_reads_none() {
        let (_dir, storage) = setup();
        assert!(storage.read("shortcuts").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let (_dir, storage) = setup();
        storage.write("clock", r#"{"format":"12h"}"#).unwrap();
        assert_eq!(storage.read("clock").unwrap().as_deref(), Some(r#"{"format":"12h"}"#));
        assert!(storage.path_for("clock").exists());
        assert!(!storage.path_for("clock").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, storage) = setup();
        storage.write("layout", "[]").unwrap();
        storage.remove("layout").unwrap();
        storage.remove("layout").unwrap();
        assert!(storage.read("layout").unwrap().is_none());
    }

    #[test]
    fn test_non_utf8_is_malformed() {
        let (_dir, storage) = setup();
        fs::write(storage.path_for("background"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            storage.read("background"),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_set_aside_keeps_corrupt_file() {
        let (_dir, storage) = setup();
        storage.write("view_state", "{not json").unwrap();
        storage.set_aside("view_state").unwrap();

        assert!(storage.read("view_state").unwrap().is_none());
        let moved: Vec<String> = fs::read_dir(storage.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("view_state.json.corrupt-"))
            .collect();
        assert_eq!(moved.len(), 1);
        let content = fs::read_to_string(storage.dir().join(&moved[0])).unwrap();
        assert_eq!(content, "{not json");
    }
}
