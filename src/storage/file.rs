//! Directory-backed key-value store.

use crate::storage::{KeyValueStore, StorageError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One JSON file per key inside a directory.
///
/// Writes replace the whole file atomically: the value goes to a temporary
/// file in the same directory which is then renamed over the target. If any
/// step fails the temporary file is dropped and removed, leaving the previous
/// value intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// Bytes outside `[A-Za-z0-9-]` are written as `_` plus two hex digits,
    /// so `recipes:v1` lives in `recipes_3Av1.json` and distinct keys never
    /// share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let mut pending = NamedTempFile::new_in(&self.dir)?;
        pending.write_all(value.as_bytes())?;
        pending.as_file().sync_all()?;
        pending
            .persist(self.path_for(key))
            .map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("recipes:v1").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("recipes:v1", "[]").unwrap();
        store.set("recipes:v1", "[1]").unwrap();

        assert_eq!(store.get("recipes:v1").unwrap().as_deref(), Some("[1]"));
        assert!(store.path_for("recipes:v1").ends_with("recipes_3Av1.json"));
    }

    #[test]
    fn similar_keys_use_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert_ne!(store.path_for("recipes:v1"), store.path_for("recipes_v1"));

        store.set("recipes:v1", "[1]").unwrap();
        store.set("recipes_v1", "[2]").unwrap();

        assert_eq!(store.get("recipes:v1").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("recipes_v1").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn no_temporary_files_are_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("a", "1").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a.json")]);
    }
}
