use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{NoteError, Result};

/// Plain-text storage for a single note file.
///
/// The file is only created by the first `save`; loading a note that was
/// never written yields empty content and leaves the disk untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(NoteError::io(&self.path, e)),
        }
    }

    /// Replace the whole file with `text`.
    pub fn save(&self, text: &str) -> Result<()> {
        fs::write(&self.path, text).map_err(|e| NoteError::io(&self.path, e))?;
        log::debug!("saved {} ({} bytes)", self.path.display(), text.len());
        Ok(())
    }

    /// Returns `false` when there was no file to remove.
    pub fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NoteError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_is_empty_and_creates_nothing() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("ideas.txt"));

        assert_eq!(store.load().unwrap(), "");
        assert!(!store.exists());
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("ideas.txt"));

        store.save("first draft, rather long").unwrap();
        store.save("short").unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "short");
        assert_eq!(store.load().unwrap(), "short");
    }

    #[test]
    fn test_save_keeps_trailing_newlines() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("list.txt"));

        store.save("milk\neggs\n\n").unwrap();
        assert_eq!(store.load().unwrap(), "milk\neggs\n\n");
    }

    #[test]
    fn test_delete_reports_missing_file() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("gone.txt"));

        assert!(!store.delete().unwrap());
        store.save("x").unwrap();
        assert!(store.delete().unwrap());
        assert!(!store.exists());
    }

    #[test]
    fn test_save_into_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("nope").join("a.txt"));

        match store.save("x") {
            Err(NoteError::Io { path, .. }) => assert_eq!(path, store.path()),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_name() {
        let store = NoteStore::new("/tmp/notes/todo.txt");
        assert_eq!(store.file_name(), "todo.txt");
    }
}
