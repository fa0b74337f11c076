use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};

/// On-disk record of the tab strip: note paths in display order plus the
/// index of the tab that was active. `-1` means no tab was active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabOrder {
    pub files: Vec<String>,
    pub last_active: i64,
}

impl TabOrder {
    pub fn new(files: Vec<String>, active: Option<usize>) -> Self {
        Self {
            files,
            last_active: active.map_or(-1, |i| i as i64),
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        usize::try_from(self.last_active).ok()
    }

    /// Listed paths whose files still exist, in order. `last_active` is left
    /// pointing into the unfiltered list.
    pub fn existing_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(PathBuf::from)
            .filter(|p| p.is_file())
            .collect()
    }
}

/// The sidecar file that persists a [`TabOrder`].
#[derive(Debug, Clone)]
pub struct TabOrderConfig {
    path: PathBuf,
}

impl TabOrderConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(notes_dir: &Path, file_name: &str) -> Self {
        Self::new(notes_dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<TabOrder>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(NoteError::io(&self.path, e)),
        };
        let order = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            NoteError::MalformedConfig {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(Some(order))
    }

    pub fn save(&self, order: &TabOrder) -> Result<()> {
        let file = fs::File::create(&self.path).map_err(|e| NoteError::io(&self.path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, order)
            .map_err(io::Error::other)
            .and_then(|_| writer.flush())
            .map_err(|e| NoteError::io(&self.path, e))?;
        Ok(())
    }
}
