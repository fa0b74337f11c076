use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder holding one file per note plus the tab sidecar.
    pub notes_dir: String,
    /// Extension appended to every note name.
    pub extension: String,
    pub sidecar: String,
    /// Note created when the folder has nothing to show.
    pub default_note: String,
    pub start_visible: bool,
    pub panel: PanelConfig,
    pub keys: KeyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Most terminals deliver ctrl+` as ctrl+space.
    pub toggle: String,
    pub new_note: String,
    pub delete_note: String,
    pub quit: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: Self::default_notes_dir().to_string_lossy().to_string(),
            extension: "txt".to_string(),
            sidecar: "config.json".to_string(),
            default_note: "notes".to_string(),
            start_visible: true,
            panel: PanelConfig::default(),
            keys: KeyConfig::default(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self { width: 72, height: 22 }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            toggle: "ctrl+space".to_string(),
            new_note: "ctrl+t".to_string(),
            delete_note: "ctrl+w".to_string(),
            quit: "ctrl+q".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(std::env::var("HOME").unwrap_or_default()).join(".config"))
            .join("jotter")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn log_path() -> PathBuf {
        Self::config_dir().join("jotter.log")
    }

    fn default_notes_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(std::env::var("HOME").unwrap_or_default()).join(".local/share"))
            .join("jotter")
            .join("notes")
    }

    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("invalid config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_or_create() -> Self {
        if Self::exists() {
            return Self::load();
        }
        let path = Self::config_path();
        let config = Self::default();
        if let Err(e) = config.save_to(&path) {
            log::warn!("could not write default config {}: {}", path.display(), e);
        }
        config
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, content)
    }

    pub fn notes_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.notes_dir).to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub foreground: Color,
    pub background: Color,
    pub muted: Color,
    pub border: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(126, 156, 216),
            foreground: Color::Rgb(220, 215, 186),
            background: Color::Rgb(22, 22, 29),
            muted: Color::Rgb(114, 113, 105),
            border: Color::Rgb(84, 84, 109),
            warning: Color::Rgb(255, 158, 59),
            error: Color::Rgb(232, 36, 36),
        }
    }
}
