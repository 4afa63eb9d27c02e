//! Durable storage for the serialized story.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::EditorConfig;

pub trait Persistence {
    /// The stored document, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Stores a serialized document and returns a status message.
    fn save(&mut self, serialized: &str) -> Result<String>;
}

/// Keeps the story as an indented `story.json` on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config() -> Self {
        let cfg: EditorConfig = rengui_shared::config::get("editor");
        Self::new(cfg.story_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for FileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            log::info!("No story at {:?}", self.path);
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read story: {:?}", self.path))?;
        Ok(Some(content))
    }

    fn save(&mut self, serialized: &str) -> Result<String> {
        // Re-checked so a malformed payload never replaces a good file.
        let value: serde_json::Value =
            serde_json::from_str(serialized).context("Story payload is not valid JSON")?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create story: {:?}", self.path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &value)?;
        writer.flush()?;

        log::info!("Story saved to {:?}", self.path);
        Ok(format!("Saved {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("story.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested/story.json"));

        let msg = store.save(r#"{"version":1,"scenes":[]}"#).unwrap();
        assert!(msg.contains("story.json"));

        let loaded = store.load().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&loaded).unwrap();
        assert_eq!(value["version"], 1);
        assert!(loaded.contains('\n'));
    }

    #[test]
    fn test_invalid_payload_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("story.json"));
        store.save(r#"{"version":1}"#).unwrap();

        assert!(store.save("{ broken").is_err());
        let value: serde_json::Value = serde_json::from_str(&store.load().unwrap().unwrap()).unwrap();
        assert_eq!(value["version"], 1);
    }
}
