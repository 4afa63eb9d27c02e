//! Selectable asset filenames for the edit form.
//!
//! The catalog hands back three flat lists. Images are split once more by
//! extension: the video container files become the cutscene choices and
//! everything else is a background.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::config::{CatalogConfig, EditorConfig};

pub const VIDEO_EXTENSION: &str = "ivf";

pub trait Catalog {
    fn list_images(&self) -> Result<Vec<String>>;
    fn list_sounds(&self) -> Result<Vec<String>>;
    fn list_sprites(&self) -> Result<Vec<String>>;
}

pub fn is_video(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(VIDEO_EXTENSION))
}

/// Splits an image listing into `(videos, backgrounds)`, keeping order.
pub fn classify(images: Vec<String>) -> (Vec<String>, Vec<String>) {
    images.into_iter().partition(|f| is_video(f))
}

/// Options offered by every selector of the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetOptions {
    pub videos: Vec<String>,
    pub backgrounds: Vec<String>,
    /// Shared by the BGM and SFX selectors.
    pub sounds: Vec<String>,
    /// Shared by the three character slots.
    pub sprites: Vec<String>,
}

impl AssetOptions {
    /// One pass over the catalog. A failing listing becomes an empty one so
    /// the form stays usable.
    pub fn fetch(catalog: &dyn Catalog) -> Self {
        let (videos, backgrounds) = classify(or_empty("images", catalog.list_images()));
        Self {
            videos,
            backgrounds,
            sounds: or_empty("sounds", catalog.list_sounds()),
            sprites: or_empty("sprites", catalog.list_sprites()),
        }
    }
}

fn or_empty(what: &str, listing: Result<Vec<String>>) -> Vec<String> {
    listing.unwrap_or_else(|e| {
        log::warn!("Catalog listing for {} failed: {:#}", what, e);
        Vec::new()
    })
}

/// Lists the files directly inside the configured asset folders.
pub struct DirCatalog {
    images: PathBuf,
    sounds: PathBuf,
    sprites: PathBuf,
}

impl DirCatalog {
    pub fn new(root: impl AsRef<Path>, dirs: &CatalogConfig) -> Self {
        let root = root.as_ref();
        log::info!("Asset catalog rooted at {:?}", root);
        Self {
            images: root.join(&dirs.images_dir),
            sounds: root.join(&dirs.sounds_dir),
            sprites: root.join(&dirs.sprites_dir),
        }
    }

    pub fn from_config() -> Self {
        let editor: EditorConfig = rengui_shared::config::get("editor");
        let dirs: CatalogConfig = rengui_shared::config::get("catalog");
        Self::new(&editor.assets_path, &dirs)
    }

    fn list(dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            anyhow::bail!("asset folder {:?} does not exist", dir);
        }
        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to read {:?}", dir))?;
            if entry.file_type().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        log::debug!("Listed {} file(s) in {:?}", names.len(), dir);
        Ok(names)
    }
}

impl Catalog for DirCatalog {
    fn list_images(&self) -> Result<Vec<String>> {
        Self::list(&self.images)
    }

    fn list_sounds(&self) -> Result<Vec<String>> {
        Self::list(&self.sounds)
    }

    fn list_sprites(&self) -> Result<Vec<String>> {
        Self::list(&self.sprites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extension() {
        assert!(is_video("op.ivf"));
        assert!(is_video("OP.IVF"));
        assert!(!is_video("ivf"));
        assert!(!is_video("op.ivf.png"));
        assert!(!is_video("school.png"));
    }

    #[test]
    fn test_classify_keeps_order() {
        let (videos, bgs) = classify(vec![
            "b.png".into(),
            "x.ivf".into(),
            "a.jpg".into(),
            "y.ivf".into(),
        ]);
        assert_eq!(videos, vec!["x.ivf", "y.ivf"]);
        assert_eq!(bgs, vec!["b.png", "a.jpg"]);
    }
}
