use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub story_path:  String,
    pub assets_path: String,
    pub log_path:    String,
    pub log_level:   String,
}

/// Asset folders, relative to `EditorConfig::assets_path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub images_dir:  String,
    pub sounds_dir:  String,
    pub sprites_dir: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            story_path:  "story.json".into(),
            assets_path: "assets/".into(),
            log_path:    "logs/".into(),
            log_level:   "info".into(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            images_dir:  "images".into(),
            sounds_dir:  "sounds".into(),
            sprites_dir: "sprites".into(),
        }
    }
}
