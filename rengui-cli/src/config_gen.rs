use std::fs;
use std::path::Path;
use serde::Serialize;
use rengui_editor::config::{CatalogConfig, EditorConfig};

#[derive(Serialize)]
struct FullConfig {
    editor: EditorConfig,
    catalog: CatalogConfig,
}

pub fn ensure_config_exists(path: &str) {
    if Path::new(path).exists() {
        return;
    }

    eprintln!("Creating default configuration at '{}'...", path);

    let default_config = FullConfig {
        editor: EditorConfig::default(),
        catalog: CatalogConfig::default(),
    };

    let toml_str = match toml::to_string_pretty(&default_config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to serialize default config: {}", e);
            return;
        }
    };

    if let Err(e) = fs::write(path, toml_str) {
        eprintln!("Failed to write config file: {}", e);
    }
}
