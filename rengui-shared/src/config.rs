//! Process-wide configuration store backed by a single `config.toml`.
//!
//! The file is read once; each crate pulls its own section out with [`get`]
//! and falls back to the section type's `Default` when the key is missing or
//! malformed.

use std::fs;
use std::path::Path;
use std::sync::RwLock;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use toml::Table;

static GLOBAL_CONFIG: OnceCell<RwLock<Table>> = OnceCell::new();

pub fn init<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();

    let content = if path.exists() {
        log::info!("Loading config from {:?}", path);
        fs::read_to_string(path)?
    } else {
        log::warn!("Config file not found at {:?}, using defaults.", path);
        String::new()
    };

    init_from_str(&content)
}

/// Installs an already-read configuration. Syntax errors degrade to an empty
/// table so every section resolves to its defaults.
pub fn init_from_str(content: &str) -> anyhow::Result<()> {
    let table: Table = toml::from_str(content).unwrap_or_else(|e| {
        log::error!("Config syntax error: {}, using empty config.", e);
        Table::new()
    });

    GLOBAL_CONFIG
        .set(RwLock::new(table))
        .map_err(|_| anyhow::anyhow!("Config already initialized"))?;

    Ok(())
}

#[cfg(test)]
fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

pub fn get<T: DeserializeOwned + Default>(key: &str) -> T {
    let Some(store) = GLOBAL_CONFIG.get() else {
        log::debug!("Config not initialized, section '[{}]' uses defaults.", key);
        return T::default();
    };
    let Ok(read_guard) = store.read() else {
        log::error!("Config lock poisoned, section '[{}]' uses defaults.", key);
        return T::default();
    };

    match read_guard.get(key) {
        Some(value) => value.clone().try_into().unwrap_or_else(|e| {
            log::warn!("Config section '[{}]' mismatch: {}. Using default.", key, e);
            T::default()
        }),
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(default)]
    struct Paths {
        story_path: String,
        depth: u32,
    }

    impl Default for Paths {
        fn default() -> Self {
            Self { story_path: "story.json".into(), depth: 1 }
        }
    }

    #[test]
    fn test_sections_and_fallbacks() {
        super::init_from_str(
            r#"
[paths]
story_path = "game/story.json"

[broken]
depth = "deep"
"#,
        )
        .unwrap();
        assert!(super::is_initialized());

        let paths: Paths = super::get("paths");
        assert_eq!(paths.story_path, "game/story.json");
        assert_eq!(paths.depth, 1);

        let missing: Paths = super::get("nowhere");
        assert_eq!(missing, Paths::default());

        let broken: Paths = super::get("broken");
        assert_eq!(broken, Paths::default());

        assert!(super::init_from_str("").is_err());
    }
}
