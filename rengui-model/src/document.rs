//! The story document: presentation config plus the ordered scenes.
//!
//! Only the first scene is editable. Any further scenes are kept as loaded
//! and written back unchanged, since branch choices point at them by id.

use serde_json::{Map, Value};

use crate::card::{Card, CardId, Kind};
use crate::error::DocumentError;
use crate::format::{RawDocument, RawScene, RawSystem, RawUi};

pub const FORMAT_VERSION: u32 = 1;
pub const DEFAULT_SCENE_ID: &str = "scene_01";

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            title: "RenGui Game".into(),
            screen_width: 1280,
            screen_height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub box_color: String,
    pub text_color: String,
    pub box_opacity: f64, // 0.0 ~ 1.0
    pub box_height: u32,
    pub font_size: u32,
}

impl UiConfig {
    pub fn valid_opacity(value: f64) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            box_color: "#000000".into(),
            text_color: "#FFFFFF".into(),
            box_opacity: 0.7,
            box_height: 200,
            font_size: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: String,
    pub cards: Vec<Card>,
}

impl Scene {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), cards: Vec::new() }
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct StoryDocument {
    pub system: SystemConfig,
    pub ui: UiConfig,
    /// Global story variables. Not edited here, carried through as loaded.
    pub variables: Map<String, Value>,
    // Never empty: index 0 is the editable scene.
    scenes: Vec<Scene>,
    next_id: u64,
}

impl Default for StoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryDocument {
    /// A new project: default config and one empty scene.
    pub fn new() -> Self {
        Self {
            system: SystemConfig::default(),
            ui: UiConfig::default(),
            variables: Map::new(),
            scenes: vec![Scene::new(DEFAULT_SCENE_ID)],
            next_id: 0,
        }
    }

    /// Hydrates a document, treating an empty or unreadable input as a new
    /// project. First runs have no story file, so this never fails.
    pub fn load(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(doc) => doc,
            Err(DocumentError::Empty) => {
                log::info!("No story data, starting a new project");
                Self::new()
            }
            Err(e) => {
                log::warn!("Story data unreadable ({}), starting a new project", e);
                Self::new()
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        if raw.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        let raw: RawDocument = serde_json::from_str(raw)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_raw(raw: RawDocument) -> Self {
        if let Some(version) = raw.version.filter(|v| *v != FORMAT_VERSION) {
            log::warn!("Story format version {} read as version {}", version, FORMAT_VERSION);
        }
        let mut doc = Self {
            system: raw.system.unwrap_or_default().resolve(raw.title),
            ui: raw.ui.unwrap_or_default().resolve(),
            variables: raw.variables,
            scenes: Vec::new(),
            next_id: 0,
        };

        for raw_scene in raw.scenes.unwrap_or_default() {
            let cards = raw_scene
                .dialogues
                .into_iter()
                .map(|rc| {
                    let id = doc.allocate_id();
                    rc.into_card(id)
                })
                .collect();
            let id = if raw_scene.id.is_empty() {
                format!("scene_{:02}", doc.scenes.len() + 1)
            } else {
                raw_scene.id
            };
            doc.scenes.push(Scene { id, cards });
        }

        if doc.scenes.is_empty() {
            doc.scenes.push(Scene::new(DEFAULT_SCENE_ID));
        }

        log::info!(
            "Loaded story '{}': {} scene(s), {} editable card(s)",
            doc.system.title,
            doc.scenes.len(),
            doc.scene().cards.len()
        );
        doc
    }

    /// Always `FORMAT_VERSION`: documents are written in the current layout
    /// whatever version they were read from.
    pub fn version(&self) -> u32 {
        FORMAT_VERSION
    }

    pub fn to_raw(&self) -> RawDocument {
        RawDocument {
            version: Some(FORMAT_VERSION),
            title: None,
            system: Some(RawSystem::from(&self.system)),
            ui: Some(RawUi::from(&self.ui)),
            variables: self.variables.clone(),
            scenes: Some(
                self.scenes
                    .iter()
                    .map(|s| RawScene {
                        id: s.id.clone(),
                        dialogues: s.cards.iter().map(Into::into).collect(),
                    })
                    .collect(),
            ),
        }
    }

    /// Serializes to the indented JSON the player reads.
    pub fn save(&self) -> Result<String, DocumentError> {
        let json = serde_json::to_string_pretty(&self.to_raw())?;
        log::debug!("Serialized story: {} bytes, {} card(s)", json.len(), self.scene().cards.len());
        Ok(json)
    }

    /// The editable scene.
    pub fn scene(&self) -> &Scene {
        &self.scenes[0]
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scenes[0]
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn cards(&self) -> &[Card] {
        &self.scene().cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.scene().cards.iter().find(|c| c.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.scene_mut().cards.iter_mut().find(|c| c.id == id)
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.scene().position(id)
    }

    /// Appends a card with the creation defaults of `kind`.
    pub fn add_card(&mut self, kind: Kind) -> CardId {
        let id = self.allocate_id();
        self.scene_mut().cards.push(Card::new(id, kind));
        log::debug!("Added {} card {}", kind, id);
        id
    }

    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let pos = self.position(id)?;
        Some(self.scene_mut().cards.remove(pos))
    }

    fn allocate_id(&mut self) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_soft_fails_to_new_project() {
        for raw in ["", "   ", "{ not json", "42"] {
            let doc = StoryDocument::load(raw);
            assert_eq!(doc.system, SystemConfig::default());
            assert_eq!(doc.scene().id, DEFAULT_SCENE_ID);
            assert!(doc.cards().is_empty());
        }
        assert!(matches!(StoryDocument::parse(""), Err(DocumentError::Empty)));
        assert!(matches!(StoryDocument::parse("nope"), Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let doc = StoryDocument::parse(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(doc.system.title, "RenGui Game");
        assert_eq!((doc.system.screen_width, doc.system.screen_height), (1280, 720));
        assert_eq!(doc.ui, UiConfig::default());
        assert_eq!(doc.scenes().len(), 1);
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut doc = StoryDocument::new();
        let a = doc.add_card(Kind::Dialogue);
        let b = doc.add_card(Kind::Video);
        assert_ne!(a, b);
        assert_eq!(doc.remove_card(a).map(|c| c.kind), Some(Kind::Dialogue));
        let c = doc.add_card(Kind::Branch);
        assert_ne!(c, a);
        assert_eq!(doc.position(b), Some(0));
        assert_eq!(doc.remove_card(a), None);
    }
}
