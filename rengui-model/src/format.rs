//! Persisted `story.json` layout.
//!
//! Every section is optional on the way in and numeric fields tolerate `null`
//! or a wrong JSON type (older editors wrote `NaN` as `null`), falling back to
//! the documented defaults instead of rejecting the whole file.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::card::{infer_kind, Card, CardId, Choice};
use crate::document::{SystemConfig, UiConfig};

fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_or_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(de)?.unwrap_or_default())
}

/// Keeps every list item that parses; a malformed item is logged and skipped
/// so one bad card cannot take its siblings down with it.
fn lenient_items<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(items_of(Option::<Value>::deserialize(de)?))
}

fn lenient_item_list<'de, D, T>(de: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(de)?.map(|v| items_of(Some(v))))
}

fn items_of<T: DeserializeOwned>(value: Option<Value>) -> Vec<T> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    log::warn!("Skipping malformed {} at index {}: {}", short_type::<T>(), i, e);
                    None
                }
            })
            .collect(),
        Some(other) => {
            log::warn!("Expected a list of {}, found {}; treating as empty", short_type::<T>(), other);
            Vec::new()
        }
    }
}

fn short_type<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<u32>,
    /// Pre-`system` documents kept the game title at the top level.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub system: Option<RawSystem>,
    #[serde(default, deserialize_with = "lenient")]
    pub ui: Option<RawUi>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub variables: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_item_list")]
    pub scenes: Option<Vec<RawScene>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSystem {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub screen_width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub screen_height: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUi {
    #[serde(default, deserialize_with = "lenient")]
    pub box_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub box_opacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub box_height: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RawScene {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_items")]
    pub dialogues: Vec<RawCard>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    #[serde(
        rename = "type",
        alias = "kind",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub actor: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub background: String,
    #[serde(default, deserialize_with = "lenient_or_default", skip_serializing_if = "String::is_empty")]
    pub video: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub bgm: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub sfx: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub char_left: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub char_center: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub char_right: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub condition: String,
    #[serde(default, deserialize_with = "lenient_items", skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl RawCard {
    /// Normalizes a persisted card, assigning its kind once.
    pub fn into_card(self, id: CardId) -> Card {
        let kind = infer_kind(self.tag.as_deref(), &self.video, &self.choices);
        Card {
            id,
            kind,
            actor: self.actor,
            text: self.text,
            background: self.background,
            video: self.video,
            bgm: self.bgm,
            sfx: self.sfx,
            char_left: self.char_left,
            char_center: self.char_center,
            char_right: self.char_right,
            condition: self.condition,
            choices: self.choices,
        }
    }
}

impl From<&Card> for RawCard {
    fn from(card: &Card) -> Self {
        Self {
            // Only written when the field shape alone would reload as another kind.
            tag: card.needs_tag().then(|| card.kind.as_tag().to_string()),
            actor: card.actor.clone(),
            text: card.text.clone(),
            background: card.background.clone(),
            video: card.video.clone(),
            bgm: card.bgm.clone(),
            sfx: card.sfx.clone(),
            char_left: card.char_left.clone(),
            char_center: card.char_center.clone(),
            char_right: card.char_right.clone(),
            condition: card.condition.clone(),
            choices: card.choices.clone(),
        }
    }
}

impl RawSystem {
    pub fn resolve(self, legacy_title: Option<String>) -> SystemConfig {
        let def = SystemConfig::default();
        SystemConfig {
            title: non_empty(self.title)
                .or_else(|| non_empty(legacy_title))
                .unwrap_or(def.title),
            screen_width: self.screen_width.filter(|w| *w > 0).unwrap_or(def.screen_width),
            screen_height: self.screen_height.filter(|h| *h > 0).unwrap_or(def.screen_height),
        }
    }
}

impl From<&SystemConfig> for RawSystem {
    fn from(sys: &SystemConfig) -> Self {
        Self {
            title: Some(sys.title.clone()),
            screen_width: Some(sys.screen_width),
            screen_height: Some(sys.screen_height),
        }
    }
}

impl RawUi {
    pub fn resolve(self) -> UiConfig {
        let def = UiConfig::default();
        UiConfig {
            box_color: non_empty(self.box_color).unwrap_or(def.box_color),
            text_color: non_empty(self.text_color).unwrap_or(def.text_color),
            box_opacity: self
                .box_opacity
                .filter(|o| UiConfig::valid_opacity(*o))
                .unwrap_or(def.box_opacity),
            box_height: self.box_height.filter(|h| *h > 0).unwrap_or(def.box_height),
            font_size: self.font_size.filter(|s| *s > 0).unwrap_or(def.font_size),
        }
    }
}

impl From<&UiConfig> for RawUi {
    fn from(ui: &UiConfig) -> Self {
        Self {
            box_color: Some(ui.box_color.clone()),
            box_opacity: Some(ui.box_opacity),
            text_color: Some(ui.text_color.clone()),
            box_height: Some(ui.box_height),
            font_size: Some(ui.font_size),
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}
