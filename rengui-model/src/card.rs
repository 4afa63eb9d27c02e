//! Action cards and the rule that recovers a card's kind from its fields.

use std::fmt;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTOR: &str = "New Actor";
pub const DEFAULT_TEXT: &str = "...";
pub const VIDEO_ACTOR: &str = "Video Clip";
pub const NO_VIDEO_TEXT: &str = "(No file selected)";

/// The three kinds of timeline entry the player understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    Dialogue,
    Video,
    Branch,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Dialogue, Kind::Video, Kind::Branch];

    /// Parses a persisted `type` tag. Unknown tags yield `None` so inference
    /// can fall through to the field shape.
    pub fn from_tag(tag: &str) -> Option<Kind> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "dialogue" => Some(Kind::Dialogue),
            "video" => Some(Kind::Video),
            "branch" => Some(Kind::Branch),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Kind::Dialogue => "dialogue",
            Kind::Video => "video",
            Kind::Branch => "branch",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Recovers a card's kind: a valid explicit tag wins, then non-empty choices
/// mean a branch, then a non-empty video means a cutscene, else dialogue.
pub fn infer_kind(tag: Option<&str>, video: &str, choices: &[Choice]) -> Kind {
    if let Some(kind) = tag.and_then(Kind::from_tag) {
        return kind;
    }
    if !choices.is_empty() {
        Kind::Branch
    } else if !video.is_empty() {
        Kind::Video
    } else {
        Kind::Dialogue
    }
}

/// One button of a branch card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "nextId")]
    pub next_id: String,
}

impl Choice {
    pub fn new(text: impl Into<String>, next_id: impl Into<String>) -> Self {
        Self { text: text.into(), next_id: next_id.into() }
    }
}

/// Session-local handle for a card. Allocated by the document, never
/// persisted, unaffected by reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub kind: Kind,
    pub actor: String,
    pub text: String,

    pub background: String,
    pub video: String,
    pub bgm: String,
    pub sfx: String,

    pub char_left: String,
    pub char_center: String,
    pub char_right: String,

    /// Free-text gate such as `love >= 100`. Stored and shown, never evaluated.
    pub condition: String,
    pub choices: Vec<Choice>,
}

impl Card {
    /// A fresh card carrying the creation defaults of its kind.
    pub fn new(id: CardId, kind: Kind) -> Self {
        let (actor, text) = match kind {
            Kind::Dialogue => (DEFAULT_ACTOR, DEFAULT_TEXT),
            Kind::Video => (VIDEO_ACTOR, NO_VIDEO_TEXT),
            Kind::Branch => ("", ""),
        };
        Self {
            id,
            kind,
            actor: actor.to_string(),
            text: text.to_string(),
            background: String::new(),
            video: String::new(),
            bgm: String::new(),
            sfx: String::new(),
            char_left: String::new(),
            char_center: String::new(),
            char_right: String::new(),
            condition: String::new(),
            choices: Vec::new(),
        }
    }

    /// The kind a reader would infer from the fields alone, ignoring `kind`.
    pub fn shape_kind(&self) -> Kind {
        infer_kind(None, &self.video, &self.choices)
    }

    /// Whether the persisted form needs an explicit tag to reload as `kind`.
    pub fn needs_tag(&self) -> bool {
        self.shape_kind() != self.kind
    }

    /// Field-wise equality that ignores the session-local id.
    pub fn same_content(&self, other: &Card) -> bool {
        Card { id: other.id, ..self.clone() } == *other
    }
}
