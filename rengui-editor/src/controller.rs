//! Edit and delete interactions on the card list.
//!
//! At most one interaction is pending at a time and it lives in a single
//! [`Pending`] value. Starting a new interaction replaces the previous one;
//! the replaced one can no longer be confirmed. An edit buffer remembers the
//! card it was opened for, so it is written back to that card even if the
//! list was reordered in between.

use std::fmt;

use thiserror::Error;

use rengui_model::card::{NO_VIDEO_TEXT, VIDEO_ACTOR};
use rengui_model::{render, Card, CardId, CardView, Choice, Kind, StoryDocument};

use crate::catalog::{AssetOptions, Catalog};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("card {0} is not in the scene")]
    UnknownCard(CardId),

    #[error("no edit in progress")]
    NotEditing,

    #[error("no delete awaiting confirmation")]
    NoPendingDelete,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("{field} cannot be edited on a {kind} card")]
    FieldNotApplicable { field: Field, kind: Kind },

    #[error("choices belong to branch cards, not {0} cards")]
    NotABranch(Kind),

    #[error("choice {index} does not exist ({len} choices)")]
    NoSuchChoice { index: usize, len: usize },
}

/// Editable card fields, named as in the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Actor,
    Text,
    Background,
    Video,
    Bgm,
    Sfx,
    CharLeft,
    CharCenter,
    CharRight,
    Condition,
}

impl Field {
    pub fn parse(key: &str) -> Option<Field> {
        Some(match key {
            "actor" => Field::Actor,
            "text" => Field::Text,
            "background" | "bg" => Field::Background,
            "video" => Field::Video,
            "bgm" => Field::Bgm,
            "sfx" => Field::Sfx,
            "charLeft" => Field::CharLeft,
            "charCenter" => Field::CharCenter,
            "charRight" => Field::CharRight,
            "condition" | "cond" => Field::Condition,
            _ => return None,
        })
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::Actor => "actor",
            Field::Text => "text",
            Field::Background => "background",
            Field::Video => "video",
            Field::Bgm => "bgm",
            Field::Sfx => "sfx",
            Field::CharLeft => "charLeft",
            Field::CharCenter => "charCenter",
            Field::CharRight => "charRight",
            Field::Condition => "condition",
        }
    }

    /// Whether confirming an edit of a `kind` card writes this field back.
    pub fn applies_to(self, kind: Kind) -> bool {
        match self {
            Field::Bgm | Field::Sfx | Field::Condition => true,
            Field::Video => kind == Kind::Video,
            Field::Text => kind != Kind::Video,
            Field::Actor | Field::Background | Field::CharLeft | Field::CharCenter | Field::CharRight => {
                kind == Kind::Dialogue
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Transient copy of one card's fields plus the selector options.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    target: CardId,
    kind: Kind,
    pub actor: String,
    pub text: String,
    pub background: String,
    pub video: String,
    pub bgm: String,
    pub sfx: String,
    pub char_left: String,
    pub char_center: String,
    pub char_right: String,
    pub condition: String,
    pub choices: Vec<Choice>,
    pub options: AssetOptions,
}

impl EditBuffer {
    /// Snapshots card `id` and fetches the catalog for it. The result is
    /// bound to `id` for its whole life.
    pub fn prepare(doc: &StoryDocument, id: CardId, catalog: &dyn Catalog) -> Result<Self, EditError> {
        let card = doc.card(id).ok_or(EditError::UnknownCard(id))?;
        let options = AssetOptions::fetch(catalog);
        Ok(Self::with_options(card, options))
    }

    pub fn with_options(card: &Card, options: AssetOptions) -> Self {
        Self {
            target: card.id,
            kind: card.kind,
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
            options,
        }
    }

    pub fn target(&self) -> CardId {
        self.target
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), EditError> {
        if !field.applies_to(self.kind) {
            return Err(EditError::FieldNotApplicable { field, kind: self.kind });
        }
        *self.slot(field) = value.into();
        Ok(())
    }

    pub fn set_key(&mut self, key: &str, value: impl Into<String>) -> Result<(), EditError> {
        let field = Field::parse(key).ok_or_else(|| EditError::UnknownField(key.to_string()))?;
        self.set(field, value)
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Actor => &self.actor,
            Field::Text => &self.text,
            Field::Background => &self.background,
            Field::Video => &self.video,
            Field::Bgm => &self.bgm,
            Field::Sfx => &self.sfx,
            Field::CharLeft => &self.char_left,
            Field::CharCenter => &self.char_center,
            Field::CharRight => &self.char_right,
            Field::Condition => &self.condition,
        }
    }

    /// Options a selector for `field` offers; empty for free-text fields.
    pub fn options_for(&self, field: Field) -> &[String] {
        match field {
            Field::Video => &self.options.videos,
            Field::Background => &self.options.backgrounds,
            Field::Bgm | Field::Sfx => &self.options.sounds,
            Field::CharLeft | Field::CharCenter | Field::CharRight => &self.options.sprites,
            Field::Actor | Field::Text | Field::Condition => &[],
        }
    }

    pub fn add_choice(&mut self, choice: Choice) -> Result<(), EditError> {
        if self.kind != Kind::Branch {
            return Err(EditError::NotABranch(self.kind));
        }
        self.choices.push(choice);
        Ok(())
    }

    pub fn remove_choice(&mut self, index: usize) -> Result<Choice, EditError> {
        let len = self.choices.len();
        if index >= len {
            return Err(EditError::NoSuchChoice { index, len });
        }
        Ok(self.choices.remove(index))
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Actor => &mut self.actor,
            Field::Text => &mut self.text,
            Field::Background => &mut self.background,
            Field::Video => &mut self.video,
            Field::Bgm => &mut self.bgm,
            Field::Sfx => &mut self.sfx,
            Field::CharLeft => &mut self.char_left,
            Field::CharCenter => &mut self.char_center,
            Field::CharRight => &mut self.char_right,
            Field::Condition => &mut self.condition,
        }
    }

    /// Writes back the fields that belong to the card's kind.
    fn apply_to(self, card: &mut Card) {
        match self.kind {
            Kind::Video => {
                card.text = if self.video.is_empty() {
                    NO_VIDEO_TEXT.to_string()
                } else {
                    self.video.clone()
                };
                card.video = self.video;
                card.actor = VIDEO_ACTOR.to_string();
            }
            Kind::Dialogue => {
                card.actor = self.actor;
                card.text = self.text;
                card.background = self.background;
                card.char_left = self.char_left;
                card.char_center = self.char_center;
                card.char_right = self.char_right;
            }
            Kind::Branch => {
                card.text = self.text;
                card.choices = self.choices;
            }
        }
        card.bgm = self.bgm;
        card.sfx = self.sfx;
        card.condition = self.condition;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Pending {
    #[default]
    Idle,
    Editing(EditBuffer),
    ConfirmingDelete(CardId),
}

impl Pending {
    pub fn target(&self) -> Option<CardId> {
        match self {
            Pending::Idle => None,
            Pending::Editing(buf) => Some(buf.target),
            Pending::ConfirmingDelete(id) => Some(*id),
        }
    }
}

#[derive(Debug, Default)]
pub struct EditingController {
    pending: Pending,
}

impl EditingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.pending, Pending::Idle)
    }

    pub fn add_card(&mut self, doc: &mut StoryDocument, kind: Kind) -> CardId {
        let id = doc.add_card(kind);
        log::info!("New {} card {} at position {}", kind, id, doc.cards().len() - 1);
        id
    }

    pub fn open_edit(
        &mut self,
        doc: &StoryDocument,
        id: CardId,
        catalog: &dyn Catalog,
    ) -> Result<&mut EditBuffer, EditError> {
        let buffer = EditBuffer::prepare(doc, id, catalog)?;
        Ok(self.begin_edit(buffer))
    }

    /// Installs a buffer prepared earlier with [`EditBuffer::prepare`].
    pub fn begin_edit(&mut self, buffer: EditBuffer) -> &mut EditBuffer {
        log::debug!("Editing {} card {}", buffer.kind, buffer.target);
        self.replace(Pending::Editing(buffer));
        match &mut self.pending {
            Pending::Editing(buf) => buf,
            _ => unreachable!("pending edit was just installed"),
        }
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        match &self.pending {
            Pending::Editing(buf) => Some(buf),
            _ => None,
        }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        match &mut self.pending {
            Pending::Editing(buf) => Some(buf),
            _ => None,
        }
    }

    /// Commits the buffer to its card and returns the card's new summary.
    pub fn confirm_edit(&mut self, doc: &mut StoryDocument) -> Result<CardView, EditError> {
        let buffer = match std::mem::take(&mut self.pending) {
            Pending::Editing(buf) => buf,
            other => {
                self.pending = other;
                return Err(EditError::NotEditing);
            }
        };

        let id = buffer.target;
        let card = doc.card_mut(id).ok_or(EditError::UnknownCard(id))?;
        buffer.apply_to(card);
        log::info!("Card {} modified", id);
        Ok(render(card))
    }

    pub fn cancel_edit(&mut self) -> Result<(), EditError> {
        match std::mem::take(&mut self.pending) {
            Pending::Editing(buf) => {
                log::debug!("Edit of card {} discarded", buf.target);
                Ok(())
            }
            other => {
                self.pending = other;
                Err(EditError::NotEditing)
            }
        }
    }

    pub fn request_delete(&mut self, doc: &StoryDocument, id: CardId) -> Result<(), EditError> {
        if doc.card(id).is_none() {
            return Err(EditError::UnknownCard(id));
        }
        self.replace(Pending::ConfirmingDelete(id));
        Ok(())
    }

    /// Answers the pending delete question. `yes` removes the card.
    pub fn resolve_delete(&mut self, doc: &mut StoryDocument, yes: bool) -> Result<Option<Card>, EditError> {
        let id = match std::mem::take(&mut self.pending) {
            Pending::ConfirmingDelete(id) => id,
            other => {
                self.pending = other;
                return Err(EditError::NoPendingDelete);
            }
        };

        if !yes {
            log::debug!("Delete of card {} declined", id);
            return Ok(None);
        }
        let removed = doc.remove_card(id).ok_or(EditError::UnknownCard(id))?;
        log::info!("Card {} deleted", id);
        Ok(Some(removed))
    }

    fn replace(&mut self, next: Pending) {
        if let Some(prev) = self.pending.target() {
            log::warn!("Unresolved interaction on card {} replaced", prev);
        }
        self.pending = next;
    }
}
