//! Card summary rendering, independent of any UI toolkit.

use std::fmt;

use crate::card::{Card, CardId, Kind, DEFAULT_TEXT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Comment,
    Film,
    CodeBranch,
}

impl Icon {
    pub fn name(self) -> &'static str {
        match self {
            Icon::Comment => "comment",
            Icon::Film => "film",
            Icon::CodeBranch => "code-branch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaTag {
    Background(String),
    Bgm(String),
    Condition(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: CardId,
    pub kind: Kind,
    pub icon: Icon,
    pub badge: Option<String>,
    pub body: String,
    pub tags: Vec<MetaTag>,
}

pub fn render(card: &Card) -> CardView {
    let icon = match card.kind {
        Kind::Dialogue => Icon::Comment,
        Kind::Video => Icon::Film,
        Kind::Branch => Icon::CodeBranch,
    };

    let body = [&card.text, &card.video]
        .into_iter()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_TEXT.to_string());

    let mut tags = Vec::new();
    if !card.background.is_empty() {
        tags.push(MetaTag::Background(card.background.clone()));
    }
    if !card.bgm.is_empty() {
        tags.push(MetaTag::Bgm(card.bgm.clone()));
    }
    if !card.condition.is_empty() {
        tags.push(MetaTag::Condition(card.condition.clone()));
    }

    CardView {
        id: card.id,
        kind: card.kind,
        icon,
        badge: (!card.actor.is_empty()).then(|| card.actor.clone()),
        body,
        tags,
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.icon.name())?;
        if let Some(badge) = &self.badge {
            write!(f, "{}: ", badge)?;
        }
        f.write_str(&self.body)?;
        for tag in &self.tags {
            match tag {
                MetaTag::Background(bg) => write!(f, " (bg {})", bg)?,
                MetaTag::Bgm(bgm) => write!(f, " (bgm {})", bgm)?,
                MetaTag::Condition(cond) => write!(f, " (if {})", cond)?,
            }
        }
        Ok(())
    }
}
