//! In-memory model of a RenGui story document: action cards, the scene that
//! orders them, and the persisted JSON form consumed by the player.

pub mod card;
pub mod document;
pub mod error;
pub mod format;
pub mod reorder;
pub mod view;

pub use card::{Card, CardId, Choice, Kind};
pub use document::{Scene, StoryDocument, SystemConfig, UiConfig};
pub use error::{DocumentError, ReorderError};
pub use view::{render, CardView, Icon, MetaTag};
