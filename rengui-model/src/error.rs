use thiserror::Error;
use crate::card::CardId;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("story document is empty")]
    Empty,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("position {index} is out of range for {len} cards")]
    OutOfRange { index: usize, len: usize },

    #[error("card {0} is not in the scene")]
    UnknownCard(CardId),
}
