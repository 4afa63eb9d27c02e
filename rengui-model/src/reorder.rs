//! Positional moves driven by drag-and-drop. A move never touches card
//! fields and keeps every other card in its relative order.

use crate::card::CardId;
use crate::document::{Scene, StoryDocument};
use crate::error::ReorderError;

impl Scene {
    pub fn move_card(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        let len = self.cards.len();
        for index in [from, to] {
            if index >= len {
                return Err(ReorderError::OutOfRange { index, len });
            }
        }
        if from != to {
            let card = self.cards.remove(from);
            self.cards.insert(to, card);
        }
        Ok(())
    }
}

impl StoryDocument {
    pub fn move_card(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        self.scene_mut().move_card(from, to)?;
        log::debug!("Moved card {} -> {}", from, to);
        Ok(())
    }

    /// Moves the card with `id` so it ends up at position `to`.
    pub fn move_card_id(&mut self, id: CardId, to: usize) -> Result<(), ReorderError> {
        let from = self.position(id).ok_or(ReorderError::UnknownCard(id))?;
        self.move_card(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Kind;

    fn scene_of(n: usize) -> (StoryDocument, Vec<CardId>) {
        let mut doc = StoryDocument::new();
        let ids = (0..n).map(|_| doc.add_card(Kind::Dialogue)).collect();
        (doc, ids)
    }

    fn order(doc: &StoryDocument) -> Vec<CardId> {
        doc.cards().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_move_forward_and_back() {
        let (mut doc, ids) = scene_of(4);
        doc.move_card(2, 0).unwrap();
        assert_eq!(order(&doc), vec![ids[2], ids[0], ids[1], ids[3]]);

        doc.move_card(0, 3).unwrap();
        assert_eq!(order(&doc), ids[..2].iter().chain([&ids[3], &ids[2]]).copied().collect::<Vec<_>>());
    }

    #[test]
    fn test_move_rejects_bad_positions() {
        let (mut doc, ids) = scene_of(2);
        assert_eq!(doc.move_card(0, 2), Err(ReorderError::OutOfRange { index: 2, len: 2 }));
        assert_eq!(doc.move_card(5, 0), Err(ReorderError::OutOfRange { index: 5, len: 2 }));
        assert_eq!(order(&doc), ids);

        doc.move_card(1, 1).unwrap();
        assert_eq!(order(&doc), ids);
    }

    #[test]
    fn test_move_by_id() {
        let (mut doc, ids) = scene_of(3);
        doc.move_card_id(ids[0], 2).unwrap();
        assert_eq!(order(&doc), vec![ids[1], ids[2], ids[0]]);
        assert_eq!(doc.move_card_id(CardId(99), 0), Err(ReorderError::UnknownCard(CardId(99))));
    }
}
