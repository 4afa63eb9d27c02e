//! One editing session: the document, the pending interaction and the two
//! bridges. Every mutation goes through `&mut self`, so a save can never
//! interleave with an edit.

use anyhow::{Context, Result};

use rengui_model::{render, Card, CardId, CardView, Kind, ReorderError, StoryDocument};

use crate::catalog::Catalog;
use crate::controller::{EditBuffer, EditError, EditingController};
use crate::form::ConfigForm;
use crate::storage::Persistence;

pub struct EditorSession<P: Persistence, C: Catalog> {
    doc: StoryDocument,
    controller: EditingController,
    form: ConfigForm,
    store: P,
    catalog: C,
}

impl<P: Persistence, C: Catalog> EditorSession<P, C> {
    /// Hydrates from the store. Anything short of a readable document opens
    /// a new project instead.
    pub fn open(store: P, catalog: C) -> Self {
        let doc = match store.load() {
            Ok(Some(raw)) => StoryDocument::load(&raw),
            Ok(None) => {
                log::info!("New project mode");
                StoryDocument::new()
            }
            Err(e) => {
                log::warn!("Story load failed: {:#}. New project mode", e);
                StoryDocument::new()
            }
        };
        let form = ConfigForm::from_document(&doc);
        Self {
            doc,
            controller: EditingController::new(),
            form,
            store,
            catalog,
        }
    }

    pub fn document(&self) -> &StoryDocument {
        &self.doc
    }

    pub fn controller(&self) -> &EditingController {
        &self.controller
    }

    pub fn form(&self) -> &ConfigForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ConfigForm {
        &mut self.form
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn views(&self) -> Vec<CardView> {
        self.doc.cards().iter().map(render).collect()
    }

    pub fn card_at(&self, index: usize) -> Option<CardId> {
        self.doc.cards().get(index).map(|c| c.id)
    }

    pub fn add_card(&mut self, kind: Kind) -> CardId {
        self.controller.add_card(&mut self.doc, kind)
    }

    /// Appends a card and opens it for editing straight away.
    pub fn add_and_edit(&mut self, kind: Kind) -> Result<&mut EditBuffer, EditError> {
        let id = self.add_card(kind);
        self.open_edit(id)
    }

    pub fn open_edit(&mut self, id: CardId) -> Result<&mut EditBuffer, EditError> {
        self.controller.open_edit(&self.doc, id, &self.catalog)
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.controller.buffer_mut()
    }

    pub fn confirm_edit(&mut self) -> Result<CardView, EditError> {
        self.controller.confirm_edit(&mut self.doc)
    }

    pub fn cancel_edit(&mut self) -> Result<(), EditError> {
        self.controller.cancel_edit()
    }

    pub fn request_delete(&mut self, id: CardId) -> Result<(), EditError> {
        self.controller.request_delete(&self.doc, id)
    }

    pub fn resolve_delete(&mut self, yes: bool) -> Result<Option<Card>, EditError> {
        self.controller.resolve_delete(&mut self.doc, yes)
    }

    pub fn move_card(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        self.doc.move_card(from, to)
    }

    /// Takes the settings form into the document, serializes it and hands it
    /// to the store. An invalid form blocks the save.
    pub fn save(&mut self) -> Result<String> {
        self.form.apply(&mut self.doc).context("Config form is invalid")?;
        let json = self.doc.save()?;
        let msg = self.store.save(&json)?;
        log::info!("Project saved: {} card(s)", self.doc.cards().len());
        Ok(msg)
    }
}
