// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The open level, its selection, and moving between levels.

use crate::document::{DeletePolicy, LevelDocument};
use crate::error::DocumentError;
use crate::level::{Level, LevelKey};
use crate::store::DocumentStore;
use crate::walk::GuidedWalk;

/// An editing session over a documentation directory.
///
/// Exactly one level tree is open at a time. Descending saves it and opens
/// the tree detailing the selected block; ascending saves it and returns to
/// the block it details.
#[derive(Debug)]
pub struct Session {
    store: DocumentStore,
    key: LevelKey,
    document: LevelDocument,
    selected: Option<u64>,
    walk: GuidedWalk,
}

impl Session {
    /// Open the general level of `store`, selecting its root if it has one.
    pub fn open(store: DocumentStore) -> Result<Self, DocumentError> {
        let document = store
            .load(LevelKey::General)?
            .unwrap_or_else(|| LevelDocument::new(Level::General));
        let selected = document.root();
        Ok(Self {
            store,
            key: LevelKey::General,
            document,
            selected,
            walk: GuidedWalk::new(),
        })
    }

    /// The backing store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Key of the open tree.
    pub fn key(&self) -> LevelKey {
        self.key
    }

    /// The open tree.
    pub fn document(&self) -> &LevelDocument {
        &self.document
    }

    /// The open tree, for edits that keep the selection valid.
    ///
    /// Prefer [`Session::remove_selected`] for deletions.
    pub fn document_mut(&mut self) -> &mut LevelDocument {
        &mut self.document
    }

    /// Unique id of the selected block.
    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    /// Select a block of the open tree.
    pub fn select(&mut self, id: u64) -> Result<(), DocumentError> {
        if self.document.get(id).is_none() {
            return Err(DocumentError::UnknownBlock(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Record that the view settled on `id`, updating selection and walk.
    pub fn selection_settled(&mut self, id: u64) -> Result<(), DocumentError> {
        self.select(id)?;
        self.walk.mark_visited(id);
        Ok(())
    }

    /// Next block of the guided walk from the current selection.
    pub fn walk_next(&mut self) -> Option<u64> {
        let current = self.selected?;
        self.walk.next(&self.document, current)
    }

    /// Delete the selected block and select the block returned by the delete.
    pub fn remove_selected(&mut self, policy: DeletePolicy) -> Result<Option<u64>, DocumentError> {
        let id = self.selected.ok_or(DocumentError::NothingSelected)?;
        let next = self.document.remove(id, policy)?;
        self.selected = next;
        self.walk.reset();
        Ok(next)
    }

    /// Write the open tree to the store.
    pub fn save(&self) -> Result<(), DocumentError> {
        self.store.save(self.key, &self.document)
    }

    /// Save, then open the tree detailing the selected block.
    ///
    /// A tree that was never saved opens empty.
    pub fn descend(&mut self) -> Result<(), DocumentError> {
        let selected = self.selected.ok_or(DocumentError::NothingSelected)?;
        let next = self.key.descend(selected)?;
        self.save()?;
        self.enter(next, None)
    }

    /// Save, then reopen the parent tree with the detailed block selected.
    ///
    /// Returns the unique id of that block.
    pub fn ascend(&mut self) -> Result<u64, DocumentError> {
        let (parent, detailed) = self.key.ascend()?;
        self.save()?;
        self.enter(parent, Some(detailed))?;
        Ok(detailed)
    }

    fn enter(&mut self, key: LevelKey, select: Option<u64>) -> Result<(), DocumentError> {
        let document = self
            .store
            .load(key)?
            .unwrap_or_else(|| LevelDocument::new(key.level()));
        self.selected = select
            .filter(|id| document.get(*id).is_some())
            .or_else(|| document.root());
        self.document = document;
        self.key = key;
        self.walk.reset();
        tracing::debug!(?key, selected = ?self.selected, "level entered");
        Ok(())
    }
}
