// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guided walk through a level in user-index order.

use hashbrown::HashSet;

use crate::document::LevelDocument;

/// Steps through blocks ordered by user index, skipping blocks already visited.
///
/// Selecting a block by any other means starts a fresh walk from it.
#[derive(Clone, Debug, Default)]
pub struct GuidedWalk {
    visited: HashSet<u64>,
    stepping: bool,
}

impl GuidedWalk {
    /// A walk with nothing visited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every visited block.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.stepping = false;
    }

    /// Returns true if `id` was visited during the current walk.
    pub fn is_visited(&self, id: u64) -> bool {
        self.visited.contains(&id)
    }

    /// The block after `current`, or `None` when the walk is over.
    ///
    /// Candidates are ordered by `(user_index, unique_id)`. The first one whose
    /// user index is not below `current`'s, that is not `current`, and that was
    /// not yet visited is returned. The next [`GuidedWalk::mark_visited`]
    /// then counts as a step of this walk.
    pub fn next(&mut self, doc: &LevelDocument, current: u64) -> Option<u64> {
        let from = doc.get(current)?.user_index;
        let mut order: Vec<(i64, u64)> = doc
            .blocks()
            .map(|block| (block.user_index, block.unique_id()))
            .collect();
        order.sort_unstable();
        let found = order
            .into_iter()
            .find(|&(index, id)| index >= from && id != current && !self.visited.contains(&id))
            .map(|(_, id)| id);
        self.stepping = found.is_some();
        tracing::debug!(current, next = ?found, "guided walk step");
        found
    }

    /// Record that the selection settled on `id`.
    ///
    /// After [`GuidedWalk::next`] the block joins the visited set; any other
    /// selection restarts the walk from it.
    pub fn mark_visited(&mut self, id: u64) {
        if !self.stepping {
            self.visited.clear();
        }
        self.stepping = false;
        self.visited.insert(id);
    }
}
