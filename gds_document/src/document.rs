// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One level's tree of blocks, its editing policies, and the diagram builder.

use std::mem;

use gds_diagram::{Diagram, NodeId};
use hashbrown::{HashMap, HashSet};

use crate::block::{Block, CodeAssociation};
use crate::error::DocumentError;
use crate::level::Level;

/// Label given to blocks added without one.
pub const DEFAULT_BLOCK_LABEL: &str = "Block";

/// What happens to the children of a deleted block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeletePolicy {
    /// Delete the whole subtree.
    WithChildren,
    /// Move the children to the end of the deleted block's parent.
    KeepChildren,
}

/// The blocks of one level, as a single-rooted tree keyed by unique id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDocument {
    level: Level,
    blocks: HashMap<u64, Block>,
    root: Option<u64>,
}

impl LevelDocument {
    /// An empty level.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            blocks: HashMap::new(),
            root: None,
        }
    }

    /// Rebuild a level from stored blocks, rejecting inconsistent links.
    pub fn from_blocks(level: Level, blocks: Vec<Block>) -> Result<Self, DocumentError> {
        let mut doc = Self::new(level);
        for block in blocks {
            let id = block.unique_id();
            if block.parent.is_none() {
                if let Some(root) = doc.root {
                    return Err(DocumentError::Inconsistent(format!(
                        "blocks {root} and {id} are both roots"
                    )));
                }
                doc.root = Some(id);
            }
            if doc.blocks.insert(id, block).is_some() {
                return Err(DocumentError::Inconsistent(format!(
                    "unique id {id} is used twice"
                )));
            }
        }
        doc.check_consistency()?;
        Ok(doc)
    }

    /// The level this tree lives on.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the level has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Unique id of the root block.
    pub fn root(&self) -> Option<u64> {
        self.root
    }

    /// Look up a block.
    pub fn get(&self, id: u64) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Look up a block for editing its content.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Block> {
        self.blocks.get_mut(&id)
    }

    /// Unique ids in pre-order: every parent before its children, siblings in order.
    pub fn preorder(&self) -> Vec<u64> {
        let mut order = Vec::with_capacity(self.blocks.len());
        let mut stack: Vec<u64> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(block) = self.blocks.get(&id) {
                stack.extend(block.children.iter().rev());
            }
        }
        order
    }

    /// Blocks in pre-order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.preorder()
            .into_iter()
            .filter_map(|id| self.blocks.get(&id))
    }

    /// Smallest unique id not used by any block.
    pub fn next_free_id(&self) -> u64 {
        let mut id = 0;
        while self.blocks.contains_key(&id) {
            id += 1;
        }
        id
    }

    /// Add the root block.
    pub fn add_root(&mut self, label: impl Into<String>) -> Result<u64, DocumentError> {
        if let Some(root) = self.root {
            return Err(DocumentError::RootAlreadySet { root });
        }
        let id = self.next_free_id();
        self.blocks.insert(id, Block::new(id, label));
        self.root = Some(id);
        tracing::debug!(id, level = ?self.level, "root block added");
        Ok(id)
    }

    /// Append a child to `parent`, labeled [`DEFAULT_BLOCK_LABEL`] unless given.
    ///
    /// Below the general level the child starts out associated with the
    /// parent's code file (without highlights).
    pub fn add_child(&mut self, parent: u64, label: Option<&str>) -> Result<u64, DocumentError> {
        let parent_block = self.blocks.get(&parent).ok_or(DocumentError::UnknownBlock(parent))?;
        let inherited = match self.level {
            Level::General => None,
            Level::Intermediate | Level::Detailed => parent_block
                .code
                .as_ref()
                .map(|code| CodeAssociation::new(code.file.clone())),
        };
        let id = self.next_free_id();
        let mut block = Block::new(id, label.unwrap_or(DEFAULT_BLOCK_LABEL));
        block.code = inherited;
        block.parent = Some(parent);
        self.blocks.insert(id, block);
        self.block_mut(parent).children.push(id);
        debug_assert!(self.check_consistency().is_ok(), "links agree after add");
        tracing::debug!(id, parent, "child block added");
        Ok(id)
    }

    /// Delete a block.
    ///
    /// Deleting the root empties the level regardless of `policy`. Returns the
    /// block to select next: the deleted block's parent, or `None` if the level
    /// is now empty.
    pub fn remove(&mut self, id: u64, policy: DeletePolicy) -> Result<Option<u64>, DocumentError> {
        let block = self.blocks.get(&id).ok_or(DocumentError::UnknownBlock(id))?;
        let Some(parent) = block.parent else {
            self.blocks.clear();
            self.root = None;
            tracing::debug!(id, "root block deleted, level emptied");
            return Ok(None);
        };
        let removed = self.blocks.remove(&id).ok_or(DocumentError::UnknownBlock(id))?;
        self.block_mut(parent).children.retain(|c| *c != id);
        match policy {
            DeletePolicy::WithChildren => {
                for child in removed.children {
                    self.remove_subtree(child);
                }
            }
            DeletePolicy::KeepChildren => {
                for child in &removed.children {
                    self.block_mut(*child).parent = Some(parent);
                }
                self.block_mut(parent).children.extend(removed.children);
            }
        }
        debug_assert!(self.check_consistency().is_ok(), "links agree after delete");
        tracing::debug!(id, ?policy, parent, "block deleted");
        Ok(Some(parent))
    }

    /// Exchange the content of two blocks; both keep their place and unique id.
    pub fn swap_content(&mut self, a: u64, b: u64) -> Result<(), DocumentError> {
        if a == b {
            return self.get(a).map(|_| ()).ok_or(DocumentError::UnknownBlock(a));
        }
        let mut first = self.blocks.remove(&a).ok_or(DocumentError::UnknownBlock(a))?;
        let Some(second) = self.blocks.get_mut(&b) else {
            self.blocks.insert(a, first);
            return Err(DocumentError::UnknownBlock(b));
        };
        mem::swap(&mut first.label, &mut second.label);
        mem::swap(&mut first.description, &mut second.description);
        mem::swap(&mut first.code, &mut second.code);
        mem::swap(&mut first.user_index, &mut second.user_index);
        self.blocks.insert(a, first);
        tracing::debug!(a, b, "block content swapped");
        Ok(())
    }

    /// Verify the single root, unique ids, and mutual parent/child links.
    pub fn check_consistency(&self) -> Result<(), DocumentError> {
        let fail = |reason: String| Err(DocumentError::Inconsistent(reason));
        let Some(root) = self.root else {
            if self.blocks.is_empty() {
                return Ok(());
            }
            return fail("blocks exist but there is no root".to_owned());
        };
        match self.blocks.get(&root) {
            None => return fail(format!("root {root} does not exist")),
            Some(block) if block.parent.is_some() => {
                return fail(format!("root {root} has a parent"));
            }
            Some(_) => {}
        }
        for (&id, block) in &self.blocks {
            if block.unique_id() != id {
                return fail(format!("block stored as {id} claims id {}", block.unique_id()));
            }
            match block.parent {
                None if id != root => return fail(format!("block {id} is a second root")),
                None => {}
                Some(parent) => {
                    let Some(parent_block) = self.blocks.get(&parent) else {
                        return fail(format!("block {id} names missing parent {parent}"));
                    };
                    let listed = parent_block.children.iter().filter(|c| **c == id).count();
                    if listed != 1 {
                        return fail(format!("parent {parent} lists block {id} {listed} times"));
                    }
                }
            }
            for child in &block.children {
                if self.blocks.get(child).and_then(|c| c.parent) != Some(id) {
                    return fail(format!("child {child} of block {id} does not point back"));
                }
            }
        }
        let mut seen = HashSet::with_capacity(self.blocks.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return fail(format!("block {id} is reachable twice"));
            }
            if let Some(block) = self.blocks.get(&id) {
                stack.extend(&block.children);
            }
        }
        if seen.len() != self.blocks.len() {
            return fail("some blocks are unreachable from the root".to_owned());
        }
        Ok(())
    }

    /// Replace the contents of `diagram` with this level's tree and lay it out.
    ///
    /// Blocks are inserted parent before child in [`LevelDocument::preorder`].
    /// An empty level leaves the diagram empty and not laid out.
    pub fn build_diagram(&self, diagram: &mut Diagram) -> Result<DiagramBinding, DocumentError> {
        diagram.clear();
        let mut binding = DiagramBinding::default();
        for block in self.blocks() {
            let parent = match block.parent {
                Some(parent) => Some(
                    binding
                        .node(parent)
                        .ok_or(DocumentError::UnknownBlock(parent))?,
                ),
                None => None,
            };
            let node = diagram.insert(parent, block.label.clone())?;
            binding.link(block.unique_id(), node);
        }
        if !binding.is_empty() {
            diagram.compute_layout()?;
        }
        tracing::debug!(blocks = binding.len(), level = ?self.level, "diagram built");
        Ok(binding)
    }

    fn block_mut(&mut self, id: u64) -> &mut Block {
        self.blocks.get_mut(&id).expect("linked block is present")
    }

    fn remove_subtree(&mut self, id: u64) {
        if let Some(block) = self.blocks.remove(&id) {
            for child in block.children {
                self.remove_subtree(child);
            }
        }
    }
}

/// Two-way map between block unique ids and the diagram nodes built for them.
#[derive(Clone, Debug, Default)]
pub struct DiagramBinding {
    nodes: HashMap<u64, NodeId>,
    blocks: HashMap<NodeId, u64>,
}

impl DiagramBinding {
    /// The node drawn for a block.
    pub fn node(&self, unique_id: u64) -> Option<NodeId> {
        self.nodes.get(&unique_id).copied()
    }

    /// The block a node was built from.
    pub fn block(&self, node: NodeId) -> Option<u64> {
        self.blocks.get(&node).copied()
    }

    /// Number of bound blocks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn link(&mut self, unique_id: u64, node: NodeId) {
        self.nodes.insert(unique_id, node);
        self.blocks.insert(node, unique_id);
    }
}
