// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::highlight::LineHighlights;

/// A source file attached to a block, optionally with highlighted lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAssociation {
    /// Path of the file, relative to the documentation root.
    pub file: PathBuf,
    /// Highlighted lines within the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<LineHighlights>,
}

impl CodeAssociation {
    /// Associate a file without highlights.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            highlights: None,
        }
    }
}

/// One documented block of a level.
///
/// Content fields are public. Tree links are owned by the
/// [`LevelDocument`](crate::LevelDocument) and only change through its
/// editing operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    unique_id: u64,
    /// Position in the guided walk; lower comes first.
    pub user_index: i64,
    /// Label shown on the diagram.
    pub label: String,
    /// Rich-text description, as HTML.
    #[serde(default)]
    pub description: String,
    /// Associated source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeAssociation>,
    #[serde(default)]
    pub(crate) parent: Option<u64>,
    #[serde(default)]
    pub(crate) children: Vec<u64>,
}

impl Block {
    pub(crate) fn new(unique_id: u64, label: impl Into<String>) -> Self {
        Self {
            unique_id,
            user_index: 0,
            label: label.into(),
            description: String::new(),
            code: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Stable identifier within the level; also names the level below.
    pub fn unique_id(&self) -> u64 {
        self.unique_id
    }

    /// Unique id of the parent block, `None` for the root.
    pub fn parent(&self) -> Option<u64> {
        self.parent
    }

    /// Unique ids of the child blocks, in display order.
    pub fn children(&self) -> &[u64] {
        &self.children
    }
}
