// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three zoom levels and the keys naming one tree within them.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// How far a tree is zoomed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// The single overview tree.
    General,
    /// One tree per general block.
    Intermediate,
    /// One tree per intermediate block.
    Detailed,
}

/// Identifies one tree: its level plus the blocks it was descended from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKey {
    /// The overview tree.
    General,
    /// The tree detailing a general block.
    Intermediate {
        /// Unique id of the general block.
        general: u64,
    },
    /// The tree detailing an intermediate block.
    Detailed {
        /// Unique id of the general block.
        general: u64,
        /// Unique id of the intermediate block.
        intermediate: u64,
    },
}

impl LevelKey {
    /// The level this key belongs to.
    pub fn level(self) -> Level {
        match self {
            Self::General => Level::General,
            Self::Intermediate { .. } => Level::Intermediate,
            Self::Detailed { .. } => Level::Detailed,
        }
    }

    /// File name the tree is stored under.
    pub fn file_name(self) -> String {
        match self {
            Self::General => "level1_general.gds".to_owned(),
            Self::Intermediate { general } => format!("level2_{general}.gds"),
            Self::Detailed {
                general,
                intermediate,
            } => format!("level3_{general}_{intermediate}.gds"),
        }
    }

    /// Key of the tree detailing block `selected` of this tree.
    pub fn descend(self, selected: u64) -> Result<Self, DocumentError> {
        match self {
            Self::General => Ok(Self::Intermediate { general: selected }),
            Self::Intermediate { general } => Ok(Self::Detailed {
                general,
                intermediate: selected,
            }),
            Self::Detailed { .. } => Err(DocumentError::MaxLevelReached),
        }
    }

    /// Key of the parent tree, plus the block in it this tree details.
    pub fn ascend(self) -> Result<(Self, u64), DocumentError> {
        match self {
            Self::General => Err(DocumentError::MinLevelReached),
            Self::Intermediate { general } => Ok((Self::General, general)),
            Self::Detailed {
                general,
                intermediate,
            } => Ok((Self::Intermediate { general }, intermediate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(LevelKey::General.file_name(), "level1_general.gds");
        assert_eq!(
            LevelKey::Intermediate { general: 4 }.file_name(),
            "level2_4.gds"
        );
        assert_eq!(
            LevelKey::Detailed {
                general: 4,
                intermediate: 11
            }
            .file_name(),
            "level3_4_11.gds"
        );
    }

    #[test]
    fn descend_then_ascend_returns_to_the_block() {
        let key = LevelKey::General.descend(3).unwrap();
        assert_eq!(key.level(), Level::Intermediate);
        let deeper = key.descend(8).unwrap();
        assert_eq!(deeper.level(), Level::Detailed);
        assert_eq!(deeper.ascend().unwrap(), (key, 8));
        assert_eq!(key.ascend().unwrap(), (LevelKey::General, 3));
    }

    #[test]
    fn bounds() {
        let detailed = LevelKey::Detailed {
            general: 0,
            intermediate: 0,
        };
        assert!(matches!(
            detailed.descend(1),
            Err(DocumentError::MaxLevelReached)
        ));
        assert!(matches!(
            LevelKey::General.ascend(),
            Err(DocumentError::MinLevelReached)
        ));
    }
}
