// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level files in a documentation directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::document::LevelDocument;
use crate::error::DocumentError;
use crate::level::{Level, LevelKey};

#[derive(Serialize, Deserialize)]
struct StoredLevel {
    level: Level,
    blocks: Vec<Block>,
}

/// Reads and writes one JSON file per [`LevelKey`] under a directory.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The documentation directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the tree for `key` is stored.
    pub fn path(&self, key: LevelKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Load the tree for `key`; `Ok(None)` if it was never saved.
    pub fn load(&self, key: LevelKey) -> Result<Option<LevelDocument>, DocumentError> {
        let path = self.path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no level file");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let stored: StoredLevel = serde_json::from_slice(&bytes)?;
        if stored.level != key.level() {
            return Err(DocumentError::Inconsistent(format!(
                "{} holds a {:?} tree, expected {:?}",
                path.display(),
                stored.level,
                key.level()
            )));
        }
        let doc = LevelDocument::from_blocks(stored.level, stored.blocks)?;
        tracing::debug!(path = %path.display(), blocks = doc.len(), "level loaded");
        Ok(Some(doc))
    }

    /// Save the tree for `key`. Saving an empty tree deletes its file.
    pub fn save(&self, key: LevelKey, doc: &LevelDocument) -> Result<(), DocumentError> {
        if doc.level() != key.level() {
            return Err(DocumentError::Inconsistent(format!(
                "cannot store a {:?} tree under a {:?} key",
                doc.level(),
                key.level()
            )));
        }
        let path = self.path(key);
        if doc.is_empty() {
            return match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "empty level, file removed");
                    Ok(())
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            };
        }
        let stored = StoredLevel {
            level: doc.level(),
            blocks: doc.blocks().cloned().collect(),
        };
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_vec_pretty(&stored)?)?;
        tracing::debug!(path = %path.display(), blocks = doc.len(), "level saved");
        Ok(())
    }
}
