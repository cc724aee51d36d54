// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for documents, highlights, and persistence.

use std::fmt;
use std::io;

use gds_diagram::DiagramError;

/// Failures of document edits, level navigation, and persistence.
#[derive(Debug)]
pub enum DocumentError {
    /// The level already has a root block.
    RootAlreadySet {
        /// Unique id of the existing root.
        root: u64,
    },
    /// No block with this unique id exists in the level.
    UnknownBlock(u64),
    /// An operation needs a selected block and there is none.
    NothingSelected,
    /// The detailed level has no level below it.
    MaxLevelReached,
    /// The general level has no level above it.
    MinLevelReached,
    /// The document's parent/child links contradict each other.
    Inconsistent(String),
    /// Building the diagram failed.
    Diagram(DiagramError),
    /// Reading or writing a level file failed.
    Io(io::Error),
    /// A level file could not be encoded or decoded.
    Format(serde_json::Error),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootAlreadySet { root } => write!(f, "block {root} is already the root"),
            Self::UnknownBlock(id) => write!(f, "no block with unique id {id}"),
            Self::NothingSelected => f.write_str("no block is selected"),
            Self::MaxLevelReached => f.write_str("already at the most detailed level"),
            Self::MinLevelReached => f.write_str("already at the general level"),
            Self::Inconsistent(reason) => write!(f, "inconsistent document: {reason}"),
            Self::Diagram(err) => write!(f, "diagram error: {err}"),
            Self::Io(err) => write!(f, "level file I/O failed: {err}"),
            Self::Format(err) => write!(f, "level file is malformed: {err}"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Diagram(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DiagramError> for DocumentError {
    fn from(err: DiagramError) -> Self {
        Self::Diagram(err)
    }
}

impl From<io::Error> for DocumentError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err)
    }
}

/// Line highlights that no longer match their source file.
///
/// Both variants mean the documentation might be corrupted: the associated
/// file changed in a way the stored anchor cannot follow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HighlightError {
    /// The first highlighted line is past the end of the file.
    LineOutOfRange {
        /// Stored first line (zero-based).
        line: usize,
        /// Number of lines in the file.
        len: usize,
    },
    /// The anchor text is nowhere in the file.
    AnchorNotFound,
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineOutOfRange { line, len } => write!(
                f,
                "highlighted line {line} is past the end of a {len}-line file"
            ),
            Self::AnchorNotFound => f.write_str("highlighted lines cannot be found in the file"),
        }
    }
}

impl std::error::Error for HighlightError {}
