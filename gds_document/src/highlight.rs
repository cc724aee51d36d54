// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlighted line ranges in an associated source file.
//!
//! Lines are zero-based. The set is stored as an absolute first line plus
//! offsets relative to it, together with the text of the first line. When the
//! source file is edited above the highlighted region the anchor text is
//! searched for, and every line shifts by the distance it moved.

use serde::{Deserialize, Serialize};

use crate::error::HighlightError;

/// A set of highlighted lines anchored to the text of the first one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineHighlights {
    first_line: usize,
    offsets: Vec<usize>,
    anchor_text: String,
}

impl LineHighlights {
    /// Capture a selection of lines from `source`.
    ///
    /// Returns `None` if `lines` is empty or its first line is not in `source`.
    pub fn capture(lines: &[usize], source: &str) -> Option<Self> {
        let mut sorted = lines.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let (&first_line, rest) = sorted.split_first()?;
        let anchor_text = source.lines().nth(first_line)?.to_owned();
        Some(Self {
            first_line,
            offsets: rest.iter().map(|line| line - first_line).collect(),
            anchor_text,
        })
    }

    /// The first highlighted line.
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Text the first line had when the highlights were captured.
    pub fn anchor_text(&self) -> &str {
        &self.anchor_text
    }

    /// All highlighted lines, ascending.
    pub fn lines(&self) -> Vec<usize> {
        core::iter::once(self.first_line)
            .chain(self.offsets.iter().map(|offset| self.first_line + offset))
            .collect()
    }

    /// Re-anchor against the current contents of the source file.
    ///
    /// If the first line still holds the anchor text the highlights are
    /// unchanged. Otherwise the anchor is searched for below, then above, the
    /// stored line and the whole set moves to the nearest match in that order.
    pub fn resolve(&self, source: &str) -> Result<Self, HighlightError> {
        let lines: Vec<&str> = source.lines().collect();
        let len = lines.len();
        if self.first_line >= len {
            tracing::warn!(line = self.first_line, len, "highlighted line past end of file");
            return Err(HighlightError::LineOutOfRange {
                line: self.first_line,
                len,
            });
        }
        if lines[self.first_line] == self.anchor_text {
            return self.within(len);
        }
        let below = (self.first_line + 1..len).find(|&i| lines[i] == self.anchor_text);
        let found = below.or_else(|| (0..self.first_line).rev().find(|&i| lines[i] == self.anchor_text));
        match found {
            Some(first_line) => {
                tracing::debug!(from = self.first_line, to = first_line, "highlights re-anchored");
                Self {
                    first_line,
                    ..self.clone()
                }
                .within(len)
            }
            None => {
                tracing::warn!(anchor = %self.anchor_text, "highlight anchor not found");
                Err(HighlightError::AnchorNotFound)
            }
        }
    }
}

impl LineHighlights {
    /// `self` if its last line exists in a file of `len` lines.
    fn within(&self, len: usize) -> Result<Self, HighlightError> {
        let last = self.first_line + self.offsets.iter().copied().max().unwrap_or(0);
        if last >= len {
            tracing::warn!(line = last, len, "highlighted lines run past end of file");
            return Err(HighlightError::LineOutOfRange { line: last, len });
        }
        Ok(self.clone())
    }
}
