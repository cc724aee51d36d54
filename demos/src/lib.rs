// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces of the GDS walkthroughs.
//!
//! [`DocumentHost`] is the window side of a [`DiagramWidget`]: it keeps the
//! editing [`Session`], maps settled nodes back to blocks, and implements the
//! editor's "swap with the next clicked block" gesture by rebuilding the
//! diagram and handing the widget the node to select afterwards.
//!
//! Run:
//! - `cargo run -p gds_demos --example edit_and_view`

use gds_diagram::{Diagram, NodeId};
use gds_document::{DiagramBinding, DocumentError, Session};
use gds_view::{DiagramHost, DiagramWidget};
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Connects a [`Session`] to a [`DiagramWidget`].
#[derive(Debug)]
pub struct DocumentHost {
    session: Session,
    binding: DiagramBinding,
    swap_from: Option<u64>,
    deferred_renders: usize,
}

impl DocumentHost {
    /// Wrap an open session. Call [`DocumentHost::rebuild`] before painting.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            binding: DiagramBinding::default(),
            swap_from: None,
            deferred_renders: 0,
        }
    }

    /// The session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The session, for edits and level changes. Rebuild afterwards.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Block/node mapping of the current diagram.
    pub fn binding(&self) -> &DiagramBinding {
        &self.binding
    }

    /// How many renders were deferred until the widget was ready.
    pub fn deferred_renders(&self) -> usize {
        self.deferred_renders
    }

    /// Rebuild the widget's diagram from the open level, dropping its selection.
    pub fn rebuild(&mut self, widget: &mut DiagramWidget) -> Result<(), DocumentError> {
        widget.clear();
        self.binding = self.session.document().build_diagram(widget.diagram_mut())?;
        self.swap_from = None;
        widget.request_render();
        Ok(())
    }

    /// Swap the selected block's content with the next block that settles.
    pub fn arm_swap(&mut self) -> Result<(), DocumentError> {
        self.swap_from = Some(self.session.selected().ok_or(DocumentError::NothingSelected)?);
        Ok(())
    }

    /// Node of the session's selected block.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.binding.node(self.session.selected()?)
    }

    fn finish_swap(&mut self, diagram: &mut Diagram, from: u64, to: u64) -> Option<NodeId> {
        let rebuilt = self
            .session
            .document_mut()
            .swap_content(from, to)
            .and_then(|()| self.session.document().build_diagram(diagram));
        match rebuilt {
            Ok(binding) => {
                self.binding = binding;
                self.binding.node(to)
            }
            Err(err) => {
                tracing::warn!(%err, from, to, "swap failed");
                None
            }
        }
    }
}

impl DiagramHost for DocumentHost {
    fn selection_settled(&mut self, diagram: &mut Diagram, node: NodeId) -> Option<NodeId> {
        let Some(id) = self.binding.block(node) else {
            tracing::warn!(?node, "settled node has no block");
            return None;
        };
        if let Err(err) = self.session.selection_settled(id) {
            tracing::warn!(%err, id, "cannot select settled block");
            return None;
        }
        tracing::info!(id, label = %self.session.document().get(id)?.label, "block selected");
        match self.swap_from.take() {
            Some(from) if from != id => self.finish_swap(diagram, from, id),
            _ => None,
        }
    }

    fn ready_to_render(&mut self) {
        self.deferred_renders += 1;
        tracing::debug!("deferred render delivered");
    }
}
