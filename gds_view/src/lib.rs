// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GDS View: selection, camera transitions, and input for a block diagram.
//!
//! This crate sits between a [`gds_diagram::Diagram`] and whatever actually
//! draws it. It owns one piece of mutable presentation state, the view matrix,
//! and decides who may change it:
//!
//! - [`SelectionController`] keeps the selected node. Selecting a node either
//!   jumps the view onto it ([`RunMode::Direct`], the editor) or glides there
//!   over a fixed number of timer ticks ([`RunMode::Animated`], the viewer).
//! - While a transition runs, wheel zoom, arrow-key pan, and click picking are
//!   rejected. [`InteractionFlags`] records what the view is busy with.
//! - [`DiagramWidget`] bundles a diagram and a controller and reports settled
//!   selections to its window through the [`DiagramHost`] trait.
//!
//! The crate does not draw. [`DiagramWidget::paint`] returns a [`Frame`] with
//! the view and projection matrices, one [`DrawItem`] per node (displacement,
//! model matrix, pick color, selected flag), the connection lines, and the
//! caption for the selected block. The host runs the timer that drives
//! [`DiagramWidget::tick`].
//!
//! ## Example
//!
//! ```rust
//! use gds_diagram::{Diagram, NodeId};
//! use gds_view::{DiagramHost, DiagramWidget, RunMode, TickOutcome};
//!
//! struct Viewer {
//!     settled: Vec<NodeId>,
//! }
//!
//! impl DiagramHost for Viewer {
//!     fn selection_settled(&mut self, _: &mut Diagram, node: NodeId) -> Option<NodeId> {
//!         self.settled.push(node);
//!         None
//!     }
//! }
//!
//! let mut host = Viewer { settled: Vec::new() };
//! let mut widget = DiagramWidget::new(RunMode::Animated);
//! let root = widget.diagram_mut().insert(None, "Overview").unwrap();
//! let detail = widget.diagram_mut().insert(Some(root), "Detail").unwrap();
//! widget.compute_layout().unwrap();
//!
//! // The first frame centers on the root.
//! widget.paint(&mut host).unwrap();
//! assert_eq!(widget.selected(), Some(root));
//!
//! widget.select(&mut host, detail).unwrap();
//! while widget.tick(&mut host).unwrap() != TickOutcome::Settled(detail) {}
//! assert_eq!(host.settled, [detail]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod camera;
mod controller;
mod error;
mod input;
mod transition;
mod widget;

pub use camera::{CameraRig, model_matrix, translation_of, with_translation};
pub use controller::{PickOutcome, RunMode, SelectOutcome, SelectionController};
pub use error::ViewError;
pub use input::{InputConfig, InteractionFlags, PanDirection, pick_point};
pub use transition::{CameraTransition, TickOutcome, TransitionConfig};
pub use widget::{DiagramHost, DiagramWidget, DrawItem, Frame};
