// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GDS Diagram: the block tree behind the diagram view.
//!
//! A [`Diagram`] holds one level of a block diagram as a single-rooted tree and
//! provides the three pieces of state a renderer needs:
//!
//! - Structure: labeled nodes with generational [`NodeId`] handles, exclusive
//!   parent-owns-children ownership, and a flat registry of every live node.
//! - Layout: [`Diagram::compute_layout`] assigns each node a [`Displacement`].
//!   Leaves are spread left to right at a fixed spacing and parents are
//!   centered over their children.
//! - Picking: every node carries a distinct 24-bit [`ColorId`]. The renderer
//!   draws nodes in their colors off screen, samples the pixel under the
//!   cursor, and [`Diagram::resolve_color`] maps it back to a node.
//!
//! ## Not a general graph layout
//!
//! The layout is deliberately simple: fixed spacing, no overlap avoidance, no
//! force-directed refinement. Trees are expected to be shallow with small
//! fan-out.
//!
//! Layout is call-driven. Inserting or removing nodes never moves anything;
//! callers rebuild the tree and then run one layout pass.
//!
//! ## Example
//!
//! ```rust
//! use gds_diagram::Diagram;
//!
//! let mut diagram = Diagram::new();
//! let root = diagram.insert(None, "Parser").unwrap();
//! let lexer = diagram.insert(Some(root), "Lexer").unwrap();
//! diagram.compute_layout().unwrap();
//!
//! // Draw `lexer` in its pick color, sample it back...
//! let sampled = diagram.color(lexer).unwrap();
//! assert_eq!(diagram.resolve_color(sampled), Some(lexer));
//!
//! // ...while the background resolves to nothing.
//! let background = diagram.picking_config().background;
//! assert_eq!(diagram.resolve_color(background), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod layout;
mod picking;
mod tree;
mod types;

pub use error::DiagramError;
pub use layout::{LayoutConfig, LayoutSummary};
pub use picking::PickingConfig;
pub use tree::Diagram;
pub use types::{ColorId, Displacement, NodeId};
