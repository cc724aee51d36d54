// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GDS Document: multi-level block documentation.
//!
//! A documentation directory holds up to three levels of block trees. The
//! general level has one tree. Every general block may be detailed by an
//! intermediate tree, and every intermediate block by a detailed tree.
//!
//! - [`LevelDocument`] is one tree: unique ids, user indices, labels, rich-text
//!   descriptions, and associated code files with [`LineHighlights`].
//! - [`DocumentStore`] persists trees as one JSON file per [`LevelKey`].
//! - [`Session`] tracks the open tree and its selection across levels.
//! - [`GuidedWalk`] steps through a tree in user-index order.
//!
//! [`LevelDocument::build_diagram`] turns a tree into a laid-out
//! [`gds_diagram::Diagram`] and returns the [`DiagramBinding`] between blocks
//! and nodes.
//!
//! ## Example
//!
//! ```rust
//! use gds_diagram::Diagram;
//! use gds_document::{DeletePolicy, Level, LevelDocument};
//!
//! let mut doc = LevelDocument::new(Level::General);
//! let root = doc.add_root("System").unwrap();
//! let parser = doc.add_child(root, Some("Parser")).unwrap();
//! let lexer = doc.add_child(parser, Some("Lexer")).unwrap();
//!
//! doc.remove(parser, DeletePolicy::KeepChildren).unwrap();
//! assert_eq!(doc.get(root).unwrap().children(), &[lexer]);
//!
//! let mut diagram = Diagram::new();
//! let binding = doc.build_diagram(&mut diagram).unwrap();
//! assert_eq!(diagram.root(), binding.node(root));
//! ```

mod block;
mod document;
mod error;
mod highlight;
mod level;
mod session;
mod store;
mod walk;

pub use block::{Block, CodeAssociation};
pub use document::{DEFAULT_BLOCK_LABEL, DeletePolicy, DiagramBinding, LevelDocument};
pub use error::{DocumentError, HighlightError};
pub use highlight::LineHighlights;
pub use level::{Level, LevelKey};
pub use session::Session;
pub use store::DocumentStore;
pub use walk::GuidedWalk;
