// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use gds_diagram::{DiagramError, NodeId};

/// Precondition violations reported by the view layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The diagram has no root to look at.
    EmptyDiagram,
    /// The diagram changed structurally and has not been laid out again.
    NotLaidOut,
    /// The given node is not live in the diagram.
    StaleNode(NodeId),
    /// A diagram operation failed.
    Diagram(DiagramError),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDiagram => f.write_str("the diagram has no root to select"),
            Self::NotLaidOut => f.write_str("the diagram must be laid out before it is viewed"),
            Self::StaleNode(id) => write!(f, "{id:?} is not a live node of the diagram"),
            Self::Diagram(err) => write!(f, "diagram error: {err}"),
        }
    }
}

impl core::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Diagram(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DiagramError> for ViewError {
    fn from(err: DiagramError) -> Self {
        match err {
            DiagramError::StaleNode(id) => Self::StaleNode(id),
            DiagramError::Empty => Self::EmptyDiagram,
            other => Self::Diagram(other),
        }
    }
}
