// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the diagram: node identifiers, pick colors, and displacements.

use core::fmt;

use kurbo::{Point, Vec2};

/// Identifier for a node in the diagram (generational).
///
/// A `NodeId` stays valid until the node it names is removed or the diagram is
/// cleared. After that, [`Diagram::is_alive`](crate::Diagram::is_alive) reports
/// `false` for it even if the slot has been reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A 24-bit pick color: one byte per channel, red first.
///
/// Every live node carries a distinct `ColorId`. The renderer draws each node
/// in its `ColorId` during the picking pass and reads back the pixel under the
/// cursor; [`Diagram::resolve_color`](crate::Diagram::resolve_color) maps that
/// pixel back to a node.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ColorId(pub u8, pub u8, pub u8);

impl ColorId {
    /// Builds a color from its three byte lanes.
    #[must_use]
    pub const fn from_rgb(rgb: [u8; 3]) -> Self {
        Self(rgb[0], rgb[1], rgb[2])
    }

    /// Returns the three byte lanes, red first.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    /// Returns the color with each lane scaled into `0.0..=1.0`, as shader
    /// uniforms expect it.
    #[must_use]
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }

    /// Position of this color in allocation order (lane 0 is least significant).
    pub(crate) const fn ordinal(self) -> u32 {
        (self.0 as u32) | ((self.1 as u32) << 8) | ((self.2 as u32) << 16)
    }

    pub(crate) const fn from_ordinal(ordinal: u32) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "each lane is masked to one byte."
        )]
        Self(
            (ordinal & 0xff) as u8,
            ((ordinal >> 8) & 0xff) as u8,
            ((ordinal >> 16) & 0xff) as u8,
        )
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Layout position of a node, in diagram units.
///
/// `y` is always `-(depth * y_spacing)`; `x` is assigned by the layout pass.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Displacement {
    /// Horizontal displacement.
    pub x: i64,
    /// Vertical displacement (zero or negative, growing downward with depth).
    pub y: i64,
}

impl Displacement {
    /// The zero displacement.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a displacement.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the displacement as a Kurbo vector.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "layout coordinates stay far below 2^52."
    )]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }

    /// Returns the displacement as a Kurbo point.
    #[must_use]
    pub fn to_point(self) -> Point {
        self.to_vec2().to_point()
    }
}
