// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction gating and the mapping from raw input to view offsets.

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// What the view is currently busy with.
    ///
    /// While any flag is set, user input (wheel, arrow keys, clicks) is ignored.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InteractionFlags: u8 {
        /// A click is waiting for its picking pass to be sampled.
        const PICKING       = 0b0000_0001;
        /// A camera transition owns the view.
        const TRANSITIONING = 0b0000_0010;
    }
}

/// Scaling of raw input into view units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputConfig {
    /// Wheel delta per unit of zoom. A notch of 120 zooms by half a unit.
    pub wheel_divisor: f64,
    /// Distance an arrow key pans the view.
    pub pan_step: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_divisor: 240.0,
            pan_step: 0.5,
        }
    }
}

impl InputConfig {
    /// Zoom offset for a wheel delta: scrolling forward moves the scene closer.
    #[must_use]
    pub fn zoom_for_wheel(&self, delta: f64) -> f64 {
        -delta / self.wheel_divisor
    }
}

/// Arrow-key pan directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
}

impl PanDirection {
    /// View translation for one key press.
    #[must_use]
    pub fn offset(self, step: f64) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-step, 0.0),
            Self::Right => Vec2::new(step, 0.0),
            Self::Up => Vec2::new(0.0, -step),
            Self::Down => Vec2::new(0.0, step),
        }
    }
}

/// Convert a top-left-origin window position into the bottom-left-origin
/// coordinates the picking buffer is read with.
#[must_use]
pub fn pick_point(position: Point, surface_height: f64) -> Point {
    Point::new(position.x, surface_height - position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_notch_zooms_half_a_unit() {
        let config = InputConfig::default();
        assert_eq!(config.zoom_for_wheel(120.0), -0.5);
        assert_eq!(config.zoom_for_wheel(-240.0), 1.0);
    }

    #[test]
    fn arrow_offsets() {
        assert_eq!(PanDirection::Left.offset(0.5), Vec2::new(-0.5, 0.0));
        assert_eq!(PanDirection::Right.offset(0.5), Vec2::new(0.5, 0.0));
        assert_eq!(PanDirection::Up.offset(0.5), Vec2::new(0.0, -0.5));
        assert_eq!(PanDirection::Down.offset(0.5), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn pick_point_flips_y() {
        assert_eq!(pick_point(Point::new(12.0, 30.0), 480.0), Point::new(12.0, 450.0));
    }
}
