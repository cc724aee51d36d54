// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-step interpolation of the view translation toward a selected node.

use core::time::Duration;

use glam::{Mat4, Vec3};

use gds_diagram::NodeId;

use crate::camera::translation_of;

/// Timing and tolerance of camera transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionConfig {
    /// Number of ticks a transition takes along its longest axis.
    pub step_count: u16,
    /// Distance under which an axis counts as arrived.
    pub epsilon: f32,
    /// How often the host scheduler should call `tick` while a transition runs.
    pub tick_interval: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            step_count: 40,
            epsilon: 0.1,
            tick_interval: Duration::from_millis(50),
        }
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No transition is running.
    Idle,
    /// The view moved and the transition continues.
    Moving,
    /// The view reached the node; the transition is over.
    Settled(NodeId),
}

/// One running transition.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    target: NodeId,
    destination: Mat4,
    current: Vec3,
    /// Per-axis stride, fixed on the first tick.
    step: Option<Vec3>,
}

impl CameraTransition {
    /// Start moving from translation `from` toward the view `destination`.
    pub fn new(target: NodeId, from: Vec3, destination: Mat4) -> Self {
        Self {
            target,
            destination,
            current: from,
            step: None,
        }
    }

    /// The node this transition ends on.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Full view matrix at the end of the transition.
    pub fn destination(&self) -> Mat4 {
        self.destination
    }

    /// Current translation.
    pub fn current(&self) -> Vec3 {
        self.current
    }

    /// Advance one step.
    ///
    /// Every axis farther than `epsilon` from the destination moves by its
    /// stride, clamped so it never passes the destination. Returns `true` once
    /// all axes are within `epsilon` or have been clamped onto the destination,
    /// at which point the translation is snapped to the destination.
    pub fn advance(&mut self, config: &TransitionConfig) -> bool {
        let goal = translation_of(&self.destination);
        let start = self.current;
        let step = *self
            .step
            .get_or_insert_with(|| (start - goal).abs() / f32::from(config.step_count.max(1)));

        let epsilon = Vec3::splat(config.epsilon.max(0.0));
        let diff = goal - self.current;
        let remaining = diff.abs();
        // Axes within one stride land on the goal this tick, up to rounding.
        let landing = remaining.cmple(step) | remaining.cmple(epsilon);
        let stride = step.min(remaining) * diff.signum();
        self.current += Vec3::select(remaining.cmpgt(epsilon), stride, Vec3::ZERO);

        if landing.all() || (goal - self.current).abs().cmple(epsilon).all() {
            self.current = goal;
            true
        } else {
            false
        }
    }
}
