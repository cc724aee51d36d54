// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed camera rig and the view matrices derived from it.
//!
//! There is no camera object that moves. The eye stays where the rig puts it
//! and the whole scene is shifted by translating the view matrix, so centering
//! a node means post-multiplying the rig's look-at matrix by the node's
//! displacement (with `y` mirrored).

use glam::{Mat4, Vec3};

use gds_diagram::Displacement;

/// Eye placement and projection shared by every view of a diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// Eye position.
    pub eye: Vec3,
    /// Point the eye looks at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Vertical field of view, in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, -4.0, -30.0),
            target: Vec3::new(0.0, -8.0, 0.0),
            up: Vec3::Y,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraRig {
    /// The untranslated look-at matrix.
    #[must_use]
    pub fn base_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// View matrix that puts a node with `displacement` at the center of the screen.
    #[must_use]
    pub fn centered_on(&self, displacement: Displacement) -> Mat4 {
        let (x, y) = displacement_to_f32(displacement);
        self.base_view() * Mat4::from_translation(Vec3::new(x, -y, 0.0))
    }

    /// Perspective projection for a surface with the given aspect ratio.
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// Model matrix placing a node's block in the scene.
///
/// It mirrors [`CameraRig::centered_on`], so a centered node lands on the eye axis.
#[must_use]
pub fn model_matrix(displacement: Displacement) -> Mat4 {
    let (x, y) = displacement_to_f32(displacement);
    Mat4::from_translation(Vec3::new(-x, y, 0.0))
}

/// The translation column of a view matrix.
#[must_use]
pub fn translation_of(view: &Mat4) -> Vec3 {
    view.w_axis.truncate()
}

/// Returns `view` with its translation column replaced.
#[must_use]
pub fn with_translation(view: Mat4, translation: Vec3) -> Mat4 {
    let mut out = view;
    out.w_axis = translation.extend(view.w_axis.w);
    out
}

#[allow(
    clippy::cast_precision_loss,
    reason = "layout coordinates stay far below 2^24."
)]
fn displacement_to_f32(displacement: Displacement) -> (f32, f32) {
    (displacement.x as f32, displacement.y as f32)
}
