//! Camera and the vertex placement pipeline
//!
//! A vertex travels model → world → view → clip → screen. The world step
//! lives with the scene instances; this module owns the view and projection
//! matrices and the final perspective divide + viewport mapping.

use serde::{Serialize, Deserialize};

use super::math::{Mat4, Vec2, Vec3, Vec4};

/// A |w| below this skips the perspective divide: the clip-space coordinates
/// pass through unchanged. There is no frustum clipping anywhere in the
/// pipeline, so vertices at or behind the eye plane still produce screen
/// positions; triangles touching them render wrong, they just never divide
/// by zero.
const W_EPSILON: f32 = 1e-6;

/// Look-at camera with a perspective projection
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::UP,
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov_y_degrees, aspect, self.near, self.far)
    }

    /// Projection * view, ready to be combined with a world matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

/// Place a model-space position onto the screen.
///
/// Transforms by the combined MVP matrix, divides x and y by w, then maps
/// NDC into pixels. Row 0 is the top of the surface, so y flips.
pub fn project_vertex(pos: Vec3, mvp: Mat4, width: usize, height: usize) -> Vec2 {
    let clip = mvp * Vec4::from_point(pos);

    let (x, y) = if clip.w.abs() < W_EPSILON {
        (clip.x, clip.y)
    } else {
        let reciprocal_w = 1.0 / clip.w;
        (clip.x * reciprocal_w, clip.y * reciprocal_w)
    };

    Vec2::new(
        (x + 1.0) * 0.5 * width as f32,
        (1.0 - y) * 0.5 * height as f32,
    )
}
