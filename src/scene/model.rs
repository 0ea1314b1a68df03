//! Scene data types
//!
//! A Model owns its vertex and triangle lists; an Instance owns a private
//! copy of a Model plus its placement. Copy-on-place keeps instances
//! independent: transforming or editing one never leaks into siblings built
//! from the same source mesh.

use serde::{Serialize, Deserialize};

use crate::rasterizer::{Color, Mat4, Vec3, Vertex};
use super::SceneError;

/// A triangle face: three indices into the owning model's vertex list,
/// plus the flat face color. Indices are fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub color: Color,
}

impl Triangle {
    pub fn new(v0: usize, v1: usize, v2: usize, color: Color) -> Self {
        Self { v0, v1, v2, color }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.v0, self.v1, self.v2]
    }
}

/// A named mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, pos: Vec3, color: Color) -> usize {
        self.vertices.push(Vertex::new(pos, color));
        self.vertices.len() - 1
    }

    /// Add a triangle face
    pub fn add_triangle(&mut self, v0: usize, v1: usize, v2: usize, color: Color) {
        self.triangles.push(Triangle::new(v0, v1, v2, color));
    }

    /// Check every triangle index against the vertex list. A malformed
    /// model aborts the render; indices are never clamped.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (t, tri) in self.triangles.iter().enumerate() {
            for index in tri.indices() {
                if index >= self.vertices.len() {
                    return Err(SceneError::InvalidIndex {
                        model: self.name.clone(),
                        triangle: t,
                        index,
                        vertex_count: self.vertices.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// 2x2x2 cube around the origin, one color per side, corner-colored
    /// vertices for shaded fills
    pub fn cube(name: &str) -> Self {
        let corners = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
        ];
        let corner_colors = [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::YELLOW,
            Color::CYAN,
            Color::MAGENTA,
            Color::WHITE,
            Color::new(255, 128, 0),
        ];

        let mut model = Model::new(name);
        for (pos, color) in corners.iter().zip(corner_colors) {
            model.add_vertex(*pos, color);
        }

        let sides = [
            (0, 1, 2, 3, Color::RED),    // front
            (4, 0, 3, 7, Color::GREEN),  // right
            (5, 4, 7, 6, Color::BLUE),   // back
            (1, 5, 6, 2, Color::YELLOW), // left
            (4, 5, 1, 0, Color::CYAN),   // top
            (2, 6, 7, 3, Color::MAGENTA), // bottom
        ];
        for (a, b, c, d, color) in sides {
            model.add_triangle(a, b, c, color);
            model.add_triangle(a, c, d, color);
        }
        model
    }
}

/// A rigid/scaled placement: scale, then rotate about an axis, then
/// translate. The angle is in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_axis: Vec3,
    pub rotation_degrees: f32,
    pub scale: Vec3,
}

impl Transform {
    /// Translation only
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, axis: Vec3, degrees: f32) -> Self {
        self.rotation_axis = axis;
        self.rotation_degrees = degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// World matrix: translation * rotation * scaling
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.translation)
            * Mat4::rotation(self.rotation_axis, self.rotation_degrees)
            * Mat4::scaling(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_axis: Vec3::UP,
            rotation_degrees: 0.0,
            scale: Vec3::ONE,
        }
    }
}

/// A placed model. Owns its Model by value; clone the source model to
/// build several instances from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub model: Model,
    pub transform: Transform,
}

impl Instance {
    pub fn new(model: Model, transform: Transform) -> Self {
        Self { model, transform }
    }
}

/// An ordered collection of instances. List order is paint order: later
/// instances draw over earlier ones, there is no depth sorting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub instances: Vec<Instance>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instance(&mut self, instance: Instance) {
        self.instances.push(instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_is_valid() {
        let cube = Model::cube("cube");
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.triangles.len(), 12);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mut model = Model::new("broken");
        model.add_vertex(Vec3::ZERO, Color::WHITE);
        model.add_vertex(Vec3::ONE, Color::WHITE);
        model.add_triangle(0, 1, 2, Color::RED);
        match model.validate() {
            Err(SceneError::InvalidIndex { triangle, index, vertex_count, .. }) => {
                assert_eq!(triangle, 0);
                assert_eq!(index, 2);
                assert_eq!(vertex_count, 2);
            }
            other => panic!("expected InvalidIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_instances_own_their_model() {
        let source = Model::cube("cube");
        let a = Instance::new(source.clone(), Transform::default());
        let mut b = Instance::new(source, Transform::default());
        b.model.vertices[0].pos = Vec3::new(99.0, 99.0, 99.0);
        assert_eq!(a.model.vertices[0].pos, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_transform_applies_scale_rotate_translate_in_order() {
        use crate::rasterizer::Vec4;
        let t = Transform::at(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Vec3::UP, 90.0)
            .with_scale(Vec3::new(2.0, 1.0, 1.0));
        // (1,0,0) scales to (2,0,0), rotates to (0,0,-2), then translates
        let v = t.matrix() * Vec4::from_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((v.x - 10.0).abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
        assert!((v.z + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_default_transform_is_identity() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }
}
