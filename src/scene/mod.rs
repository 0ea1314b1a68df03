//! Scene graph: models, placed instances, traversal and persistence
//!
//! Pure data structures plus the render traversal that feeds screen-space
//! triangles to the rasterizer. Scenes serialize to RON.

mod io;
mod model;
mod render;

pub use io::*;
pub use model::*;
pub use render::*;

/// Error type for scene validation and persistence
#[derive(Debug)]
pub enum SceneError {
    /// A triangle references a vertex index beyond its model's vertex list
    InvalidIndex {
        model: String,
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::Serialize(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::InvalidIndex { model, triangle, index, vertex_count } => write!(
                f,
                "Model '{}': triangle {} references vertex {} but the model has {} vertices",
                model, triangle, index, vertex_count
            ),
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}
