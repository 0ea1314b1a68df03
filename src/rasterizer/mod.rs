//! Scanline software rasterizer
//!
//! Features:
//! - Half-open linear interpolation shared by every drawing path
//! - Line, wireframe, flat and per-vertex shaded triangle fills
//! - Look-at camera with perspective projection and viewport mapping
//! - Painter-order output (no z-buffer, no clipping)

mod camera;
mod interpolate;
mod math;
mod render;
mod types;

pub use camera::*;
pub use interpolate::*;
pub use math::*;
pub use render::*;
pub use types::*;

/// Default surface dimensions
pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 640;
