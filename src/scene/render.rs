//! Scene traversal
//!
//! Walks instances in paint order, runs every vertex through the full
//! model -> view -> projection -> viewport pipeline, and hands screen-space
//! triangles to the rasterizer.

use crate::rasterizer::{
    draw_filled_triangle, draw_shaded_triangle, draw_wireframe_triangle, project_vertex, Camera,
    FillMode, Framebuffer, Mat4, RenderSettings, Vec2, Vertex,
};

use super::model::{Instance, Scene, Triangle};
use super::SceneError;

/// Render a whole scene. Instances paint in list order; overlapping
/// triangles resolve to whoever painted last.
pub fn render_scene(
    fb: &mut Framebuffer,
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> Result<(), SceneError> {
    let aspect = fb.width as f32 / fb.height as f32;
    let view_projection = camera.view_projection(aspect);
    for instance in &scene.instances {
        render_instance(fb, instance, view_projection, settings)?;
    }
    Ok(())
}

/// Render one placed model: validate it, project every vertex through the
/// combined MVP, then rasterize its triangles.
pub fn render_instance(
    fb: &mut Framebuffer,
    instance: &Instance,
    view_projection: Mat4,
    settings: &RenderSettings,
) -> Result<(), SceneError> {
    instance.model.validate()?;

    let mvp = view_projection * instance.transform.matrix();
    let projected: Vec<Vec2> = instance
        .model
        .vertices
        .iter()
        .map(|v| project_vertex(v.pos, mvp, fb.width, fb.height))
        .collect();

    render_object(fb, &projected, &instance.model.vertices, &instance.model.triangles, settings);
    Ok(())
}

/// Rasterize already-projected triangles. Callers validate the model first;
/// indices are resolved as-is.
pub fn render_object(
    fb: &mut Framebuffer,
    projected: &[Vec2],
    vertices: &[Vertex],
    triangles: &[Triangle],
    settings: &RenderSettings,
) {
    for tri in triangles {
        let a = projected[tri.v0];
        let b = projected[tri.v1];
        let c = projected[tri.v2];
        match settings.fill_mode {
            FillMode::Wireframe => draw_wireframe_triangle(fb, a, b, c, tri.color),
            FillMode::Flat => draw_filled_triangle(fb, a, b, c, tri.color),
            FillMode::Shaded => draw_shaded_triangle(
                fb,
                a,
                vertices[tri.v0].color,
                b,
                vertices[tri.v1].color,
                c,
                vertices[tri.v2].color,
            ),
        }
    }
}
