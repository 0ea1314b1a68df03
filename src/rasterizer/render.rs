//! Framebuffer and scan-conversion
//!
//! Line and triangle rasterization over a plain RGBA pixel buffer. All
//! coordinates arriving here are already in screen space; the scene module
//! owns the 3D-to-screen transform.

use std::path::Path;

use super::interpolate::{interpolate, EPSILON};
use super::math::Vec2;
use super::types::Color;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    /// Fresh surface, cleared to opaque black
    pub fn new(width: usize, height: usize) -> Self {
        let mut fb = Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        };
        fb.clear(Color::BLACK);
        fb
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Write one pixel. Coordinates outside the surface are ignored; the
    /// rasterizers above this never bounds-check.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            let idx = (y as usize * self.width + x as usize) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Read one pixel back. Out-of-range coordinates read as black.
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            let idx = (y as usize * self.width + x as usize) * 4;
            Color::with_alpha(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            )
        } else {
            Color::BLACK
        }
    }

    /// Save the framebuffer contents as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}

/// Draw a straight segment between two screen points.
///
/// `x` is always the independent variable in the non-vertical case, so
/// steep segments (|dy| > |dx|) come out sparse, one pixel per column.
/// There is no slope switching.
pub fn draw_line(fb: &mut Framebuffer, p0: Vec2, p1: Vec2, color: Color) {
    let (mut p0, mut p1) = (p0, p1);

    if p0.x == p1.x {
        // Vertical: single pixel column, closed form
        if p0.y > p1.y {
            std::mem::swap(&mut p0, &mut p1);
        }
        let x = p0.x as i32;
        let mut y = p0.y;
        while y <= p1.y {
            fb.set_pixel(x, y as i32, color);
            y += 1.0;
        }
    } else {
        if p0.x > p1.x {
            std::mem::swap(&mut p0, &mut p1);
        }
        let ys = interpolate(p0.x, p0.y, p1.x, p1.y);
        for (k, y) in ys.iter().enumerate() {
            fb.set_pixel((p0.x + k as f32) as i32, *y as i32, color);
        }
        // The half-open sweep stops one column short of the far endpoint
        fb.set_pixel(p1.x as i32, p1.y as i32, color);
    }
}

/// Pairwise y-sort: swap (0,1), then (0,2), then (1,2)
fn sort_by_y(mut p: [Vec2; 3]) -> [Vec2; 3] {
    if p[1].y < p[0].y {
        p.swap(0, 1);
    }
    if p[2].y < p[0].y {
        p.swap(0, 2);
    }
    if p[2].y < p[1].y {
        p.swap(1, 2);
    }
    p
}

/// Same sort, carrying each vertex's color along
fn sort_by_y_with_colors(mut v: [(Vec2, Color); 3]) -> [(Vec2, Color); 3] {
    if v[1].0.y < v[0].0.y {
        v.swap(0, 1);
    }
    if v[2].0.y < v[0].0.y {
        v.swap(0, 2);
    }
    if v[2].0.y < v[1].0.y {
        v.swap(1, 2);
    }
    v
}

/// Edge samples of a dependent attribute over the edge's y span.
///
/// A zero-height edge contributes no scanlines. This keeps the two-short-
/// edges-vs-long-edge sample counts equal even for flat-top and flat-bottom
/// triangles, so the concatenated boundary always lines up row for row with
/// the long edge.
fn edge_samples(i0: f32, d0: f32, i1: f32, d1: f32) -> Vec<f32> {
    if (i1 - i0).abs() < EPSILON {
        return Vec::new();
    }
    interpolate(i0, d0, i1, d1)
}

/// Draw the three edges of a triangle, no fill
pub fn draw_wireframe_triangle(fb: &mut Framebuffer, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
    let [p0, p1, p2] = sort_by_y([p0, p1, p2]);
    draw_line(fb, p0, p1, color);
    draw_line(fb, p1, p2, color);
    draw_line(fb, p2, p0, color);
}

/// Fill a triangle with a single flat color
pub fn draw_filled_triangle(fb: &mut Framebuffer, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
    let [p0, p1, p2] = sort_by_y([p0, p1, p2]);

    // x along the two short edges, concatenated, and along the long edge
    let mut x012 = edge_samples(p0.y, p0.x, p1.y, p1.x);
    x012.extend(edge_samples(p1.y, p1.x, p2.y, p2.x));
    let x02 = edge_samples(p0.y, p0.x, p2.y, p2.x);
    if x012.is_empty() || x02.is_empty() {
        return; // zero height, no scanlines
    }
    debug_assert_eq!(x012.len(), x02.len());

    // One midpoint probe decides left/right for the whole triangle; the
    // two boundaries never cross between y0 and y2
    let mid = x012.len() / 2;
    let (x_left, x_right) = if x012[mid] > x02[mid] {
        (x02, x012)
    } else {
        (x012, x02)
    };

    let y_start = p0.y.ceil() as i32;
    for (row, (xl, xr)) in x_left.iter().zip(&x_right).enumerate() {
        let y = y_start + row as i32;
        for x in (xl.ceil() as i32)..(xr.ceil() as i32) {
            fb.set_pixel(x, y, color);
        }
    }
}

/// Fill a triangle, interpolating the vertex colors across the face.
///
/// The x boundaries are built exactly as in [`draw_filled_triangle`]; each
/// color channel rides the same edges and the same left/right decision, then
/// ramps across every scanline. Painted channels stay within the min/max of
/// the three vertex colors. A single-intensity shading variant is expressed
/// by pre-scaling a base color per vertex with [`Color::shade`].
pub fn draw_shaded_triangle(
    fb: &mut Framebuffer,
    p0: Vec2,
    c0: Color,
    p1: Vec2,
    c1: Color,
    p2: Vec2,
    c2: Color,
) {
    let [(p0, c0), (p1, c1), (p2, c2)] = sort_by_y_with_colors([(p0, c0), (p1, c1), (p2, c2)]);

    let mut x012 = edge_samples(p0.y, p0.x, p1.y, p1.x);
    x012.extend(edge_samples(p1.y, p1.x, p2.y, p2.x));
    let x02 = edge_samples(p0.y, p0.x, p2.y, p2.x);
    if x012.is_empty() || x02.is_empty() {
        return;
    }
    debug_assert_eq!(x012.len(), x02.len());

    // r, g, b along the same edges, same concatenation
    let ch0 = c0.channels();
    let ch1 = c1.channels();
    let ch2 = c2.channels();
    let mut ch012: [Vec<f32>; 3] = Default::default();
    let mut ch02: [Vec<f32>; 3] = Default::default();
    for ch in 0..3 {
        let mut edge = edge_samples(p0.y, ch0[ch], p1.y, ch1[ch]);
        edge.extend(edge_samples(p1.y, ch1[ch], p2.y, ch2[ch]));
        ch012[ch] = edge;
        ch02[ch] = edge_samples(p0.y, ch0[ch], p2.y, ch2[ch]);
    }

    let mid = x012.len() / 2;
    let long_left = x012[mid] > x02[mid];
    let (x_left, x_right) = if long_left { (&x02, &x012) } else { (&x012, &x02) };
    let (ch_left, ch_right) = if long_left { (&ch02, &ch012) } else { (&ch012, &ch02) };

    let y_start = p0.y.ceil() as i32;
    for (row, (xl, xr)) in x_left.iter().zip(x_right.iter()).enumerate() {
        let y = y_start + row as i32;
        let x_first = xl.ceil() as i32;
        let x_last = xr.ceil() as i32;
        if x_first >= x_last {
            continue;
        }

        // Ramp each channel across the scanline
        let reds = interpolate(*xl, ch_left[0][row], *xr, ch_right[0][row]);
        let greens = interpolate(*xl, ch_left[1][row], *xr, ch_right[1][row]);
        let blues = interpolate(*xl, ch_left[2][row], *xr, ch_right[2][row]);

        for (k, x) in (x_first..x_last).enumerate() {
            fb.set_pixel(x, y, Color::from_channels(reds[k], greens[k], blues[k]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(fb: &Framebuffer) -> Vec<(i32, i32, Color)> {
        let mut out = Vec::new();
        for y in 0..fb.height as i32 {
            for x in 0..fb.width as i32 {
                let c = fb.pixel(x, y);
                if c != Color::BLACK {
                    out.push((x, y, c));
                }
            }
        }
        out
    }

    #[test]
    fn test_set_pixel_out_of_bounds_ignored() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(-1, 0, Color::RED);
        fb.set_pixel(0, -1, Color::RED);
        fb.set_pixel(4, 0, Color::RED);
        fb.set_pixel(0, 4, Color::RED);
        assert!(painted(&fb).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new(4, 4);
        fb.clear(Color::BLUE);
        assert_eq!(fb.pixel(3, 3), Color::BLUE);
    }

    #[test]
    fn test_horizontal_line_pixel_count() {
        let mut fb = Framebuffer::new(8, 8);
        draw_line(&mut fb, Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Color::RED);
        let px = painted(&fb);
        assert_eq!(px.len(), 5);
        for (x, y, _) in &px {
            assert_eq!(*y, 0);
            assert!((0..=4).contains(x));
        }
    }

    #[test]
    fn test_vertical_line_pixel_count() {
        let mut fb = Framebuffer::new(8, 8);
        draw_line(&mut fb, Vec2::new(0.0, 0.0), Vec2::new(0.0, 4.0), Color::RED);
        let px = painted(&fb);
        assert_eq!(px.len(), 5);
        for (x, _, _) in &px {
            assert_eq!(*x, 0);
        }
    }

    #[test]
    fn test_line_endpoint_order_irrelevant() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(6.0, 4.0);
        let mut fb1 = Framebuffer::new(8, 8);
        let mut fb2 = Framebuffer::new(8, 8);
        draw_line(&mut fb1, a, b, Color::GREEN);
        draw_line(&mut fb2, b, a, Color::GREEN);
        assert_eq!(painted(&fb1), painted(&fb2));
    }

    #[test]
    fn test_steep_line_is_column_sparse() {
        // x stays the independent variable, so a steep segment paints one
        // pixel per column plus the stamped endpoint
        let mut fb = Framebuffer::new(8, 8);
        draw_line(&mut fb, Vec2::new(0.0, 0.0), Vec2::new(1.0, 6.0), Color::RED);
        assert_eq!(painted(&fb).len(), 2);
    }

    #[test]
    fn test_filled_triangle_area_and_bounds() {
        let mut fb = Framebuffer::new(8, 8);
        draw_filled_triangle(
            &mut fb,
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
            Color::RED,
        );
        let px = painted(&fb);
        // Half-open rows 0..4 with widths 4, 3, 2, 1
        assert_eq!(px.len(), 10);
        for (x, y, _) in &px {
            assert!((0..4).contains(x));
            assert!((0..4).contains(y));
        }
    }

    #[test]
    fn test_filled_triangle_vertex_order_irrelevant() {
        let pts = [Vec2::new(1.0, 1.0), Vec2::new(6.0, 2.0), Vec2::new(3.0, 6.0)];
        let orders = [[0, 1, 2], [2, 0, 1], [1, 2, 0], [2, 1, 0]];
        let mut reference: Option<Vec<(i32, i32, Color)>> = None;
        for order in orders {
            let mut fb = Framebuffer::new(8, 8);
            draw_filled_triangle(&mut fb, pts[order[0]], pts[order[1]], pts[order[2]], Color::BLUE);
            let px = painted(&fb);
            match &reference {
                Some(r) => assert_eq!(&px, r),
                None => reference = Some(px),
            }
        }
    }

    #[test]
    fn test_zero_height_triangle_paints_nothing() {
        let mut fb = Framebuffer::new(8, 8);
        draw_filled_triangle(
            &mut fb,
            Vec2::new(0.0, 2.0),
            Vec2::new(3.0, 2.0),
            Vec2::new(6.0, 2.0),
            Color::RED,
        );
        assert!(painted(&fb).is_empty());
    }

    #[test]
    fn test_shaded_triangle_channel_bounds() {
        let mut fb = Framebuffer::new(16, 16);
        let c0 = Color::new(10, 20, 30);
        let c1 = Color::new(200, 20, 30);
        let c2 = Color::new(10, 220, 30);
        draw_shaded_triangle(
            &mut fb,
            Vec2::new(0.0, 0.0),
            c0,
            Vec2::new(12.0, 2.0),
            c1,
            Vec2::new(3.0, 14.0),
            c2,
        );
        let px = painted(&fb);
        assert!(!px.is_empty());
        for (_, _, c) in &px {
            assert!((10..=200).contains(&c.r));
            assert!((20..=220).contains(&c.g));
            assert_eq!(c.b, 30);
        }
    }

    #[test]
    fn test_shaded_matches_flat_coverage() {
        // Both fills walk identical boundaries, so they paint the same set
        let pts = [Vec2::new(1.0, 0.0), Vec2::new(7.0, 3.0), Vec2::new(2.0, 7.0)];
        let mut flat = Framebuffer::new(8, 8);
        let mut shaded = Framebuffer::new(8, 8);
        draw_filled_triangle(&mut flat, pts[0], pts[1], pts[2], Color::WHITE);
        draw_shaded_triangle(
            &mut shaded,
            pts[0],
            Color::RED,
            pts[1],
            Color::GREEN,
            pts[2],
            Color::BLUE,
        );
        let flat_set: Vec<(i32, i32)> = painted(&flat).iter().map(|(x, y, _)| (*x, *y)).collect();
        let shaded_set: Vec<(i32, i32)> = painted(&shaded).iter().map(|(x, y, _)| (*x, *y)).collect();
        assert_eq!(flat_set, shaded_set);
    }

    #[test]
    fn test_wireframe_stays_in_bounding_box() {
        let mut fb = Framebuffer::new(16, 16);
        draw_wireframe_triangle(
            &mut fb,
            Vec2::new(2.0, 1.0),
            Vec2::new(12.0, 4.0),
            Vec2::new(5.0, 11.0),
            Color::GREEN,
        );
        let px = painted(&fb);
        assert!(!px.is_empty());
        for (x, y, _) in &px {
            assert!((2..=12).contains(x));
            assert!((1..=11).contains(y));
        }
    }
}
