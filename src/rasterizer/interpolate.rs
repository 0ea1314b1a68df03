//! Linear interpolation over integer steps of an independent variable
//!
//! The one primitive every rasterizer path is built on: edge walking for
//! lines, triangle boundaries, and per-scanline color ramps all sample a
//! linear function this way.

/// Threshold below which a span counts as zero-length
pub const EPSILON: f32 = 1e-6;

/// Sample the linear function through `(i0, d0)` and `(i1, d1)` once per
/// integer step of the independent variable over the half-open range
/// `[i0, i1)`.
///
/// Returns `ceil(i1) - ceil(i0)` samples starting exactly at `d0`; index `k`
/// corresponds to independent value `i0 + k`. A zero-length span
/// (`|i1 - i0| < EPSILON`) yields the single sample `[d0]`, and a reversed
/// span yields nothing.
///
/// The half-open convention is what keeps adjacent triangle edges from
/// double-counting their shared vertex: for y0 <= y1 <= y2 the sample
/// counts of edges (y0,y1) and (y1,y2) always sum to the count of (y0,y2).
pub fn interpolate(i0: f32, d0: f32, i1: f32, d1: f32) -> Vec<f32> {
    if (i1 - i0).abs() < EPSILON {
        return vec![d0];
    }

    let a = (d1 - d0) / (i1 - i0);
    let steps = (i1.ceil() - i0.ceil()) as i64;
    if steps <= 0 {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(steps as usize);
    let mut d = d0;
    for _ in 0..steps {
        values.push(d);
        d += a;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_integer_endpoints() {
        let values = interpolate(0.0, 10.0, 5.0, 20.0);
        assert_eq!(values.len(), 5);
    }

    #[test]
    fn test_length_fractional_endpoints() {
        // ceil(2.5) - ceil(0.5) = 2
        let values = interpolate(0.5, 0.0, 2.5, 4.0);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_first_sample_is_d0() {
        let values = interpolate(3.0, -7.5, 9.0, 12.0);
        assert_eq!(values[0], -7.5);
    }

    #[test]
    fn test_monotonic_increasing() {
        let values = interpolate(0.0, 1.0, 10.0, 31.0);
        for pair in values.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_monotonic_decreasing() {
        let values = interpolate(0.0, 8.0, 16.0, -8.0);
        for pair in values.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_degenerate_span() {
        assert_eq!(interpolate(4.0, 2.5, 4.0, 99.0), vec![2.5]);
    }

    #[test]
    fn test_reversed_span_is_empty() {
        assert!(interpolate(5.0, 0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_slope() {
        let values = interpolate(0.0, 0.0, 4.0, 8.0);
        assert_eq!(values, vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_adjacent_edges_cover_long_edge() {
        // Sample counts of the two short edges sum to the long edge's count,
        // including fractional endpoints
        for &(y0, y1, y2) in &[(0.0f32, 2.0f32, 5.0f32), (0.3, 1.7, 4.2), (1.5, 1.9, 6.25)] {
            let short = interpolate(y0, 0.0, y1, 0.0).len() + interpolate(y1, 0.0, y2, 0.0).len();
            let long = interpolate(y0, 0.0, y2, 0.0).len();
            assert_eq!(short, long);
        }
    }
}
