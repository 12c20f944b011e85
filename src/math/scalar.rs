//! Scalar interpolation helpers shared by the density passes.

/// Clamp to [0, 1]. NaN maps to 0 so it can never reach a density grid.
#[inline]
pub fn saturate(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Unclamped linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep between `edge0` and `edge1`.
///
/// A degenerate range (`edge1 <= edge0`) behaves as a hard step: 1 strictly
/// above `edge0`, 0 at or below it.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x > edge0 { 1.0 } else { 0.0 };
    }
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Position of `v` inside `[min, max]` (not clamped). A degenerate range is a
/// step at `min`.
#[inline]
pub fn inverse_lerp(min: f32, max: f32, v: f32) -> f32 {
    let range = max - min;
    if range.abs() <= f32::EPSILON {
        return if v >= min { 1.0 } else { 0.0 };
    }
    (v - min) / range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-1.0), 0.0);
        assert_eq!(saturate(0.25), 0.25);
        assert_eq!(saturate(3.0), 1.0);
        assert_eq!(saturate(f32::NAN), 0.0);
        assert_eq!(saturate(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn test_smoothstep_is_hermite() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        // Slower than linear near the lower edge
        assert!(smoothstep(0.0, 1.0, 0.25) < 0.25);
        assert_eq!(smoothstep(0.5, 0.5, 0.49), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.5), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.51), 1.0);
        assert_eq!(smoothstep(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(0.0, 1.0, 0.3), 0.3);
        assert!((inverse_lerp(0.2, 0.6, 0.4) - 0.5).abs() < 1e-5);
        assert_eq!(inverse_lerp(0.5, 0.5, 0.7), 1.0);
        assert_eq!(inverse_lerp(0.5, 0.5, 0.2), 0.0);
    }
}
