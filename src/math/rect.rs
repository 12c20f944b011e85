//! 2D rectangles in normalized/world space (`Rect`) and raster pixel space
//! (`RectInt`).

use crate::core::types::{IVec2, Vec2};

/// Float rectangle stored by its corners.
///
/// Stored as min/max rather than origin/size so that adjacent rectangles
/// produced by splitting share bit-identical edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// The full normalized terrain rectangle.
    pub const UNIT: Rect = Rect { min: Vec2::ZERO, max: Vec2::ONE };

    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self { min: position, max: position + size }
    }

    pub fn position(&self) -> Vec2 {
        self.min
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Clip both corners into [0, 1]². Never inverts.
    pub fn saturated(&self) -> Rect {
        let min = self.min.clamp(Vec2::ZERO, Vec2::ONE);
        let max = self.max.clamp(Vec2::ZERO, Vec2::ONE).max(min);
        Rect { min, max }
    }

    /// Half-open containment: min edges inclusive, max edges exclusive.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.max.x > self.min.x && other.min.x < self.max.x &&
        other.max.y > self.min.y && other.min.y < self.max.y
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Multiply position and size by `scale`.
    pub fn scaled(&self, scale: Vec2) -> Rect {
        Rect { min: self.min * scale, max: self.max * scale }
    }

    /// Scale into a raster of `resolution` pixels per unit. Position and size
    /// are rounded independently (ties to even).
    pub fn to_pixels(&self, resolution: Vec2) -> RectInt {
        let position = self.min * resolution;
        let size = self.size() * resolution;
        RectInt::new(
            position.x.round_ties_even() as i32,
            position.y.round_ties_even() as i32,
            size.x.round_ties_even() as i32,
            size.y.round_ties_even() as i32,
        )
    }
}

/// Integer rectangle in a raster's pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RectInt {
    pub position: IVec2,
    pub size: IVec2,
}

impl RectInt {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Swap the x/y axes of both position and size.
    pub fn flipped(&self) -> RectInt {
        RectInt {
            position: IVec2::new(self.position.y, self.position.x),
            size: IVec2::new(self.size.y, self.size.x),
        }
    }

    /// Length of the diagonal in pixels.
    pub fn diagonal(&self) -> f32 {
        self.size.as_vec2().length()
    }

    /// Normalize against a raster of `resolution` pixels per side.
    pub fn normalized(&self, resolution: u32) -> Rect {
        let res = resolution.max(1) as f32;
        Rect::from_position_size(self.position.as_vec2() / res, self.size.as_vec2() / res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturated_clips_out_of_range() {
        let r = Rect::new(Vec2::new(-0.5, 0.25), Vec2::new(0.5, 1.5)).saturated();
        assert_eq!(r.min, Vec2::new(0.0, 0.25));
        assert_eq!(r.max, Vec2::new(0.5, 1.0));

        let outside = Rect::new(Vec2::splat(2.0), Vec2::splat(3.0)).saturated();
        assert!(outside.is_empty());
    }

    #[test]
    fn test_overlaps_is_strict() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(0.5));
        let b = Rect::new(Vec2::splat(0.5), Vec2::ONE);
        let c = Rect::new(Vec2::splat(0.25), Vec2::ONE);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(!Rect::default().overlaps(&Rect::UNIT));
    }

    #[test]
    fn test_contains_half_open() {
        let r = Rect::UNIT;
        assert!(r.contains(Vec2::ZERO));
        assert!(r.contains(Vec2::splat(0.999)));
        assert!(!r.contains(Vec2::new(1.0, 0.5)));
    }

    #[test]
    fn test_to_pixels_rounds_position_and_size() {
        let r = Rect::from_position_size(Vec2::new(0.25, 0.5), Vec2::new(0.5, 0.25));
        let px = r.to_pixels(Vec2::splat(512.0));
        assert_eq!(px, RectInt::new(128, 256, 256, 128));

        let thirds = Rect::from_position_size(Vec2::ZERO, Vec2::splat(1.0 / 3.0));
        assert_eq!(thirds.to_pixels(Vec2::splat(100.0)).size, IVec2::splat(33));
    }

    #[test]
    fn test_flipped_and_normalized() {
        let r = RectInt::new(10, 20, 30, 40);
        let f = r.flipped();
        assert_eq!(f, RectInt::new(20, 10, 40, 30));
        assert_eq!(f.flipped(), r);

        let n = RectInt::new(64, 128, 64, 64).normalized(256);
        assert_eq!(n.min, Vec2::new(0.25, 0.5));
        assert_eq!(n.size(), Vec2::splat(0.25));
    }

    #[test]
    fn test_union() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(0.25));
        let b = Rect::new(Vec2::new(0.5, 0.1), Vec2::new(0.75, 0.2));
        let u = a.union(&b);
        assert_eq!(u.min, Vec2::ZERO);
        assert_eq!(u.max, Vec2::new(0.75, 0.25));
    }
}
