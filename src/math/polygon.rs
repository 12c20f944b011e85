//! Closed polygon in the terrain's XZ plane.
//!
//! Containment uses the even-odd crossing rule (W. Randolph Franklin's
//! pnpoly): cast a ray along +X from the query point and count edge
//! crossings. Height (Y) is carried on the vertices but ignored by queries.

use glam::{Vec2, Vec3};

use super::Aabb;

/// Ordered, implicitly closed sequence of world-space vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Vec3>,
    bounds: Option<Aabb>,
}

impl Polygon {
    pub fn new(points: Vec<Vec3>) -> Self {
        let bounds = Aabb::from_points(&points);
        Self { points, bounds }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the vertices. Degenerate (zero-size at the origin) for
    /// an empty polygon.
    pub fn bounds(&self) -> Aabb {
        self.bounds.unwrap_or_default()
    }

    /// Even-odd containment of `point`'s XZ projection.
    pub fn contains(&self, point: Vec3) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !bounds.contains_xz(point) {
            return false;
        }

        let p = Vec2::new(point.x, point.z);
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = Vec2::new(self.points[i].x, self.points[i].z);
            let b = Vec2::new(self.points[j].x, self.points[j].z);
            // The first test excludes horizontal edges, so b.y - a.y != 0 below
            if (a.y > p.y) != (b.y > p.y)
                && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Nearest vertex to `point` (3D distance). Returns `point` itself for an
    /// empty polygon.
    pub fn closest_vertex(&self, point: Vec3) -> Vec3 {
        let mut best = point;
        let mut best_dist = f32::MAX;
        for v in &self.points {
            let d = v.distance(point);
            if d < best_dist {
                best = *v;
                best_dist = d;
            }
        }
        best
    }

    /// Vertex average. Inside every convex polygon.
    pub fn centroid(&self) -> Vec3 {
        if self.points.is_empty() {
            return Vec3::ZERO;
        }
        self.points.iter().copied().sum::<Vec3>() / self.points.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular(n: usize, radius: f32, center: Vec3) -> Polygon {
        let points = (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                center + Vec3::new(a.cos() * radius, 0.0, a.sin() * radius)
            })
            .collect();
        Polygon::new(points)
    }

    #[test]
    fn test_square_contains() {
        let square = Polygon::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ]);
        assert!(square.contains(Vec3::new(5.0, 0.0, 5.0)));
        assert!(square.contains(Vec3::new(5.0, 123.0, 5.0))); // height ignored
        assert!(!square.contains(Vec3::new(15.0, 0.0, 5.0)));
        assert!(!square.contains(Vec3::new(5.0, 0.0, -1.0)));
    }

    #[test]
    fn test_concave_contains() {
        // U shape: the notch between the arms is outside
        let u = Polygon::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(9.0, 0.0, 0.0),
            Vec3::new(9.0, 0.0, 9.0),
            Vec3::new(6.0, 0.0, 9.0),
            Vec3::new(6.0, 0.0, 3.0),
            Vec3::new(3.0, 0.0, 3.0),
            Vec3::new(3.0, 0.0, 9.0),
            Vec3::new(0.0, 0.0, 9.0),
        ]);
        assert!(u.contains(Vec3::new(1.5, 0.0, 6.0)));
        assert!(u.contains(Vec3::new(7.5, 0.0, 6.0)));
        assert!(!u.contains(Vec3::new(4.5, 0.0, 6.0)));
        assert!(u.contains(Vec3::new(4.5, 0.0, 1.5)));
    }

    #[test]
    fn test_regular_polygon_centroid_inside() {
        for n in [3, 5, 16, 64] {
            let poly = regular(n, 7.0, Vec3::new(100.0, 0.0, -40.0));
            assert!(poly.contains(poly.centroid()), "n={n}");
        }
    }

    #[test]
    fn test_winding_does_not_change_interior() {
        let ccw = regular(12, 5.0, Vec3::ZERO);
        let mut reversed = ccw.points().to_vec();
        reversed.reverse();
        let cw = Polygon::new(reversed);
        for p in [Vec3::ZERO, Vec3::new(2.0, 0.0, 1.0), Vec3::new(6.0, 0.0, 0.0)] {
            assert_eq!(ccw.contains(p), cw.contains(p));
        }
    }

    #[test]
    fn test_vertex_order_matters() {
        // Same vertex set, different order: a bow-tie instead of a square
        let bowtie = Polygon::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
        ]);
        assert!(!bowtie.contains(Vec3::new(5.0, 0.0, 2.0)));
        assert!(bowtie.contains(Vec3::new(2.0, 0.0, 5.0)));
    }

    #[test]
    fn test_empty_polygon() {
        let empty = Polygon::default();
        assert!(!empty.contains(Vec3::ZERO));
        assert_eq!(empty.bounds(), Aabb::default());
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(empty.closest_vertex(p), p);
    }

    #[test]
    fn test_closest_vertex() {
        let poly = regular(4, 10.0, Vec3::ZERO);
        let v = poly.closest_vertex(Vec3::new(8.0, 0.0, 1.0));
        assert!((v - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_bounds() {
        let poly = regular(4, 10.0, Vec3::new(5.0, 2.0, 5.0));
        let b = poly.bounds();
        assert!((b.min.x - -5.0).abs() < 1e-4);
        assert!((b.max.z - 15.0).abs() < 1e-4);
        assert_eq!(b.min.y, 2.0);
    }
}
