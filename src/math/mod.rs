//! Mathematical utilities and geometric primitives

pub mod aabb;
pub mod rect;
pub mod polygon;
pub mod curve;
pub mod scalar;
pub mod range;

pub use aabb::Aabb;
pub use rect::{Rect, RectInt};
pub use polygon::Polygon;
pub use curve::ClosedCurve;
pub use range::FloatRange;
pub use scalar::{lerp, saturate, smoothstep, inverse_lerp};
