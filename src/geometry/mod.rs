//! Bridges between egui's `f32` geometry and kurbo transforms.
//!
//! Surfaces keep their current transform as a [`kurbo::Affine`]. The helpers
//! here map egui points through it and read back the rotation and uniform
//! scale the glyph and stroke code needs.

pub use kurbo::Affine;

use egui::{Pos2, Vec2};
use kurbo::{Line, ParamCurveNearest as _, Point};

/// Tolerance passed to kurbo's nearest-point queries
const NEAREST_ACCURACY: f64 = 1e-6;

pub fn to_point(p: Pos2) -> Point {
    Point::new(p.x as f64, p.y as f64)
}

pub fn to_pos2(p: Point) -> Pos2 {
    Pos2::new(p.x as f32, p.y as f32)
}

pub fn to_vec(v: Vec2) -> kurbo::Vec2 {
    kurbo::Vec2::new(v.x as f64, v.y as f64)
}

/// Map a point from local to surface coordinates
pub fn transform_pos(transform: Affine, p: Pos2) -> Pos2 {
    to_pos2(transform * to_point(p))
}

/// Rotation angle of the transform's x axis, in radians
pub fn rotation(transform: Affine) -> f32 {
    let [a, b, ..] = transform.as_coeffs();
    b.atan2(a) as f32
}

/// Length a unit x vector maps to. Uniform for the transforms surfaces build.
pub fn scale_factor(transform: Affine) -> f32 {
    let [a, b, ..] = transform.as_coeffs();
    a.hypot(b) as f32
}

/// Inverse of `transform`, or `None` when it collapses the plane
pub fn checked_inverse(transform: Affine) -> Option<Affine> {
    (transform.determinant().abs() > f64::EPSILON).then(|| transform.inverse())
}

/// Distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let nearest = Line::new(to_point(a), to_point(b)).nearest(to_point(p), NEAREST_ACCURACY);
    nearest.distance_sq.sqrt() as f32
}
