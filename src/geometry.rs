//! 2D vector helpers shared by the letter model, the validator and the hint
//! extractor.
//!
//! Vector algebra itself (add, sub, dot, scale, length) comes straight from
//! nalgebra; this module adds the handful of operations the engine needs on top.

use crate::errors::GeometryError;
use crate::float_types::{EPSILON, PROJECTION_OVERSHOOT, Real};
use geo::{Coord, LineString};

pub type Point2 = nalgebra::Point2<Real>;
pub type Vector2 = nalgebra::Vector2<Real>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(p0: &Point2, p1: &Point2) -> Real {
    nalgebra::distance(p0, p1)
}

/// Projects `p` onto the line through `p0` and `p1`.
///
/// The projection parameter `t = dot(p - p0, p1 - p0) / dot(p1 - p0, p1 - p0)`
/// must lie within `[-0.075, 1.075]`, i.e. slightly past either end of the
/// segment still counts. Outside that window there is no projection.
///
/// # Example
/// ```
/// # use lettertrace::geometry::{nearest_point_on_segment, Point2};
/// let p = nearest_point_on_segment(
///     &Point2::new(10.5, 3.0),
///     &Point2::new(0.0, 0.0),
///     &Point2::new(10.0, 0.0),
/// ).unwrap();
/// assert!((p.x - 10.5).abs() < 1e-6);
/// assert_eq!(p.y, 0.0);
/// ```
pub fn nearest_point_on_segment(
    p: &Point2,
    p0: &Point2,
    p1: &Point2,
) -> Result<Point2, GeometryError> {
    let direction = p1 - p0;
    let len_sq = direction.dot(&direction);
    if len_sq < EPSILON * EPSILON {
        return Err(GeometryError::DegenerateVector);
    }

    let t = (p - p0).dot(&direction) / len_sq;
    if !(-PROJECTION_OVERSHOOT..=1.0 + PROJECTION_OVERSHOOT).contains(&t) {
        return Err(GeometryError::NoProjection { t });
    }

    Ok(p0 + direction * t)
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_between(v0: &Vector2, v1: &Vector2) -> Result<Real, GeometryError> {
    let n0 = v0.norm();
    let n1 = v1.norm();
    if n0 < EPSILON || n1 < EPSILON {
        return Err(GeometryError::DegenerateVector);
    }

    // rounding can push the cosine a hair outside [-1, 1]
    let cos = (v0.dot(v1) / (n0 * n1)).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}

/// Signed rotation (degrees) that turns the +x axis onto the direction `p0 -> p1`.
///
/// The sign follows the y-component of the direction, so in a y-down view
/// space a positive angle is a clockwise rotation.
pub fn rotation_angle(p0: &Point2, p1: &Point2) -> Result<Real, GeometryError> {
    let direction = p1 - p0;
    let angle = angle_between(&Vector2::x(), &direction)?;
    Ok(if direction.y < 0.0 { -angle } else { angle })
}

/// Uniformly scales a design-space point into view space.
#[inline]
pub fn scale_point(p: &Point2, scale: Real) -> Point2 {
    Point2::from(p.coords * scale)
}

#[inline]
pub fn to_coord(p: &Point2) -> Coord<Real> {
    Coord { x: p.x, y: p.y }
}

#[inline]
pub fn from_coord(c: Coord<Real>) -> Point2 {
    Point2::new(c.x, c.y)
}

/// Builds a `LineString` from a point sequence.
pub fn to_line_string(points: &[Point2]) -> LineString<Real> {
    points.iter().map(to_coord).collect()
}
