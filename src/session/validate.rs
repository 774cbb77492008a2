//! Per-move distance and direction check against one subsection.

use crate::errors::{GeometryError, TraceError};
use crate::float_types::Real;
use crate::geometry::{Point2, angle_between, distance, from_coord, nearest_point_on_segment};
use geo::LineString;
use tracing::warn;

/// Thresholds used by [`validate_movement`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveLimits {
    pub tolerance: Real,
    pub noise_floor: Real,
    pub max_direction_angle: Real,
}

/// Checks the move `old_pos -> pos` against the segments of `path`.
///
/// Segments are tried in order and the first one that passes wins:
/// - the projection of `pos` must exist and lie within `tolerance`;
/// - if the move is longer than the noise floor, its angle to the segment
///   direction must not exceed `max_direction_angle`.
///
/// When every segment fails, the kind recorded for the *last* failing segment
/// is returned, whichever kind that is.
pub fn validate_movement(
    old_pos: &Point2,
    pos: &Point2,
    path: &LineString<Real>,
    limits: &MoveLimits,
) -> Result<(), TraceError> {
    let movement = pos - old_pos;
    let check_direction = distance(old_pos, pos) > limits.noise_floor;
    let mut failure = TraceError::TooFarFromLine;

    for segment in path.lines() {
        let (p0, p1) = (from_coord(segment.start), from_coord(segment.end));

        let nearest = match nearest_point_on_segment(pos, &p0, &p1) {
            Ok(nearest) => nearest,
            Err(GeometryError::NoProjection { .. }) => {
                failure = TraceError::TooFarFromLine;
                continue;
            },
            Err(err) => {
                warn!(?p0, ?p1, %err, "skipping degenerate path segment");
                failure = TraceError::TooFarFromLine;
                continue;
            },
        };
        if distance(pos, &nearest) > limits.tolerance {
            failure = TraceError::TooFarFromLine;
            continue;
        }

        if check_direction {
            match angle_between(&movement, &(p1 - p0)) {
                Ok(angle) if angle <= limits.max_direction_angle => {},
                Ok(_) => {
                    failure = TraceError::WrongDirection;
                    continue;
                },
                Err(err) => {
                    warn!(?p0, ?p1, %err, "skipping degenerate path segment");
                    failure = TraceError::TooFarFromLine;
                    continue;
                },
            }
        }

        return Ok(());
    }

    Err(failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::to_line_string;

    fn limits(tolerance: Real) -> MoveLimits {
        MoveLimits {
            tolerance,
            noise_floor: 10.0,
            max_direction_angle: 90.0,
        }
    }

    fn horizontal() -> LineString<Real> {
        to_line_string(&[Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)])
    }

    #[test]
    fn forward_move_near_line_passes() {
        let result = validate_movement(
            &Point2::new(10.0, 2.0),
            &Point2::new(30.0, -3.0),
            &horizontal(),
            &limits(5.0),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn backward_move_near_line_is_wrong_direction() {
        let result = validate_movement(
            &Point2::new(60.0, 0.0),
            &Point2::new(40.0, 0.0),
            &horizontal(),
            &limits(5.0),
        );
        assert_eq!(result, Err(TraceError::WrongDirection));
    }

    #[test]
    fn short_backward_move_is_not_direction_checked() {
        let result = validate_movement(
            &Point2::new(45.0, 0.0),
            &Point2::new(40.0, 0.0),
            &horizontal(),
            &limits(5.0),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn far_move_is_too_far_from_line() {
        let result = validate_movement(
            &Point2::new(40.0, 0.0),
            &Point2::new(50.0, 20.0),
            &horizontal(),
            &limits(5.0),
        );
        assert_eq!(result, Err(TraceError::TooFarFromLine));
    }

    #[test]
    fn steep_forward_move_is_accepted() {
        let result = validate_movement(
            &Point2::new(48.0, -12.0),
            &Point2::new(50.0, 0.0),
            &horizontal(),
            &limits(5.0),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn last_failure_kind_wins() {
        // a path going right, then straight back left along y = 40
        let path = to_line_string(&[
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 40.0),
            Point2::new(0.0, 40.0),
        ]);

        // near the first segment but moving left; far from the later ones
        let result = validate_movement(
            &Point2::new(60.0, 0.0),
            &Point2::new(40.0, 0.0),
            &path,
            &limits(5.0),
        );
        assert_eq!(result, Err(TraceError::TooFarFromLine));

        // far from the first segment, moving right near the last one
        let result = validate_movement(
            &Point2::new(40.0, 40.0),
            &Point2::new(60.0, 40.0),
            &path,
            &limits(5.0),
        );
        assert_eq!(result, Err(TraceError::WrongDirection));
    }

    #[test]
    fn later_segment_can_pass_after_earlier_failures() {
        let path = to_line_string(&[
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
        ]);
        let result = validate_movement(
            &Point2::new(100.0, 30.0),
            &Point2::new(100.0, 50.0),
            &path,
            &limits(5.0),
        );
        assert_eq!(result, Ok(()));
    }
}
