//! Parametric curves given as compiled closures, and their fixed-resolution
//! sampling into polylines.

use crate::errors::CatalogError;
use crate::float_types::{DEFAULT_CURVE_SEGMENTS, PI, Real};
use crate::geometry::{Point2, distance};
use std::fmt;
use std::sync::Arc;

/// One coordinate of a parametric curve as a function of `t`.
pub type CurveFn = Arc<dyn Fn(Real) -> Real + Send + Sync>;

/// Samples `(x(t), y(t))` at `segments + 1` uniform steps over `[t_min, t_max]`.
///
/// Both ends are evaluated exactly at `t_min` and `t_max`.
pub fn sample_curve<X, Y>(
    x_of_t: X,
    y_of_t: Y,
    t_min: Real,
    t_max: Real,
    segments: usize,
) -> Vec<Point2>
where
    X: Fn(Real) -> Real,
    Y: Fn(Real) -> Real,
{
    let segments = segments.max(1);
    let step = (t_max - t_min) / segments as Real;
    (0..=segments)
        .map(|i| {
            let t = if i == segments {
                t_max
            } else {
                t_min + step * i as Real
            };
            Point2::new(x_of_t(t), y_of_t(t))
        })
        .collect()
}

/// A parametric curve `t -> (x(t), y(t))` over `[t_min, t_max]`.
#[derive(Clone)]
pub struct Curve {
    x_of_t: CurveFn,
    y_of_t: CurveFn,
    t_min: Real,
    t_max: Real,
    segments: usize,
}

impl Curve {
    /// Creates a curve sampled with the default resolution of 50 segments.
    pub fn new<X, Y>(x_of_t: X, y_of_t: Y, t_min: Real, t_max: Real) -> Result<Self, CatalogError>
    where
        X: Fn(Real) -> Real + Send + Sync + 'static,
        Y: Fn(Real) -> Real + Send + Sync + 'static,
    {
        Self::with_segments(x_of_t, y_of_t, t_min, t_max, DEFAULT_CURVE_SEGMENTS)
    }

    pub fn with_segments<X, Y>(
        x_of_t: X,
        y_of_t: Y,
        t_min: Real,
        t_max: Real,
        segments: usize,
    ) -> Result<Self, CatalogError>
    where
        X: Fn(Real) -> Real + Send + Sync + 'static,
        Y: Fn(Real) -> Real + Send + Sync + 'static,
    {
        if t_min.is_nan() || t_max.is_nan() || t_min >= t_max {
            return Err(CatalogError::InvalidCurveRange { t_min, t_max });
        }
        if segments == 0 {
            return Err(CatalogError::TooFewSegments);
        }
        Ok(Self {
            x_of_t: Arc::new(x_of_t),
            y_of_t: Arc::new(y_of_t),
            t_min,
            t_max,
            segments,
        })
    }

    /// Arc of the circle around `center` traced by
    /// `x = cx - r·cos(tπ)`, `y = cy - r·sin(tπ)`.
    ///
    /// `t` in `[0, 2]` covers the full circle starting on the left and running
    /// clockwise in a y-down view space.
    pub fn circular_arc(
        center: Point2,
        radius: Real,
        t_min: Real,
        t_max: Real,
    ) -> Result<Self, CatalogError> {
        let (cx, cy) = (center.x, center.y);
        Self::new(
            move |t| cx + radius * -(t * PI).cos(),
            move |t| cy + radius * -(t * PI).sin(),
            t_min,
            t_max,
        )
    }

    pub const fn t_min(&self) -> Real {
        self.t_min
    }

    pub const fn t_max(&self) -> Real {
        self.t_max
    }

    pub const fn segments(&self) -> usize {
        self.segments
    }

    /// Evaluates the curve at a single parameter value.
    pub fn point_at(&self, t: Real) -> Point2 {
        Point2::new((self.x_of_t)(t), (self.y_of_t)(t))
    }

    /// Samples the curve into `segments + 1` points.
    pub fn sample(&self) -> Vec<Point2> {
        sample_curve(
            self.x_of_t.as_ref(),
            self.y_of_t.as_ref(),
            self.t_min,
            self.t_max,
            self.segments,
        )
    }

    /// Samples the curve and checks the result is usable as a polyline.
    pub(crate) fn sample_checked(&self) -> Result<Vec<Point2>, CatalogError> {
        let points = self.sample();
        let step = (self.t_max - self.t_min) / self.segments as Real;
        for (i, p) in points.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(CatalogError::NonFiniteSample {
                    t: self.t_min + step * i as Real,
                });
            }
        }
        if let Some(index) = points
            .windows(2)
            .position(|w| distance(&w[0], &w[1]) <= crate::float_types::EPSILON)
        {
            return Err(CatalogError::DegenerateCurve { index });
        }
        Ok(points)
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("t_min", &self.t_min)
            .field("t_max", &self.t_max)
            .field("segments", &self.segments)
            .finish_non_exhaustive()
    }
}
