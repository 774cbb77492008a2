//! Static description of a letter: sections made of line and curve subsections.
//!
//! Coordinates live in a fixed design space. Consumers scale them into view
//! space with the session's `scale` before comparing them with pointer input.
//! Every constructor validates its input, so malformed letters are rejected when
//! the catalog is built rather than in the middle of a trace.

pub mod catalog;

use crate::curve::Curve;
use crate::errors::CatalogError;
use crate::float_types::{EPSILON, Real};
use crate::geometry::{Point2, distance, scale_point, to_line_string};
use geo::LineString;

/// Closed set of path primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsectionKind {
    Line,
    Curve,
}

/// Geometric payload of a subsection.
#[derive(Debug, Clone)]
pub enum Primitive {
    Line { p0: Point2, p1: Point2 },
    Curve(Curve),
}

/// One primitive of a letter path.
#[derive(Debug, Clone)]
pub struct Subsection {
    primitive: Primitive,
    /// rounded (visible) caps at the ends; rendering only
    visible_ends: bool,
    /// design-space polyline, two points for a line
    polyline: Vec<Point2>,
}

impl Subsection {
    /// Straight line from `p0` to `p1`, traced in that direction.
    pub fn line(p0: Point2, p1: Point2, visible_ends: bool) -> Result<Self, CatalogError> {
        if distance(&p0, &p1) <= EPSILON {
            return Err(CatalogError::DegenerateLine { x: p0.x, y: p0.y });
        }
        Ok(Self {
            primitive: Primitive::Line { p0, p1 },
            visible_ends,
            polyline: vec![p0, p1],
        })
    }

    /// Parametric curve, traced from `t_min` towards `t_max`.
    pub fn curve(curve: Curve, visible_ends: bool) -> Result<Self, CatalogError> {
        let polyline = curve.sample_checked()?;
        Ok(Self {
            primitive: Primitive::Curve(curve),
            visible_ends,
            polyline,
        })
    }

    pub fn kind(&self) -> SubsectionKind {
        match self.primitive {
            Primitive::Line { .. } => SubsectionKind::Line,
            Primitive::Curve(_) => SubsectionKind::Curve,
        }
    }

    pub const fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub const fn visible_ends(&self) -> bool {
        self.visible_ends
    }

    /// Design-space polyline: the endpoints of a line, or the sampled curve.
    pub fn polyline(&self) -> &[Point2] {
        &self.polyline
    }

    /// View-space polyline used for validation.
    pub fn scaled_polyline(&self, scale: Real) -> LineString<Real> {
        let scaled: Vec<Point2> = self.polyline.iter().map(|p| scale_point(p, scale)).collect();
        to_line_string(&scaled)
    }

    /// First point of the primitive (design space).
    pub fn start(&self) -> Point2 {
        self.polyline[0]
    }

    /// Last point of the primitive (design space).
    pub fn terminal(&self) -> Point2 {
        self.polyline[self.polyline.len() - 1]
    }

    /// The first two polyline points, giving the initial direction.
    pub fn direction_pair(&self) -> (Point2, Point2) {
        (self.polyline[0], self.polyline[1])
    }

    /// Points used to orient a direction-change arrow.
    ///
    /// For a curve the second point sits a tenth of the way along the samples,
    /// which approximates the initial tangent better than the first segment.
    pub fn arrow_pair(&self) -> (Point2, Point2) {
        match self.primitive {
            Primitive::Line { p0, p1 } => (p0, p1),
            Primitive::Curve(_) => {
                let idx = (self.polyline.len() / 10).max(1);
                (self.polyline[0], self.polyline[idx])
            }
        }
    }
}

/// One continuous stroke of a letter.
#[derive(Debug, Clone)]
pub struct Section {
    subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(subsections: Vec<Subsection>) -> Result<Self, CatalogError> {
        if subsections.is_empty() {
            return Err(CatalogError::EmptySection);
        }
        Ok(Self { subsections })
    }

    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }

    pub fn subsection(&self, j: usize) -> Option<&Subsection> {
        self.subsections.get(j)
    }

    pub fn len(&self) -> usize {
        self.subsections.len()
    }

    /// Always false; kept alongside `len` for clippy.
    pub fn is_empty(&self) -> bool {
        self.subsections.is_empty()
    }

    pub fn first(&self) -> &Subsection {
        &self.subsections[0]
    }

    pub fn last(&self) -> &Subsection {
        &self.subsections[self.subsections.len() - 1]
    }

    /// Where tracing of this section begins (design space).
    pub fn start(&self) -> Point2 {
        self.first().start()
    }

    /// Where tracing of this section ends (design space).
    pub fn terminal(&self) -> Point2 {
        self.last().terminal()
    }
}

/// Immutable, named description of a whole letter.
#[derive(Debug, Clone)]
pub struct LetterDefinition {
    name: String,
    sections: Vec<Section>,
}

impl LetterDefinition {
    pub fn new(name: impl Into<String>, sections: Vec<Section>) -> Result<Self, CatalogError> {
        let name = name.into();
        if sections.is_empty() {
            return Err(CatalogError::EmptyLetter(name));
        }
        Ok(Self { name, sections })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, i: usize) -> Option<&Section> {
        self.sections.get(i)
    }

    pub fn subsection(&self, i: usize, j: usize) -> Option<&Subsection> {
        self.sections.get(i).and_then(|s| s.subsection(j))
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn subsection_count(&self, i: usize) -> Option<usize> {
        self.sections.get(i).map(Section::len)
    }
}
