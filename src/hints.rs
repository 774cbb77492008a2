//! Coaching geometry for the active section: where to start, which way to go
//! at each direction change, and where to stop.
//!
//! [`HintExtractor`] is a pure function of `(letter, section, scale)` plus a
//! cache. Each part of the cached geometry is only replaced when the newly
//! derived value differs coordinate-wise, so renderers can skip redrawing
//! parts that did not change.

use crate::errors::{CatalogError, GeometryError};
use crate::float_types::Real;
use crate::geometry::{Point2, rotation_angle, scale_point};
use crate::letter::{LetterDefinition, Section};

/// Two view-space points describing a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionPair {
    pub p0: Point2,
    pub p1: Point2,
}

impl DirectionPair {
    pub fn new((p0, p1): (Point2, Point2), scale: Real) -> Self {
        Self {
            p0: scale_point(&p0, scale),
            p1: scale_point(&p1, scale),
        }
    }

    /// Rotation in degrees for a glyph drawn along +x at `p0`.
    pub fn rotation_angle(&self) -> Result<Real, GeometryError> {
        rotation_angle(&self.p0, &self.p1)
    }
}

/// Start marker, direction arrows and end marker of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct HintGeometry {
    /// first two points of the section, giving the initial direction
    pub start: DirectionPair,
    /// one arrow per subsection after the first
    pub arrows: Vec<DirectionPair>,
    pub end: Point2,
}

impl HintGeometry {
    /// Derives the hints of `section` in view space.
    pub fn derive(section: &Section, scale: Real) -> Self {
        Self {
            start: DirectionPair::new(section.first().direction_pair(), scale),
            arrows: section
                .subsections()
                .iter()
                .skip(1)
                .map(|sub| DirectionPair::new(sub.arrow_pair(), scale))
                .collect(),
            end: scale_point(&section.terminal(), scale),
        }
    }
}

/// Which parts of the cached hints were replaced by the last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintChanges {
    pub start: bool,
    pub arrows: bool,
    pub end: bool,
}

impl HintChanges {
    pub const fn any(&self) -> bool {
        self.start || self.arrows || self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
struct HintKey {
    letter: String,
    section: usize,
    scale: Real,
}

#[derive(Debug, Clone, Default)]
pub struct HintExtractor {
    key: Option<HintKey>,
    hints: Option<HintGeometry>,
}

impl HintExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached hints from the last successful update.
    pub const fn hints(&self) -> Option<&HintGeometry> {
        self.hints.as_ref()
    }

    /// Recomputes the hints for `section` of `letter` if the key changed.
    pub fn update(
        &mut self,
        letter: &LetterDefinition,
        section: usize,
        scale: Real,
    ) -> Result<HintChanges, CatalogError> {
        let key = HintKey {
            letter: letter.name().to_owned(),
            section,
            scale,
        };
        if self.key.as_ref() == Some(&key) {
            return Ok(HintChanges::default());
        }

        let active = letter
            .section(section)
            .ok_or_else(|| CatalogError::NotFound(format!("{}[{section}]", letter.name())))?;
        let fresh = HintGeometry::derive(active, scale);
        self.key = Some(key);

        let Some(cached) = self.hints.as_mut() else {
            self.hints = Some(fresh);
            return Ok(HintChanges { start: true, arrows: true, end: true });
        };

        let mut changes = HintChanges::default();
        if cached.start != fresh.start {
            cached.start = fresh.start;
            changes.start = true;
        }
        if cached.arrows != fresh.arrows {
            cached.arrows = fresh.arrows;
            changes.arrows = true;
        }
        if cached.end != fresh.end {
            cached.end = fresh.end;
            changes.end = true;
        }
        Ok(changes)
    }
}
