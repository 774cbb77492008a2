//! Pointer samples delivered by the input collaborator.

use crate::float_types::Real;
use crate::geometry::Point2;

/// Lifecycle phase of the single tracked contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Begin,
    Move,
    End,
}

/// One pointer sample in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Contacts currently reported by the input layer
    pub contact_count: u32,
    pub position: Point2,
    pub phase: Phase,
}

impl PointerEvent {
    pub const fn new(contact_count: u32, position: Point2, phase: Phase) -> Self {
        Self { contact_count, position, phase }
    }

    /// Single-contact begin at `(x, y)`.
    pub fn begin(x: Real, y: Real) -> Self {
        Self::new(1, Point2::new(x, y), Phase::Begin)
    }

    /// Single-contact move to `(x, y)`.
    pub fn moved(x: Real, y: Real) -> Self {
        Self::new(1, Point2::new(x, y), Phase::Move)
    }

    /// Release at `(x, y)`, no contact left.
    pub fn end(x: Real, y: Real) -> Self {
        Self::new(0, Point2::new(x, y), Phase::End)
    }

    /// Same sample reported with a different number of contacts.
    pub const fn with_contacts(mut self, contact_count: u32) -> Self {
        self.contact_count = contact_count;
        self
    }

    /// Whether the session may act on this sample.
    ///
    /// Begin and move need exactly one contact; an end may report the
    /// lifted contact or none at all.
    pub const fn is_single_contact(&self) -> bool {
        match self.phase {
            Phase::Begin | Phase::Move => self.contact_count == 1,
            Phase::End => self.contact_count <= 1,
        }
    }
}
