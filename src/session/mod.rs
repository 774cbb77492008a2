//! The tracing state machine.
//!
//! A [`TracingSession`] follows one letter attempt. Pointer samples arrive one
//! at a time as begin / move / end events for a single contact. Each sample is
//! checked against the active subsection of the letter; accepted samples grow
//! the live trace, failed ones are counted and put the session on hold until
//! the contact is lifted.
//!
//! ```text
//! Idle --begin--> Tracing(section i, subsection k) --...--> Completed --(delay)--> Idle
//!                      |                  ^
//!                  error on begin/move    | end
//!                      v                  |
//!                   ErrorHold ------------+
//! ```

pub mod config;
pub mod deferred;
pub mod event;
pub mod replay;
pub mod validate;

use crate::errors::{Result, TraceError};
use crate::float_types::Real;
use crate::geometry::{Point2, distance, scale_point, to_line_string};
use crate::hints::{HintChanges, HintExtractor, HintGeometry};
use crate::letter::{LetterDefinition, Subsection, catalog};
use config::SessionConfig;
use deferred::{DeferredAction, DeferredKind, DeferredQueue};
use event::{Phase, PointerEvent};
use geo::LineString;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace, warn};
use validate::{MoveLimits, validate_movement};

/// How many times each kind of tracing error happened in this attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorCounters {
    pub too_far_from_start: u32,
    pub too_far_from_line: u32,
    pub wrong_direction: u32,
    pub too_far_from_end: u32,
}

impl ErrorCounters {
    fn record(&mut self, kind: TraceError) {
        match kind {
            TraceError::TooFarFromStart => self.too_far_from_start += 1,
            TraceError::TooFarFromLine => self.too_far_from_line += 1,
            TraceError::WrongDirection => self.wrong_direction += 1,
            TraceError::TooFarFromEnd => self.too_far_from_end += 1,
        }
    }

    pub const fn get(&self, kind: TraceError) -> u32 {
        match kind {
            TraceError::TooFarFromStart => self.too_far_from_start,
            TraceError::TooFarFromLine => self.too_far_from_line,
            TraceError::WrongDirection => self.wrong_direction,
            TraceError::TooFarFromEnd => self.too_far_from_end,
        }
    }

    pub const fn total(&self) -> u32 {
        self.too_far_from_start + self.too_far_from_line + self.wrong_direction + self.too_far_from_end
    }
}

/// Transient marker shown where the last error happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorMarker {
    pub kind: TraceError,
    pub position: Point2,
}

/// Trace of a completed section, kept until the letter is reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub section: usize,
    pub path: LineString<Real>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No contact is being traced.
    Idle,
    Tracing { section: usize, subsection: usize },
    /// An error happened; moves are ignored until the contact is lifted.
    ErrorHold,
    /// Every section is done; waiting for the reset.
    Completed,
}

/// What a single pointer sample did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The sample was not processed (extra contacts, hold, no active trace).
    Ignored,
    /// The sample extended the live trace.
    Accepted,
    /// The sample extended the trace and moved on to the next subsection.
    SubsectionAdvanced { subsection: usize },
    /// The release committed a section; the next one is now active.
    SectionCompleted { section: usize },
    /// The release committed the last section.
    Completed,
    /// The release lifted an error hold.
    HoldCleared,
    Rejected(TraceError),
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub letter: &'a LetterDefinition,
    pub scale: Real,
    pub active_section: usize,
    pub active_subsection: usize,
    pub points: &'a [Point2],
    pub strokes: &'a [Stroke],
    pub hints: Option<&'a HintGeometry>,
    pub hint_changes: HintChanges,
    pub tolerance: Real,
    pub errors: ErrorCounters,
    pub released_after_error: bool,
    pub finished: bool,
    pub marker: Option<ErrorMarker>,
}

/// Runtime state of one letter attempt.
#[derive(Debug, Clone)]
pub struct TracingSession {
    letter: Arc<LetterDefinition>,
    config: SessionConfig,

    section: usize,
    subsection: usize,
    tolerance: Real,
    points: Vec<Point2>,
    strokes: Vec<Stroke>,
    errors: ErrorCounters,
    released_after_error: bool,
    old_finger_pos: Option<Point2>,
    finished: bool,

    /// off-path errors since the last tolerance escalation
    line_error_streak: u32,
    marker: Option<ErrorMarker>,

    /// view-space polyline of the active subsection
    active_path: LineString<Real>,
    hints: HintExtractor,
    hint_changes: HintChanges,

    epoch: u64,
    deferred: DeferredQueue,
}

impl TracingSession {
    pub fn new(letter: Arc<LetterDefinition>, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let mut session = Self {
            tolerance: config.tolerance,
            letter,
            config,
            section: 0,
            subsection: 0,
            points: Vec::new(),
            strokes: Vec::new(),
            errors: ErrorCounters::default(),
            released_after_error: true,
            old_finger_pos: None,
            finished: false,
            line_error_streak: 0,
            marker: None,
            active_path: LineString::new(Vec::new()),
            hints: HintExtractor::new(),
            hint_changes: HintChanges::default(),
            epoch: 0,
            deferred: DeferredQueue::default(),
        };
        session.refresh_active();
        Ok(session)
    }

    /// Starts a session for a letter of the process-wide catalog.
    pub fn for_letter(name: &str, config: SessionConfig) -> Result<Self> {
        Self::new(catalog::definition(name)?, config)
    }

    /// Dispatches a pointer sample.
    ///
    /// Samples reporting more than one contact are ignored and leave the
    /// session untouched.
    pub fn handle(&mut self, event: &PointerEvent) -> Outcome {
        if !event.is_single_contact() {
            trace!(contacts = event.contact_count, "ignoring multi-contact sample");
            return Outcome::Ignored;
        }
        match event.phase {
            Phase::Begin => self.begin(event.position),
            Phase::Move => self.move_to(event.position),
            Phase::End => self.release(event.position),
        }
    }

    /// Contact begins at `pos`.
    pub fn begin(&mut self, pos: Point2) -> Outcome {
        if self.finished || !self.released_after_error {
            return Outcome::Ignored;
        }

        // a new interaction: anything scheduled before it is stale
        self.epoch += 1;
        self.points.clear();
        self.set_subsection(0);

        let start = scale_point(&self.current_subsection().start(), self.config.scale);
        if distance(&pos, &start) > self.tolerance {
            debug!(?pos, ?start, tolerance = self.tolerance, "begin too far from start");
            self.old_finger_pos = None;
            self.released_after_error = false;
            self.record_error(TraceError::TooFarFromStart, pos);
            return Outcome::Rejected(TraceError::TooFarFromStart);
        }

        debug!(section = self.section, ?pos, "trace started");
        self.points.push(pos);
        self.old_finger_pos = Some(pos);
        Outcome::Accepted
    }

    /// Contact moves to `pos`.
    pub fn move_to(&mut self, pos: Point2) -> Outcome {
        if self.finished || !self.released_after_error {
            return Outcome::Ignored;
        }
        let Some(old_pos) = self.old_finger_pos else {
            return Outcome::Ignored;
        };
        if old_pos == pos {
            return Outcome::Accepted;
        }

        let limits = MoveLimits {
            tolerance: self.tolerance,
            noise_floor: self.config.noise_floor,
            max_direction_angle: self.config.max_direction_angle,
        };
        if let Err(kind) = validate_movement(&old_pos, &pos, &self.active_path, &limits) {
            debug!(?pos, ?kind, section = self.section, subsection = self.subsection, "move rejected");
            self.released_after_error = false;
            self.record_error(kind, pos);
            return Outcome::Rejected(kind);
        }

        trace!(?pos, "move accepted");
        self.points.push(pos);
        self.old_finger_pos = Some(pos);

        let remaining = self.section_len() - self.subsection - 1;
        if remaining > 0 {
            let terminal = scale_point(&self.current_subsection().terminal(), self.config.scale);
            if distance(&pos, &terminal) <= self.tolerance {
                let next = self.subsection + 1;
                self.set_subsection(next);
                debug!(section = self.section, subsection = next, "subsection reached");
                return Outcome::SubsectionAdvanced { subsection: next };
            }
        }
        Outcome::Accepted
    }

    /// Contact lifts at `pos`.
    pub fn release(&mut self, pos: Point2) -> Outcome {
        if self.finished {
            return Outcome::Ignored;
        }

        let was_tracing = self.old_finger_pos.take().is_some();
        let reached_subsection = self.subsection;
        self.set_subsection(0);

        if !self.released_after_error {
            // the section restarts; completed sections stay
            self.released_after_error = true;
            self.points.clear();
            debug!(section = self.section, "error hold cleared");
            return Outcome::HoldCleared;
        }
        if !was_tracing {
            return Outcome::Ignored;
        }

        let at_last = reached_subsection + 1 == self.section_len();
        let terminal = scale_point(&self.letter.sections()[self.section].terminal(), self.config.scale);
        if !at_last || distance(&pos, &terminal) > self.tolerance {
            debug!(?pos, ?terminal, at_last, "released before the end of the section");
            self.points.clear();
            self.record_error(TraceError::TooFarFromEnd, pos);
            return Outcome::Rejected(TraceError::TooFarFromEnd);
        }

        let completed = self.section;
        let path = to_line_string(&std::mem::take(&mut self.points));
        self.strokes.push(Stroke { section: completed, path });

        if completed + 1 == self.letter.section_count() {
            info!(letter = self.letter.name(), errors = self.errors.total(), "letter completed");
            self.finished = true;
            self.deferred.schedule(
                DeferredKind::Reset,
                self.epoch,
                self.config.completion_reset_delay(),
            );
            return Outcome::Completed;
        }

        info!(letter = self.letter.name(), section = completed, "section completed");
        self.section += 1;
        self.refresh_active();
        Outcome::SectionCompleted { section: completed }
    }

    /// Restores the initial configuration of the attempt.
    pub fn reset(&mut self) {
        info!(letter = self.letter.name(), "session reset");
        self.section = 0;
        self.subsection = 0;
        self.tolerance = self.config.tolerance;
        self.points.clear();
        self.strokes.clear();
        self.errors = ErrorCounters::default();
        self.released_after_error = true;
        self.old_finger_pos = None;
        self.finished = false;
        self.line_error_streak = 0;
        self.marker = None;
        self.epoch += 1;
        self.deferred.clear();
        self.refresh_active();
    }

    /// Runs every deferred action due at `now`; returns how many took effect.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.deferred.drain_due(now);
        due.iter().filter(|action| self.apply_deferred(action)).count()
    }

    /// Runs one deferred action regardless of its deadline, for hosts that
    /// drive their own timers. Returns false if the action was stale.
    pub fn run_deferred(&mut self, action: &DeferredAction) -> bool {
        self.deferred.remove(action);
        self.apply_deferred(action)
    }

    /// When the host should call [`tick`](Self::tick) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deferred.next_deadline()
    }

    pub fn pending_deferred(&self) -> &[DeferredAction] {
        self.deferred.pending()
    }

    fn apply_deferred(&mut self, action: &DeferredAction) -> bool {
        if action.epoch != self.epoch {
            debug!(kind = ?action.kind, action_epoch = action.epoch, epoch = self.epoch, "dropping stale deferred action");
            return false;
        }
        match action.kind {
            DeferredKind::SoftClear => {
                debug!("soft-clearing trace after error");
                // an accepted begin would have advanced the epoch, so the live
                // trace here belongs to the failed attempt
                self.points.clear();
                self.marker = None;
            },
            DeferredKind::Reset => self.reset(),
        }
        true
    }

    fn record_error(&mut self, kind: TraceError, pos: Point2) {
        self.errors.record(kind);
        self.marker = Some(ErrorMarker { kind, position: pos });

        match kind {
            TraceError::TooFarFromLine => {
                self.line_error_streak += 1;
                if self.line_error_streak >= self.config.escalation_threshold {
                    self.line_error_streak = 0;
                    self.tolerance += self.config.tolerance_increment;
                    info!(tolerance = self.tolerance, "tolerance escalated");
                }
            },
            TraceError::WrongDirection => self.line_error_streak = 0,
            TraceError::TooFarFromStart | TraceError::TooFarFromEnd => {},
        }

        self.deferred
            .replace(DeferredKind::SoftClear, self.epoch, self.config.error_clear_delay());
    }

    fn section_len(&self) -> usize {
        self.letter.sections()[self.section].len()
    }

    fn current_subsection(&self) -> &Subsection {
        &self.letter.sections()[self.section].subsections()[self.subsection]
    }

    fn set_subsection(&mut self, subsection: usize) {
        if self.subsection != subsection {
            self.subsection = subsection;
            self.refresh_active();
        }
    }

    /// Recomputes the cached path and hints after a cursor change.
    fn refresh_active(&mut self) {
        self.active_path = self.current_subsection().scaled_polyline(self.config.scale);
        match self.hints.update(&self.letter, self.section, self.config.scale) {
            Ok(changes) => {
                if changes.any() {
                    debug!(section = self.section, ?changes, "hints updated");
                }
                self.hint_changes = changes;
            },
            Err(err) => warn!(%err, "could not derive hints"),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.finished {
            SessionPhase::Completed
        } else if !self.released_after_error {
            SessionPhase::ErrorHold
        } else if self.old_finger_pos.is_some() {
            SessionPhase::Tracing {
                section: self.section,
                subsection: self.subsection,
            }
        } else {
            SessionPhase::Idle
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            letter: &self.letter,
            scale: self.config.scale,
            active_section: self.section,
            active_subsection: self.subsection,
            points: &self.points,
            strokes: &self.strokes,
            hints: self.hints.hints(),
            hint_changes: self.hint_changes,
            tolerance: self.tolerance,
            errors: self.errors,
            released_after_error: self.released_after_error,
            finished: self.finished,
            marker: self.marker,
        }
    }

    pub fn letter(&self) -> &LetterDefinition {
        &self.letter
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub const fn active_section(&self) -> usize {
        self.section
    }

    pub const fn active_subsection(&self) -> usize {
        self.subsection
    }

    pub const fn tolerance(&self) -> Real {
        self.tolerance
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub const fn errors(&self) -> ErrorCounters {
        self.errors
    }

    pub const fn released_after_error(&self) -> bool {
        self.released_after_error
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    pub const fn marker(&self) -> Option<ErrorMarker> {
        self.marker
    }

    pub const fn old_finger_pos(&self) -> Option<Point2> {
        self.old_finger_pos
    }

    pub const fn hints(&self) -> Option<&HintGeometry> {
        self.hints.hints()
    }

    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub const fn active_path(&self) -> &LineString<Real> {
        &self.active_path
    }
}
