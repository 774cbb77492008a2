//! Synthetic on-path traces, used by the demo binary and the tests.

use super::event::PointerEvent;
use super::{Outcome, TracingSession};
use crate::float_types::Real;
use crate::geometry::{Point2, distance, scale_point};
use crate::letter::Section;

/// View-space samples of a finger following `section` at roughly `step`
/// spacing.
///
/// A finger moving on to the next subsection does so as soon as it is within
/// `tolerance` of the current subsection's end, and picks the next
/// subsection up where it is ahead of the finger, not at its first vertex.
pub fn ideal_samples(section: &Section, scale: Real, step: Real, tolerance: Real) -> Vec<Point2> {
    let mut samples: Vec<Point2> = Vec::new();
    let count = section.len();

    for (j, sub) in section.subsections().iter().enumerate() {
        let walk = walk_polyline(sub.polyline(), scale, step);
        let terminal = scale_point(&sub.terminal(), scale);
        let mut ahead = samples.is_empty();

        for (i, &p) in walk.iter().enumerate() {
            if !ahead {
                let Some(&last) = samples.last() else { break };
                let dir = match walk.get(i + 1) {
                    Some(next) => next - p,
                    None => p - walk[i.saturating_sub(1)],
                };
                if (p - last).dot(&dir) <= 0.0 {
                    continue;
                }
                ahead = true;
            }
            if samples.last() != Some(&p) {
                samples.push(p);
            }
            if j + 1 < count && distance(&p, &terminal) <= tolerance {
                break;
            }
        }
    }
    samples
}

fn walk_polyline(polyline: &[Point2], scale: Real, step: Real) -> Vec<Point2> {
    let mut walk = Vec::new();
    for pair in polyline.windows(2) {
        let (a, b) = (scale_point(&pair[0], scale), scale_point(&pair[1], scale));
        let n = (distance(&a, &b) / step).ceil().max(1.0) as usize;
        let start = if walk.is_empty() { 0 } else { 1 };
        for k in start..=n {
            walk.push(a + (b - a) * (k as Real / n as Real));
        }
    }
    walk
}

/// Feeds `samples` as begin, moves and a release at the last sample.
/// Returns the outcome of every event in order.
pub fn trace(session: &mut TracingSession, samples: &[Point2]) -> Vec<Outcome> {
    let Some((first, rest)) = samples.split_first() else {
        return Vec::new();
    };
    let mut outcomes = Vec::with_capacity(samples.len() + 1);
    outcomes.push(session.handle(&PointerEvent::begin(first.x, first.y)));
    for p in rest {
        outcomes.push(session.handle(&PointerEvent::moved(p.x, p.y)));
    }
    let last = samples[samples.len() - 1];
    outcomes.push(session.handle(&PointerEvent::end(last.x, last.y)));
    outcomes
}
