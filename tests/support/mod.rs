//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use lettertrace::{
    float_types::Real,
    geometry::{Point2, scale_point},
    letter::catalog,
    session::{Outcome, TracingSession, config::SessionConfig, replay},
};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Point-wise version of [`approx_eq`].
pub fn approx_point(a: &Point2, b: &Point2, eps: Real) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps)
}

pub fn pt(x: Real, y: Real) -> Point2 {
    Point2::new(x, y)
}

/// Fresh session for a built-in letter with the default configuration.
pub fn session(letter: &str) -> TracingSession {
    TracingSession::for_letter(letter, SessionConfig::default()).unwrap()
}

/// View-space start of `section` of a built-in letter at the default scale.
pub fn section_start(letter: &str, section: usize) -> Point2 {
    let def = catalog::definition(letter).unwrap();
    scale_point(&def.sections()[section].start(), SessionConfig::default().scale)
}

/// Traces the active section along its own path with 15 unit steps.
pub fn trace_active_section(session: &mut TracingSession) -> Vec<Outcome> {
    let section = session.letter().sections()[session.active_section()].clone();
    let samples =
        replay::ideal_samples(&section, session.config().scale, 15.0, session.tolerance());
    replay::trace(session, &samples)
}

/// Traces every remaining section of the letter.
pub fn trace_letter(session: &mut TracingSession) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    while !session.is_finished() {
        let before = session.active_section();
        outcomes.extend(trace_active_section(session));
        if !session.is_finished() && session.active_section() == before {
            panic!("section {before} was not completed: {outcomes:?}");
        }
    }
    outcomes
}
