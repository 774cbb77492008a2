//! A **letter tracing** validation engine: guides a finger or pointer along a
//! letter built from lines and parametric curves, judging every sample for
//! distance to the path and direction of travel.
//!
//! A letter ([`letter::LetterDefinition`]) is an ordered list of sections, each
//! one continuous stroke made of [`letter::Subsection`]s. A
//! [`session::TracingSession`] consumes begin / move / end samples of a single
//! contact, keeps the live trace and the committed strokes, escalates its
//! tolerance when the user keeps missing the path, and exposes hint geometry
//! (start point, direction arrows, end point) for the active section.
//!
//! ```
//! use lettertrace::session::{TracingSession, config::SessionConfig, event::PointerEvent};
//!
//! let mut session = TracingSession::for_letter("p_small", SessionConfig::default()).unwrap();
//! // the stem of the p starts at (120, 90) in design space, scaled by 1.75
//! session.handle(&PointerEvent::begin(210.0, 157.5));
//! assert_eq!(session.points().len(), 1);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **svg-io**: export templates, hints and traces as SVG
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod curve;
pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod hints;
pub mod io;
pub mod letter;
pub mod session;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{Error, Result, TraceError};
pub use letter::LetterDefinition;
pub use session::TracingSession;
