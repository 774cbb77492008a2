//! Fault types and tracing outcomes

use crate::float_types::Real;

/// Faults raised by the geometry primitives.
///
/// These are programmer-facing: callers either guard against them or treat
/// them as "no match".
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (DegenerateVector) A direction vector has zero length
    #[error("(DegenerateVector) direction vector has zero length")]
    DegenerateVector,
    /// (NoProjection) The projection parameter lies outside the accepted window
    #[error("(NoProjection) projection parameter t={t} lies outside the segment window")]
    NoProjection { t: Real },
}

/// Problems found while building or looking up letter definitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// (NotFound) No letter is registered under this name
    #[error("(NotFound) no letter definition named '{0}'")]
    NotFound(String),
    /// (EmptyLetter) A letter has no sections
    #[error("(EmptyLetter) letter '{0}' has no sections")]
    EmptyLetter(String),
    /// (EmptySection) A section has no subsections
    #[error("(EmptySection) a section must contain at least one subsection")]
    EmptySection,
    /// (DegenerateLine) Both endpoints of a line coincide
    #[error("(DegenerateLine) line endpoints coincide at ({x}, {y})")]
    DegenerateLine { x: Real, y: Real },
    /// (InvalidCurveRange) t_min is not below t_max
    #[error("(InvalidCurveRange) curve range [{t_min}, {t_max}] is empty")]
    InvalidCurveRange { t_min: Real, t_max: Real },
    /// (TooFewSegments) A curve must be sampled into at least one segment
    #[error("(TooFewSegments) a curve must be sampled into at least one segment")]
    TooFewSegments,
    /// (NonFiniteSample) A curve produced NaN or infinity
    #[error("(NonFiniteSample) curve sample at t={t} is not finite")]
    NonFiniteSample { t: Real },
    /// (DegenerateCurve) Two consecutive curve samples coincide
    #[error("(DegenerateCurve) curve samples {index} and {} coincide", .index + 1)]
    DegenerateCurve { index: usize },
    /// (DuplicateLetter) Two definitions share a name
    #[error("(DuplicateLetter) letter '{0}' is registered twice")]
    DuplicateLetter(String),
    /// (AlreadyInitialized) The process-wide catalog was installed before
    #[error("(AlreadyInitialized) the letter catalog is already initialized")]
    AlreadyInitialized,
}

/// Invalid configuration values or unreadable configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a failed tracing check.
///
/// These never abort a session. The state machine records them in its
/// counters and shows them through a transient marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TraceError {
    /// Contact began too far from the start of the section
    #[error("contact began too far from the start point")]
    TooFarFromStart,
    /// Movement left the tolerated corridor around the path
    #[error("movement is too far from the path")]
    TooFarFromLine,
    /// Movement near the path but against its direction
    #[error("movement goes against the path direction")]
    WrongDirection,
    /// Contact was released away from the end of the section
    #[error("contact was released too far from the end point")]
    TooFarFromEnd,
}
