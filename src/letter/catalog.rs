//! Named, immutable registry of letter definitions.
//!
//! A process-wide catalog is installed once, either explicitly through [`init`]
//! or lazily with the built-in letters on first lookup, and is never mutated
//! afterwards. Lookups go through [`definition`], which fails with
//! [`CatalogError::NotFound`] for unknown names.

use crate::curve::Curve;
use crate::errors::CatalogError;
use crate::geometry::Point2;
use crate::letter::{LetterDefinition, Section, Subsection};
use hashbrown::HashMap;
use std::sync::{Arc, OnceLock};

static CATALOG: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();

/// Lookup table from letter identifier (e.g. `"a_big"`) to its definition.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    letters: HashMap<String, Arc<LetterDefinition>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, refusing to shadow an existing name.
    pub fn with_letter(mut self, letter: LetterDefinition) -> Result<Self, CatalogError> {
        self.insert(letter)?;
        Ok(self)
    }

    fn insert(&mut self, letter: LetterDefinition) -> Result<(), CatalogError> {
        let name = letter.name().to_owned();
        if self.letters.contains_key(&name) {
            return Err(CatalogError::DuplicateLetter(name));
        }
        self.letters.insert(name, Arc::new(letter));
        Ok(())
    }

    /// The letters shipped with the engine.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new().with_letter(a_big()?)?.with_letter(p_small()?)
    }

    pub fn definition(&self, name: &str) -> Result<Arc<LetterDefinition>, CatalogError> {
        self.letters
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.letters.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.letters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Installs `catalog` as the process-wide registry.
///
/// Must run before the first call to [`global`] or [`definition`]; afterwards
/// the registry is frozen and this returns [`CatalogError::AlreadyInitialized`].
pub fn init(catalog: Catalog) -> Result<(), CatalogError> {
    CATALOG
        .set(Ok(catalog))
        .map_err(|_| CatalogError::AlreadyInitialized)
}

/// The process-wide registry, populated with the built-in letters unless
/// [`init`] ran first.
pub fn global() -> Result<&'static Catalog, CatalogError> {
    CATALOG
        .get_or_init(Catalog::builtin)
        .as_ref()
        .map_err(Clone::clone)
}

/// Looks up a letter in the process-wide registry.
pub fn definition(name: &str) -> Result<Arc<LetterDefinition>, CatalogError> {
    global()?.definition(name)
}

fn line(p0: [f64; 2], p1: [f64; 2], visible_ends: bool) -> Result<Subsection, CatalogError> {
    Subsection::line(point(p0), point(p1), visible_ends)
}

#[allow(clippy::unnecessary_cast)]
fn point([x, y]: [f64; 2]) -> Point2 {
    Point2::new(x as _, y as _)
}

/// Capital A: both legs in one stroke, then the crossbar.
fn a_big() -> Result<LetterDefinition, CatalogError> {
    LetterDefinition::new(
        "a_big",
        vec![
            Section::new(vec![
                // left leg, bottom to top
                line([60.0, 350.0], [165.0, 95.0], true)?,
                // right leg, top to bottom
                line([165.0, 95.0], [260.0, 350.0], true)?,
            ])?,
            // crossbar, left to right
            Section::new(vec![line([97.0, 240.0], [227.0, 240.0], false)?])?,
        ],
    )
}

/// Small p: the stem downwards, then back up and round the bowl clockwise.
fn p_small() -> Result<LetterDefinition, CatalogError> {
    LetterDefinition::new(
        "p_small",
        vec![
            Section::new(vec![line([120.0, 90.0], [120.0, 350.0], true)?])?,
            Section::new(vec![
                // same stem, bottom to top but shorter
                line([120.0, 350.0], [120.0, 115.0], false)?,
                // bowl: radius 55 around (165, 155), open towards the stem
                Subsection::curve(
                    Curve::circular_arc(point([165.0, 155.0]), 55.0, 0.175, 1.825)?,
                    false,
                )?,
            ])?,
        ],
    )
}
