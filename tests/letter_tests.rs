mod support;

use lettertrace::curve::{Curve, sample_curve};
use lettertrace::errors::CatalogError;
use lettertrace::letter::catalog::{self, Catalog};
use lettertrace::letter::{LetterDefinition, Section, Subsection, SubsectionKind};
use support::{approx_point, pt};

#[test]
fn sampling_is_deterministic_and_hits_both_ends() {
    let curve = Curve::with_segments(|t| t, |t| t * t, 0.0, 1.0, 4).unwrap();
    let a = curve.sample();
    let b = curve.sample();
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
    assert_eq!(a[0], pt(0.0, 0.0));
    assert_eq!(a[4], pt(1.0, 1.0));
    assert!(approx_point(&a[2], &pt(0.5, 0.25), 1e-12));

    let free = sample_curve(|t| 2.0 * t, |_| 1.0, 0.0, 3.0, 3);
    assert_eq!(free, vec![pt(0.0, 1.0), pt(2.0, 1.0), pt(4.0, 1.0), pt(6.0, 1.0)]);
}

#[test]
fn circular_arc_endpoints() {
    let arc = Curve::circular_arc(pt(0.0, 0.0), 10.0, 0.0, 1.0).unwrap();
    assert_eq!(arc.segments(), 50);
    // starts on the left, passes the top (y-down) at t = 0.5, ends on the right
    assert!(approx_point(&arc.point_at(0.0), &pt(-10.0, 0.0), 1e-9));
    assert!(approx_point(&arc.point_at(0.5), &pt(0.0, -10.0), 1e-9));
    assert!(approx_point(&arc.point_at(1.0), &pt(10.0, 0.0), 1e-9));
}

#[test]
fn malformed_curves_are_rejected() {
    assert!(matches!(
        Curve::new(|t| t, |t| t, 1.0, 1.0),
        Err(CatalogError::InvalidCurveRange { .. })
    ));
    assert!(matches!(
        Curve::new(|t| t, |t| t, 2.0, 1.0),
        Err(CatalogError::InvalidCurveRange { .. })
    ));
    assert!(matches!(
        Curve::with_segments(|t| t, |t| t, 0.0, 1.0, 0),
        Err(CatalogError::TooFewSegments)
    ));

    let constant = Curve::new(|_| 1.0, |_| 1.0, 0.0, 1.0).unwrap();
    assert_eq!(
        Subsection::curve(constant, false).unwrap_err(),
        CatalogError::DegenerateCurve { index: 0 }
    );

    let singular = Curve::new(|t| 1.0 / t, |t| t, 0.0, 1.0).unwrap();
    assert!(matches!(
        Subsection::curve(singular, false),
        Err(CatalogError::NonFiniteSample { .. })
    ));
}

#[test]
fn malformed_letters_are_rejected() {
    assert!(matches!(
        Subsection::line(pt(1.0, 1.0), pt(1.0, 1.0), true),
        Err(CatalogError::DegenerateLine { .. })
    ));
    assert_eq!(Section::new(Vec::new()).unwrap_err(), CatalogError::EmptySection);
    assert_eq!(
        LetterDefinition::new("empty", Vec::new()).unwrap_err(),
        CatalogError::EmptyLetter("empty".into())
    );
}

#[test]
fn subsection_accessors() {
    let line = Subsection::line(pt(0.0, 0.0), pt(0.0, 10.0), true).unwrap();
    assert_eq!(line.kind(), SubsectionKind::Line);
    assert!(line.visible_ends());
    assert_eq!(line.polyline(), &[pt(0.0, 0.0), pt(0.0, 10.0)]);
    assert_eq!(line.arrow_pair(), (pt(0.0, 0.0), pt(0.0, 10.0)));

    let scaled = line.scaled_polyline(2.0);
    assert_eq!(scaled.0[1].y, 20.0);

    let arc = Subsection::curve(
        Curve::circular_arc(pt(0.0, 0.0), 10.0, 0.0, 1.0).unwrap(),
        false,
    )
    .unwrap();
    assert_eq!(arc.kind(), SubsectionKind::Curve);
    assert_eq!(arc.polyline().len(), 51);
    let (p0, p1) = arc.arrow_pair();
    assert_eq!(p0, arc.polyline()[0]);
    assert_eq!(p1, arc.polyline()[5]);
    assert_eq!(arc.direction_pair().1, arc.polyline()[1]);
}

#[test]
fn builtin_letters() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.names(), vec!["a_big", "p_small"]);
    assert_eq!(catalog.len(), 2);

    let a = catalog.definition("a_big").unwrap();
    assert_eq!(a.section_count(), 2);
    assert_eq!(a.subsection_count(0), Some(2));
    assert_eq!(a.subsection_count(1), Some(1));
    assert_eq!(a.subsection_count(2), None);
    assert_eq!(a.sections()[0].start(), pt(60.0, 350.0));
    assert_eq!(a.sections()[0].terminal(), pt(260.0, 350.0));
    assert!(!a.sections()[1].first().visible_ends());

    let p = catalog.definition("p_small").unwrap();
    assert_eq!(p.section_count(), 2);
    let bowl = p.subsection(1, 1).unwrap();
    assert_eq!(bowl.kind(), SubsectionKind::Curve);
    assert_eq!(bowl.polyline().len(), 51);
    assert!(p.subsection(1, 2).is_none());
}

#[test]
fn unknown_and_duplicate_letters() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(
        catalog.definition("z_big").unwrap_err(),
        CatalogError::NotFound("z_big".into())
    );
    assert!(!catalog.contains("z_big"));

    let stem = Section::new(vec![Subsection::line(pt(0.0, 0.0), pt(0.0, 1.0), true).unwrap()]).unwrap();
    let extra = LetterDefinition::new("a_big", vec![stem]).unwrap();
    assert_eq!(
        catalog.with_letter(extra).unwrap_err(),
        CatalogError::DuplicateLetter("a_big".into())
    );
}

#[test]
fn global_catalog_is_frozen() {
    let letter = catalog::definition("p_small").unwrap();
    assert_eq!(letter.name(), "p_small");
    assert!(matches!(catalog::definition("nope"), Err(CatalogError::NotFound(_))));
    assert_eq!(catalog::init(Catalog::new()), Err(CatalogError::AlreadyInitialized));
    assert_eq!(catalog::global().unwrap().len(), 2);
}
