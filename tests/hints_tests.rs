mod support;

use lettertrace::geometry::scale_point;
use lettertrace::hints::{HintChanges, HintExtractor, HintGeometry};
use lettertrace::letter::{LetterDefinition, Primitive, Section, Subsection, catalog};
use support::{approx_eq, approx_point, pt};

#[test]
fn p_small_bowl_hints() {
    let letter = catalog::definition("p_small").unwrap();
    let section = &letter.sections()[1];
    let hints = HintGeometry::derive(section, 1.75);

    assert!(approx_point(&hints.start.p0, &pt(210.0, 612.5), 1e-9));
    assert!(approx_point(&hints.start.p1, &pt(210.0, 201.25), 1e-9));
    // straight up
    assert!(approx_eq(hints.start.rotation_angle().unwrap(), -90.0, 1e-9));

    let Primitive::Curve(bowl) = section.subsections()[1].primitive() else {
        panic!("bowl should be a curve");
    };
    assert_eq!(hints.arrows.len(), 1);
    let arrow = hints.arrows[0];
    assert!(approx_point(&arrow.p0, &scale_point(&bowl.point_at(0.175), 1.75), 1e-9));
    // up and to the right
    assert!(arrow.p1.x > arrow.p0.x);
    assert!(arrow.p1.y < arrow.p0.y);
    assert!(arrow.rotation_angle().unwrap() < 0.0);

    assert!(approx_point(&hints.end, &scale_point(&bowl.point_at(1.825), 1.75), 1e-9));
}

#[test]
fn single_subsection_has_no_arrows() {
    let letter = catalog::definition("a_big").unwrap();
    let crossbar = HintGeometry::derive(&letter.sections()[1], 1.0);
    assert!(crossbar.arrows.is_empty());
    assert_eq!(crossbar.start.p0, pt(97.0, 240.0));
    assert_eq!(crossbar.end, pt(227.0, 240.0));

    let legs = HintGeometry::derive(&letter.sections()[0], 1.0);
    assert_eq!(legs.arrows.len(), 1);
    assert_eq!(legs.arrows[0].p0, pt(165.0, 95.0));
    assert_eq!(legs.arrows[0].p1, pt(260.0, 350.0));
}

#[test]
fn extractor_reports_changed_parts_only() {
    let letter = catalog::definition("a_big").unwrap();
    let mut extractor = HintExtractor::new();
    assert!(extractor.hints().is_none());

    let first = extractor.update(&letter, 0, 1.75).unwrap();
    assert_eq!(first, HintChanges { start: true, arrows: true, end: true });

    // same key, nothing to do
    let again = extractor.update(&letter, 0, 1.75).unwrap();
    assert!(!again.any());

    let next = extractor.update(&letter, 1, 1.75).unwrap();
    assert!(next.start && next.arrows && next.end);
    assert!(extractor.hints().unwrap().arrows.is_empty());
}

#[test]
fn extractor_keeps_equal_parts() {
    // two strokes meeting at the same end point, neither with arrows
    let letter = LetterDefinition::new(
        "v",
        vec![
            Section::new(vec![Subsection::line(pt(0.0, 0.0), pt(10.0, 20.0), true).unwrap()])
                .unwrap(),
            Section::new(vec![Subsection::line(pt(20.0, 0.0), pt(10.0, 20.0), true).unwrap()])
                .unwrap(),
        ],
    )
    .unwrap();
    let mut extractor = HintExtractor::new();
    extractor.update(&letter, 0, 2.0).unwrap();

    let changes = extractor.update(&letter, 1, 2.0).unwrap();
    assert_eq!(changes, HintChanges { start: true, arrows: false, end: false });
    let hints = extractor.hints().unwrap();
    assert_eq!(hints.start.p0, pt(40.0, 0.0));
    assert_eq!(hints.end, pt(20.0, 40.0));

    // a new scale moves everything that has a position
    let rescaled = extractor.update(&letter, 1, 1.0).unwrap();
    assert_eq!(rescaled, HintChanges { start: true, arrows: false, end: true });
}

#[test]
fn unknown_section_fails_without_touching_cache() {
    let letter = catalog::definition("a_big").unwrap();
    let mut extractor = HintExtractor::new();
    extractor.update(&letter, 0, 1.0).unwrap();
    let before = extractor.hints().cloned();

    assert!(extractor.update(&letter, 7, 1.0).is_err());
    assert_eq!(extractor.hints().cloned(), before);
}
