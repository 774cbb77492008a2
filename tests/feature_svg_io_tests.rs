#![cfg(feature = "svg-io")]

mod support;

use lettertrace::io::svg::{
    HINT_COLOR, TRACE_COLOR, letter_document, save, snapshot_document, template_path_data,
};
use lettertrace::letter::catalog;
use lettertrace::session::event::PointerEvent;
use support::{session, trace_letter};

#[test]
fn template_path_covers_every_subsection() {
    let letter = catalog::definition("a_big").unwrap();
    let data = template_path_data(&letter, 1.0);
    // three lines, one move-to each
    let moves = data
        .iter()
        .filter(|c| matches!(c, svg::node::element::path::Command::Move(..)))
        .count();
    assert_eq!(moves, 3);
}

#[test]
fn snapshot_shows_hints_and_live_trace() {
    let mut s = session("p_small");
    let empty = snapshot_document(&s.snapshot(), 640, 720).to_string();
    assert!(empty.contains("class=\"template\""));
    assert!(empty.contains("class=\"hints\""));
    assert!(empty.contains(HINT_COLOR));
    assert!(!empty.contains(TRACE_COLOR));

    s.handle(&PointerEvent::begin(210.0, 157.5));
    let dot = snapshot_document(&s.snapshot(), 640, 720).to_string();
    assert!(dot.contains(TRACE_COLOR));

    s.handle(&PointerEvent::moved(260.0, 300.0));
    let failed = snapshot_document(&s.snapshot(), 640, 720).to_string();
    assert!(failed.contains("class=\"error\""));
}

#[test]
fn finished_letter_hides_hints() {
    let mut s = session("a_big");
    trace_letter(&mut s);
    let doc = snapshot_document(&s.snapshot(), 640, 720).to_string();
    assert!(!doc.contains("class=\"hints\""));
    assert!(doc.contains(TRACE_COLOR));
}

#[test]
fn save_letter_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p_small.svg");
    let letter = catalog::definition("p_small").unwrap();
    let doc = letter_document(&letter, 1.75).unwrap();
    save(&path, &doc).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<svg"));
    assert!(written.contains("viewBox"));
}
