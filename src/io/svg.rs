//! SVG export of the letter template and of traces.
//!
//! Mirrors what a renderer draws from a [`SessionSnapshot`]: the white
//! template, committed strokes, the live trace, the start/end markers, the
//! direction arrows and the error marker.

use super::IoError;
use crate::float_types::Real;
use crate::geometry::{Point2, from_coord, scale_point};
use crate::hints::{DirectionPair, HintGeometry};
use crate::letter::LetterDefinition;
use crate::session::SessionSnapshot;
use std::path::Path as FsPath;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path};

pub const TEMPLATE_COLOR: &str = "#ffffff";
pub const TRACE_COLOR: &str = "#fbb03b";
pub const HINT_COLOR: &str = "#ccc914";
pub const HINT_ACCENT_COLOR: &str = "#99970f";
pub const ERROR_COLOR: &str = "#e53935";
pub const TEMPLATE_STROKE_WIDTH: Real = 24.0;
pub const TRACE_STROKE_WIDTH: Real = 12.0;

#[allow(clippy::unnecessary_cast)]
fn xy(p: &Point2) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

#[allow(clippy::unnecessary_cast)]
fn num(v: Real) -> f32 {
    v as f32
}

/// `M p0 L p1 ...` for every subsection of the letter, in view space.
pub fn template_path_data(letter: &LetterDefinition, scale: Real) -> Data {
    letter
        .sections()
        .iter()
        .flat_map(|section| section.subsections())
        .fold(Data::new(), |data, sub| polyline_data(data, sub.polyline(), scale))
}

fn polyline_data(data: Data, points: &[Point2], scale: Real) -> Data {
    let mut iter = points.iter().map(|p| scale_point(p, scale));
    let Some(first) = iter.next() else {
        return data;
    };
    iter.fold(data.move_to(xy(&first)), |data, p| data.line_to(xy(&p)))
}

/// `M first L ...` through the given view-space points.
pub fn trace_path_data(points: &[Point2]) -> Data {
    polyline_data(Data::new(), points, 1.0)
}

fn stroke_path(data: Data, color: &str, width: Real, linecap: &str) -> Path {
    Path::new()
        .set("fill", "none")
        .set("stroke", color)
        .set("stroke-width", num(width))
        .set("stroke-linecap", linecap)
        .set("stroke-linejoin", "round")
        .set("d", data)
}

/// The letter template; subsections with visible ends get rounded caps.
pub fn template_group(letter: &LetterDefinition, scale: Real) -> Group {
    let width = TEMPLATE_STROKE_WIDTH * scale;
    letter
        .sections()
        .iter()
        .flat_map(|section| section.subsections())
        .fold(Group::new().set("class", "template"), |group, sub| {
            let cap = if sub.visible_ends() { "round" } else { "butt" };
            let data = polyline_data(Data::new(), sub.polyline(), scale);
            group.add(stroke_path(data, TEMPLATE_COLOR, width, cap))
        })
}

/// Arrow glyph pointing along +x, rotated onto `pair`.
fn arrow(pair: &DirectionPair, length: Real, color: &str) -> Path {
    let angle = pair.rotation_angle().unwrap_or(0.0);
    let (x, y) = xy(&pair.p0);
    let length = num(length);
    let data = Data::new()
        .move_to((x, y))
        .line_by((length, 0.0_f32))
        .line_by((-10.0_f32, -7.5_f32))
        .move_by((10.0_f32, 7.5_f32))
        .line_by((-10.0_f32, 7.5_f32));
    Path::new()
        .set("fill", "none")
        .set("stroke", color)
        .set("stroke-width", 3)
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round")
        .set("transform", format!("rotate({} {x} {y})", num(angle)))
        .set("d", data)
}

fn disc(center: &Point2, radius: Real, color: &str) -> Circle {
    let (cx, cy) = xy(center);
    Circle::new()
        .set("cx", cx)
        .set("cy", cy)
        .set("r", num(radius))
        .set("fill", color)
}

/// Start marker with its direction, arrows at direction changes, end marker.
pub fn hints_group(hints: &HintGeometry, scale: Real) -> Group {
    let radius = (TEMPLATE_STROKE_WIDTH + 10.0) / 2.0 * scale;
    let mut group = Group::new()
        .set("class", "hints")
        .add(disc(&hints.start.p0, radius, HINT_COLOR))
        .add(arrow(&hints.start, radius, HINT_ACCENT_COLOR));
    for pair in &hints.arrows {
        group = group.add(arrow(pair, 30.0, HINT_COLOR));
    }
    let (x, y) = xy(&hints.end);
    let square = Data::new()
        .move_to((x - 8.0, y - 8.0))
        .line_by((16.0_f32, 0.0_f32))
        .line_by((0.0_f32, 16.0_f32))
        .line_by((-16.0_f32, 0.0_f32))
        .close();
    group
        .add(disc(&hints.end, radius, HINT_COLOR))
        .add(Path::new().set("fill", HINT_ACCENT_COLOR).set("d", square))
}

/// Full drawing of the session state.
pub fn snapshot_document(snapshot: &SessionSnapshot<'_>, width: u32, height: u32) -> Document {
    let mut doc = Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height)
        .add(template_group(snapshot.letter, snapshot.scale));

    if !snapshot.finished {
        if let Some(hints) = snapshot.hints {
            doc = doc.add(hints_group(hints, snapshot.scale));
        }
    }

    let mut strokes = Group::new().set("class", "strokes");
    for stroke in snapshot.strokes {
        let points: Vec<Point2> = stroke.path.coords().copied().map(from_coord).collect();
        strokes = add_trace(strokes, &points);
    }
    strokes = add_trace(strokes, snapshot.points);
    doc = doc.add(strokes);

    if let Some(marker) = snapshot.marker {
        doc = doc.add(disc(&marker.position, TRACE_STROKE_WIDTH, ERROR_COLOR).set("class", "error"));
    }
    doc
}

/// A single touch shows as a dot, anything longer as a path.
fn add_trace(group: Group, points: &[Point2]) -> Group {
    match points {
        [] => group,
        [point] => group.add(disc(point, TRACE_STROKE_WIDTH / 2.0, TRACE_COLOR)),
        _ => group.add(stroke_path(
            trace_path_data(points),
            TRACE_COLOR,
            TRACE_STROKE_WIDTH,
            "round",
        )),
    }
}

/// Writes `doc` to `path`.
pub fn save(path: impl AsRef<FsPath>, doc: &Document) -> Result<(), IoError> {
    svg::save(path, doc)?;
    Ok(())
}

/// Renders only the template of a letter, sized to fit its design space.
pub fn letter_document(letter: &LetterDefinition, scale: Real) -> Result<Document, IoError> {
    let (mut max_x, mut max_y) = (0.0 as Real, 0.0 as Real);
    for p in letter.sections().iter().flat_map(|s| s.subsections()).flat_map(|s| s.polyline()) {
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if max_x <= 0.0 || max_y <= 0.0 {
        return Err(IoError::Empty(format!("letter '{}' has no positive extent", letter.name())));
    }
    let margin = TEMPLATE_STROKE_WIDTH * 2.0;
    let width = ((max_x + margin) * scale).ceil() as u32;
    let height = ((max_y + margin) * scale).ceil() as u32;
    Ok(Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .add(template_group(letter, scale)))
}
