// Host-side tests for typeface parsing and flat text meshes.

mod common;

use common::assets::AssetError;
use common::text::*;
use glam::Vec2;

const FONT: &str = r#"{
    "familyName": "Test Sans",
    "resolution": 1000,
    "underlineThickness": 50,
    "boundingBox": { "xMin": 0, "xMax": 120, "yMin": -200, "yMax": 800 },
    "glyphs": {
        "o": { "ha": 120, "o": "m 0 0 l 100 0 l 100 100 l 0 100 z m 25 25 l 25 75 l 75 75 l 75 25 z" },
        "?": { "ha": 60, "o": "m 0 0 l 50 0 l 50 50 z" },
        " ": { "ha": 40 },
        "~": { "ha": 10, "o": "m 0 0 w 1 1" }
    }
}"#;

fn font() -> Font {
    Font::from_json(FONT).unwrap()
}

fn triangle_area(mesh: &common::geometry::MeshData) -> f32 {
    mesh.indices
        .chunks(3)
        .map(|t| {
            let p = |i: u32| {
                let [x, y, _] = mesh.positions[i as usize];
                Vec2::new(x, y)
            };
            let (a, b, c) = (p(t[0]), p(t[1]), p(t[2]));
            ((b - a).perp_dot(c - a) * 0.5).abs()
        })
        .sum()
}

#[test]
fn parses_family_and_metrics() {
    let f = font();
    assert_eq!(f.family, "Test Sans");
    assert!((f.line_height(1.0) - 1.05).abs() < 1e-6);
    assert!(f.glyph('o').is_some());
    assert!(f.glyph(' ').unwrap().contours.is_empty());
}

#[test]
fn malformed_glyph_is_kept_without_outline() {
    let f = font();
    let tilde = f.glyph('~').unwrap();
    assert!(tilde.contours.is_empty());
    assert_eq!(tilde.advance, 10.0);
}

#[test]
fn hole_is_cut_out_of_the_glyph() {
    let mesh = font().text_mesh("o", 1.0);
    assert!(!mesh.is_empty());
    // (100^2 - 50^2) font units at 1/1000 scale
    assert!((triangle_area(&mesh) - 0.0075).abs() < 1e-6);
    assert!(mesh.positions.iter().all(|p| p[2] == 0.0));
    assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
}

#[test]
fn unknown_characters_fall_back_to_question_mark() {
    let f = font();
    let mesh = f.text_mesh("x", 1.0);
    assert_eq!(mesh.indices.len(), 3);
}

#[test]
fn second_line_sits_one_line_height_lower() {
    let mesh = font().text_mesh("o\no", 1.0);
    let min_y = mesh.positions.iter().map(|p| p[1]).fold(f32::MAX, f32::min);
    assert!((min_y + 1.05).abs() < 1e-5);
}

#[test]
fn quadratic_segments_follow_the_curve() {
    let contours = parse_outline('q', "m 0 0 q 10 0 5 5", 4).unwrap();
    assert_eq!(contours.len(), 1);
    let c = &contours[0];
    assert_eq!(c.len(), 5);
    assert_eq!(c[4], Vec2::new(10.0, 0.0));
    assert!((c[2] - Vec2::new(5.0, 2.5)).length() < 1e-5);
}

#[test]
fn cubic_segments_end_on_the_end_point() {
    let contours = parse_outline('b', "m 0 0 b 30 0 10 10 20 10", 6).unwrap();
    let c = &contours[0];
    assert_eq!(c.len(), 7);
    assert!((c[6] - Vec2::new(30.0, 0.0)).length() < 1e-5);
}

#[test]
fn bad_outlines_are_errors() {
    assert!(matches!(
        parse_outline('a', "m 0 0 x 1 1", 4),
        Err(AssetError::GlyphOutline { glyph: 'a', .. })
    ));
    assert!(matches!(
        parse_outline('a', "q 1 1 2 2", 4),
        Err(AssetError::GlyphOutline { .. })
    ));
    assert!(matches!(
        parse_outline('a', "m 0", 4),
        Err(AssetError::GlyphOutline { .. })
    ));
}

#[test]
fn invalid_json_is_a_font_error() {
    assert!(matches!(
        Font::from_json("{ not json"),
        Err(AssetError::FontJson(_))
    ));
}

#[test]
fn winding_helpers() {
    let square = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    assert!((signed_area(&square) - 1.0).abs() < 1e-6);
    let reversed: Vec<Vec2> = square.iter().rev().copied().collect();
    assert!((signed_area(&reversed) + 1.0).abs() < 1e-6);
    assert!(point_in_polygon(Vec2::new(0.5, 0.5), &square));
    assert!(!point_in_polygon(Vec2::new(1.5, 0.5), &square));
}
