use earcutr::earcut;
use fnv::FnvHashMap;
use glam::Vec2;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::SplitWhitespace;

use super::assets::AssetError;
use super::constants::TEXT_CURVE_SEGMENTS;
use super::geometry::MeshData;

// Flat 3D text from typeface JSON fonts (glyph outlines in font units).

#[derive(Deserialize)]
struct RawFont {
    glyphs: HashMap<String, RawGlyph>,
    resolution: f32,
    #[serde(rename = "boundingBox")]
    bounding_box: RawBounds,
    #[serde(rename = "underlineThickness", default)]
    underline_thickness: f32,
    #[serde(rename = "familyName", default)]
    family_name: String,
}

#[derive(Deserialize)]
struct RawGlyph {
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

#[derive(Deserialize)]
struct RawBounds {
    #[serde(rename = "yMin")]
    y_min: f32,
    #[serde(rename = "yMax")]
    y_max: f32,
}

/// Glyph outline flattened to closed contours, in font units.
#[derive(Clone, Debug, Default)]
pub struct Glyph {
    pub advance: f32,
    pub contours: Vec<Vec<Vec2>>,
}

#[derive(Clone, Debug)]
pub struct Font {
    pub family: String,
    resolution: f32,
    line_height_units: f32,
    glyphs: FnvHashMap<char, Glyph>,
}

impl Font {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let raw: RawFont = serde_json::from_str(json)?;
        let mut glyphs = FnvHashMap::default();
        for (key, g) in raw.glyphs {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                continue;
            };
            let contours = match g.o.as_deref().map(|o| parse_outline(c, o, TEXT_CURVE_SEGMENTS)) {
                Some(Ok(contours)) => contours,
                Some(Err(e)) => {
                    log::warn!("[text] skipping outline: {}", e);
                    Vec::new()
                }
                None => Vec::new(),
            };
            glyphs.insert(
                c,
                Glyph {
                    advance: g.ha,
                    contours,
                },
            );
        }
        Ok(Self {
            family: raw.family_name,
            resolution: raw.resolution.max(1.0),
            line_height_units: raw.bounding_box.y_max - raw.bounding_box.y_min
                + raw.underline_thickness,
            glyphs,
        })
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    pub fn line_height(&self, size: f32) -> f32 {
        self.line_height_units * size / self.resolution
    }

    /// Flat text in the XY plane facing +Z, baseline at y = 0, starting at
    /// x = 0. Characters the font lacks fall back to '?' or are skipped.
    pub fn text_mesh(&self, text: &str, size: f32) -> MeshData {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut mesh = MeshData::default();
        let mut offset = Vec2::ZERO;
        for c in text.chars() {
            if c == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }
            let Some(glyph) = self.glyph(c).or_else(|| self.glyph('?')) else {
                log::warn!("[text] font {:?} has no glyph for {:?}", self.family, c);
                continue;
            };
            append_glyph(&mut mesh, &glyph.contours, scale, offset);
            offset.x += glyph.advance * scale;
        }
        mesh
    }
}

fn read_point(tokens: &mut SplitWhitespace<'_>, glyph: char) -> Result<Vec2, AssetError> {
    let mut coord = || -> Result<f32, AssetError> {
        let tok = tokens.next().ok_or_else(|| AssetError::GlyphOutline {
            glyph,
            reason: "truncated command".into(),
        })?;
        tok.parse::<f32>().map_err(|_| AssetError::GlyphOutline {
            glyph,
            reason: format!("bad number {:?}", tok),
        })
    };
    let x = coord()?;
    let y = coord()?;
    Ok(Vec2::new(x, y))
}

fn close_contour(current: &mut Vec<Vec2>, contours: &mut Vec<Vec<Vec2>>) {
    let mut c = std::mem::take(current);
    if c.len() > 1 && c[0].distance_squared(c[c.len() - 1]) < 1e-12 {
        c.pop();
    }
    if c.len() >= 3 {
        contours.push(c);
    }
}

/// Parse a typeface outline string (`m`, `l`, `q`, `b` commands) into closed
/// contours. Curve commands list the end point first, then the control
/// point(s).
pub fn parse_outline(
    glyph: char,
    outline: &str,
    segments: u32,
) -> Result<Vec<Vec<Vec2>>, AssetError> {
    let segments = segments.max(1);
    let mut tokens = outline.split_whitespace();
    let mut contours = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    while let Some(cmd) = tokens.next() {
        match cmd {
            "m" => {
                let p = read_point(&mut tokens, glyph)?;
                close_contour(&mut current, &mut contours);
                current.push(p);
            }
            "l" => {
                let p = read_point(&mut tokens, glyph)?;
                current.push(p);
            }
            "q" => {
                let end = read_point(&mut tokens, glyph)?;
                let ctrl = read_point(&mut tokens, glyph)?;
                let start = *current.last().ok_or_else(|| AssetError::GlyphOutline {
                    glyph,
                    reason: "curve without a start point".into(),
                })?;
                for k in 1..=segments {
                    let t = k as f32 / segments as f32;
                    let mt = 1.0 - t;
                    current.push(start * (mt * mt) + ctrl * (2.0 * mt * t) + end * (t * t));
                }
            }
            "b" => {
                let end = read_point(&mut tokens, glyph)?;
                let c1 = read_point(&mut tokens, glyph)?;
                let c2 = read_point(&mut tokens, glyph)?;
                let start = *current.last().ok_or_else(|| AssetError::GlyphOutline {
                    glyph,
                    reason: "curve without a start point".into(),
                })?;
                for k in 1..=segments {
                    let t = k as f32 / segments as f32;
                    let mt = 1.0 - t;
                    current.push(
                        start * (mt * mt * mt)
                            + c1 * (3.0 * mt * mt * t)
                            + c2 * (3.0 * mt * t * t)
                            + end * (t * t * t),
                    );
                }
            }
            "z" => close_contour(&mut current, &mut contours),
            other => {
                return Err(AssetError::GlyphOutline {
                    glyph,
                    reason: format!("unknown command {:?}", other),
                })
            }
        }
    }
    close_contour(&mut current, &mut contours);
    Ok(contours)
}

pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut twice = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

pub fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    let mut inside = false;
    let n = poly.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = poly[i];
        let b = poly[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// Contours wound like the glyph's largest contour are solids, the rest are
// holes attached to the solid that contains them.
fn append_glyph(mesh: &mut MeshData, contours: &[Vec<Vec2>], scale: f32, offset: Vec2) {
    let areas: Vec<f32> = contours.iter().map(|c| signed_area(c)).collect();
    let Some(solid_sign) = areas
        .iter()
        .copied()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .map(f32::signum)
    else {
        return;
    };
    let (solids, holes): (Vec<usize>, Vec<usize>) = (0..contours.len())
        .filter(|&i| areas[i] != 0.0)
        .partition(|&i| areas[i].signum() == solid_sign);

    let mut holes_of: Vec<Vec<usize>> = vec![Vec::new(); solids.len()];
    for h in holes {
        let probe = contours[h][0];
        if let Some(s) = solids
            .iter()
            .position(|&s| point_in_polygon(probe, &contours[s]))
        {
            holes_of[s].push(h);
        }
    }

    for (si, &s) in solids.iter().enumerate() {
        let mut points: Vec<Vec2> = contours[s].clone();
        let mut hole_starts = Vec::with_capacity(holes_of[si].len());
        for &h in &holes_of[si] {
            hole_starts.push(points.len());
            points.extend_from_slice(&contours[h]);
        }
        let coords: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y]).collect();
        let triangles = match earcut(&coords, &hole_starts, 2) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[text] triangulation failed: {:?}", e);
                continue;
            }
        };
        let base = mesh.positions.len() as u32;
        for p in &points {
            let w = *p * scale + offset;
            mesh.positions.push([w.x, w.y, 0.0]);
            mesh.normals.push([0.0, 0.0, 1.0]);
        }
        mesh.indices.extend(triangles.into_iter().map(|i| base + i as u32));
    }
}
