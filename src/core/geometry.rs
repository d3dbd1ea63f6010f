use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::color::hsl_to_rgb;
use super::constants::{RING_COLOR_A, RING_COLOR_B, STAR_LIGHTNESS, STAR_SATURATION};

// Procedural mesh builders. Everything here is pure data: the renderer uploads
// the buffers, the hit tester only reads `bounds()`.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    #[default]
    Triangles,
    Lines,
    Points,
}

/// Axis-aligned box in a mesh's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut it = points.iter().map(|p| Vec3::from_array(*p));
        let Some(first) = it.next() else {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            };
        };
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self { min, max }
    }
}

/// CPU-side vertex buffers. `normals`, `uvs` and `colors` are either empty or
/// the same length as `positions`.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    pub fn has_vertex_colors(&self) -> bool {
        !self.colors.is_empty() && self.colors.len() == self.positions.len()
    }
}

/// UV sphere. Rows run from the north pole (v = 0) to the south pole.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = MeshData::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(h as usize + 1);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let u_offset = if iy == 0 {
            0.5 / w as f32
        } else if iy == h {
            -0.5 / w as f32
        } else {
            0.0
        };
        let mut row = Vec::with_capacity(w as usize + 1);
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            let theta = v * PI;
            let p = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            row.push(mesh.positions.len() as u32);
            mesh.positions.push(p.to_array());
            mesh.normals.push(p.normalize_or_zero().to_array());
            mesh.uvs.push([u + u_offset, 1.0 - v]);
        }
        grid.push(row);
    }

    for iy in 0..h as usize {
        for ix in 0..w as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Torus in the XY plane. Vertices are enumerated with the radial index `j`
/// outermost and the tubular index `i` innermost.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let v = j as f32 / radial as f32 * TAU;
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.positions.push(p.to_array());
            mesh.normals.push((p - center).normalize_or_zero().to_array());
            mesh.uvs.push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Two-tone ring coloring: a vertex whose local angle `atan2(y, x)` is
/// strictly positive gets color A, everything else (including exactly 0)
/// gets color B.
#[inline]
pub fn ring_color_for(position: [f32; 3]) -> [f32; 3] {
    let angle = position[1].atan2(position[0]);
    if angle > 0.0 {
        RING_COLOR_A
    } else {
        RING_COLOR_B
    }
}

pub fn ring_vertex_colors(positions: &[[f32; 3]]) -> Vec<[f32; 3]> {
    positions.iter().copied().map(ring_color_for).collect()
}

pub fn color_ring(mesh: &mut MeshData) {
    mesh.colors = ring_vertex_colors(&mesh.positions);
}

#[derive(Clone, Debug, Default)]
pub struct Starfield {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl Starfield {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn into_mesh(self) -> MeshData {
        MeshData {
            positions: self.positions,
            colors: self.colors,
            topology: Topology::Points,
            ..Default::default()
        }
    }
}

/// Scatter `count` points uniformly in `[-extent, extent]^3`, each with a
/// random hue at the fixed star saturation and lightness.
pub fn starfield<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f32) -> Starfield {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    let span = 2.0 * extent;
    for _ in 0..count {
        positions.push([
            (rng.gen::<f32>() - 0.5) * span,
            (rng.gen::<f32>() - 0.5) * span,
            (rng.gen::<f32>() - 0.5) * span,
        ]);
        let hue: f32 = rng.gen();
        colors.push(hsl_to_rgb(hue, STAR_SATURATION, STAR_LIGHTNESS));
    }
    Starfield { positions, colors }
}

/// Counter-clockwise outline of a rounded rectangle centred at the origin,
/// starting at the top-right corner.
pub fn rounded_rect_outline(width: f32, height: f32, radius: f32, segments: u32) -> Vec<Vec2> {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let r = radius.clamp(0.0, hw.min(hh));
    let segs = segments.max(1);
    let centers = [
        Vec2::new(hw - r, hh - r),
        Vec2::new(-hw + r, hh - r),
        Vec2::new(-hw + r, -hh + r),
        Vec2::new(hw - r, -hh + r),
    ];
    let mut out = Vec::with_capacity(4 * (segs as usize + 1));
    for (k, c) in centers.iter().enumerate() {
        let start = k as f32 * FRAC_PI_2;
        for s in 0..=segs {
            let a = start + s as f32 / segs as f32 * FRAC_PI_2;
            let p = *c + Vec2::new(a.cos(), a.sin()) * r;
            if out.last().map_or(true, |q: &Vec2| q.distance_squared(p) > 1e-12) {
                out.push(p);
            }
        }
    }
    if out.len() > 1 && out[0].distance_squared(out[out.len() - 1]) <= 1e-12 {
        out.pop();
    }
    out
}

/// Rounded-rectangle slab (the panel card): flat front/back caps at
/// `z = ±depth/2` and side walls with outward normals.
pub fn rounded_box(width: f32, height: f32, depth: f32, segments: u32, radius: f32) -> MeshData {
    let outline = rounded_rect_outline(width, height, radius, segments);
    let hz = depth * 0.5;
    let mut mesh = MeshData::default();
    let uv = |p: Vec2| [p.x / width + 0.5, p.y / height + 0.5];

    // Caps as triangle fans around the centre; the outline is convex.
    for (z, nz) in [(hz, 1.0_f32), (-hz, -1.0)] {
        let center = mesh.positions.len() as u32;
        mesh.positions.push([0.0, 0.0, z]);
        mesh.normals.push([0.0, 0.0, nz]);
        mesh.uvs.push([0.5, 0.5]);
        for p in &outline {
            mesh.positions.push([p.x, p.y, z]);
            mesh.normals.push([0.0, 0.0, nz]);
            mesh.uvs.push(uv(*p));
        }
        let n = outline.len() as u32;
        for k in 0..n {
            let a = center + 1 + k;
            let b = center + 1 + (k + 1) % n;
            if nz > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    let n = outline.len();
    for k in 0..n {
        let p0 = outline[k];
        let p1 = outline[(k + 1) % n];
        let edge = p1 - p0;
        let normal = Vec2::new(edge.y, -edge.x).normalize_or_zero();
        let base = mesh.positions.len() as u32;
        for (p, z) in [(p0, hz), (p1, hz), (p1, -hz), (p0, -hz)] {
            mesh.positions.push([p.x, p.y, z]);
            mesh.normals.push([normal.x, normal.y, 0.0]);
            mesh.uvs.push(uv(p));
        }
        mesh.indices.extend_from_slice(&[base, base + 3, base + 2, base, base + 2, base + 1]);
    }
    mesh
}

/// Line-list outline of the front and back faces of `rounded_box`.
pub fn rounded_box_edges(
    width: f32,
    height: f32,
    depth: f32,
    segments: u32,
    radius: f32,
) -> MeshData {
    let outline = rounded_rect_outline(width, height, radius, segments);
    let hz = depth * 0.5;
    let mut mesh = MeshData {
        topology: Topology::Lines,
        ..Default::default()
    };
    for z in [hz, -hz] {
        let base = mesh.positions.len() as u32;
        let n = outline.len() as u32;
        for p in &outline {
            mesh.positions.push([p.x, p.y, z]);
        }
        for k in 0..n {
            mesh.indices.extend_from_slice(&[base + k, base + (k + 1) % n]);
        }
    }
    mesh
}
