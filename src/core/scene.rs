use glam::{EulerRot, Mat4, Quat, Vec3};

use super::geometry::{Aabb, MeshData};

// Minimal scene graph: a flat list of meshes, each pointing at shared
// geometry. Nodes are never removed, so handles stay valid for the lifetime of
// the scene.

/// Non-owning reference to a mesh node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(u32);

impl MeshHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(u32);

impl GeometryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Translation, Euler rotation (X then Y then Z, intrinsic) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.translation,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Lit with ambient + point light, optionally sampling the globe texture.
    Phong {
        color: [f32; 3],
        textured: bool,
        emissive: [f32; 3],
        emissive_intensity: f32,
        shininess: f32,
    },
    /// Unlit flat color, or per-vertex colors when `vertex_colors` is set.
    Basic { color: [f32; 3], vertex_colors: bool },
    Standard {
        color: [f32; 3],
        emissive: [f32; 3],
        emissive_intensity: f32,
    },
    Points,
    Line { color: [f32; 3] },
}

impl Material {
    pub fn basic(color: [f32; 3]) -> Self {
        Material::Basic {
            color,
            vertex_colors: false,
        }
    }

    pub fn set_color(&mut self, rgb: [f32; 3]) {
        match self {
            Material::Phong { color, .. }
            | Material::Basic { color, .. }
            | Material::Standard { color, .. }
            | Material::Line { color } => *color = rgb,
            Material::Points => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Globe,
    Ring,
    Stars,
    Panel,
    PanelBorder,
    Label,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub geometry: GeometryId,
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
}

#[derive(Default)]
pub struct Scene {
    geometries: Vec<MeshData>,
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, mesh: MeshData) -> GeometryId {
        self.geometries.push(mesh);
        GeometryId(self.geometries.len() as u32 - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&MeshData> {
        self.geometries.get(id.index())
    }

    pub fn geometries(&self) -> &[MeshData] {
        &self.geometries
    }

    pub fn add_mesh(
        &mut self,
        kind: NodeKind,
        geometry: GeometryId,
        transform: Transform,
        material: Material,
    ) -> MeshHandle {
        self.nodes.push(Node {
            kind,
            geometry,
            transform,
            material,
            visible: true,
        });
        MeshHandle(self.nodes.len() as u32 - 1)
    }

    pub fn node(&self, handle: MeshHandle) -> Option<&Node> {
        self.nodes.get(handle.index())
    }

    pub fn node_mut(&mut self, handle: MeshHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle.index())
    }

    pub fn world_matrix(&self, handle: MeshHandle) -> Option<Mat4> {
        self.node(handle).map(|n| n.transform.matrix())
    }

    pub fn local_bounds(&self, handle: MeshHandle) -> Option<Aabb> {
        let node = self.node(handle)?;
        self.geometry(node.geometry).map(MeshData::bounds)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (MeshHandle(i as u32), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
