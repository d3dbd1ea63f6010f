use fnv::FnvHashMap;
use glam::Vec3;

use super::constants::{CARDS_PER_ROW, CARD_SPACING_X, CARD_SPACING_Y, CARD_Y_OFFSET, CARD_Z};
use super::scene::MeshHandle;

// Panel Registry: the fixed, ordered set of clickable panels. Populated once
// during scene construction, read-only afterwards.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("panel registry is full ({capacity} panels)")]
    RegistryFull { capacity: usize },
    #[error("mesh {0:?} is already registered as a panel")]
    DuplicateMesh(MeshHandle),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub mesh: MeshHandle,
    pub border: Option<MeshHandle>,
    pub target: String,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct PanelRegistry {
    capacity: usize,
    panels: Vec<Panel>,
    by_mesh: FnvHashMap<MeshHandle, usize>,
}

impl PanelRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            panels: Vec::with_capacity(capacity),
            by_mesh: FnvHashMap::default(),
        }
    }

    /// Append a panel, returning its index.
    pub fn register(&mut self, panel: Panel) -> Result<usize, PanelError> {
        if self.panels.len() >= self.capacity {
            return Err(PanelError::RegistryFull {
                capacity: self.capacity,
            });
        }
        if self.by_mesh.contains_key(&panel.mesh) {
            return Err(PanelError::DuplicateMesh(panel.mesh));
        }
        let index = self.panels.len();
        self.by_mesh.insert(panel.mesh, index);
        self.panels.push(panel);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Mesh handles in registration order; the hit tester's input set.
    pub fn meshes(&self) -> Vec<MeshHandle> {
        self.panels.iter().map(|p| p.mesh).collect()
    }

    pub fn find_by_mesh(&self, mesh: MeshHandle) -> Option<&Panel> {
        self.by_mesh.get(&mesh).and_then(|&i| self.panels.get(i))
    }
}

/// Grid placement of the `index`-th panel (one column, stacked downwards).
pub fn panel_position(index: usize) -> Vec3 {
    let row = index / CARDS_PER_ROW;
    let col = index % CARDS_PER_ROW;
    let x = col as f32 * CARD_SPACING_X - CARD_SPACING_X / 150.0;
    let y = -(row as f32) * CARD_SPACING_Y + CARD_Y_OFFSET;
    Vec3::new(x, y, CARD_Z)
}
