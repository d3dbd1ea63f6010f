use glam::Vec3;
use rand::Rng;
use std::time::Duration;

use super::animation::AnimationDriver;
use super::assets::Assets;
use super::camera::{Camera, OrbitControls};
use super::color::rgb_from_hex;
use super::constants::*;
use super::geometry::{self, MeshData};
use super::highlight::{apply_highlight, HighlightState};
use super::navigation::{dispatch_navigation, Navigator};
use super::panels::{panel_position, Panel, PanelError, PanelRegistry};
use super::pick::{hit_test, HitResult};
use super::pointer::{NormalizedPointer, PointerSample, Viewport};
use super::scene::{Material, MeshHandle, NodeKind, Scene, Transform};
use super::text::Font;

/// Everything the event handlers and the frame loop share: scene graph,
/// camera and controls, the panel registry and the animation driver.
pub struct SceneContext {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub panels: PanelRegistry,
    pub driver: AnimationDriver,
    pub globe: MeshHandle,
    pub ring: MeshHandle,
    pub stars: MeshHandle,
}

impl SceneContext {
    /// Build the full scene once assets are in. Missing assets only drop the
    /// elements that need them.
    pub fn build<R: Rng + ?Sized>(
        assets: &Assets,
        viewport: Viewport,
        rng: &mut R,
    ) -> Result<Self, PanelError> {
        let mut scene = Scene::new();

        let globe_geo = scene.add_geometry(geometry::sphere(
            GLOBE_RADIUS,
            GLOBE_SEGMENTS,
            GLOBE_SEGMENTS,
        ));
        let globe = scene.add_mesh(
            NodeKind::Globe,
            globe_geo,
            Transform::at(GLOBE_CENTER),
            Material::Phong {
                color: [1.0, 1.0, 1.0],
                textured: true,
                emissive: rgb_from_hex(GLOBE_EMISSIVE),
                emissive_intensity: GLOBE_EMISSIVE_INTENSITY,
                shininess: GLOBE_SHININESS,
            },
        );

        let mut ring_mesh = geometry::torus(
            RING_RADIUS,
            RING_TUBE,
            RING_RADIAL_SEGMENTS,
            RING_TUBULAR_SEGMENTS,
        );
        geometry::color_ring(&mut ring_mesh);
        let ring_geo = scene.add_geometry(ring_mesh);
        let ring = scene.add_mesh(
            NodeKind::Ring,
            ring_geo,
            Transform {
                translation: RING_CENTER,
                rotation: Vec3::new(RING_BASE_ROTATION_X, RING_BASE_ROTATION_Y, 0.0),
                ..Default::default()
            },
            Material::Basic {
                color: [1.0, 1.0, 1.0],
                vertex_colors: true,
            },
        );

        let stars_geo =
            scene.add_geometry(geometry::starfield(rng, STAR_COUNT, STAR_EXTENT).into_mesh());
        let stars = scene.add_mesh(
            NodeKind::Stars,
            stars_geo,
            Transform::default(),
            Material::Points,
        );

        let panels = build_panels(&mut scene, assets.font.as_ref())?;
        if let Some(font) = assets.font.as_ref() {
            add_decorative_labels(&mut scene, font);
        }

        let mut camera = Camera::perspective(
            CAMERA_FOV_DEG,
            1.0,
            CAMERA_NEAR,
            CAMERA_FAR,
            Vec3::new(0.0, 0.0, CAMERA_Z),
        );
        camera.set_aspect(viewport.aspect());
        let mut controls = OrbitControls::new(ORBIT_DAMPING_FACTOR);
        controls.rotate_speed = ORBIT_ROTATE_SPEED;
        controls.zoom_speed = ORBIT_ZOOM_SPEED;
        controls.min_distance = ORBIT_MIN_DISTANCE;
        controls.max_distance = ORBIT_MAX_DISTANCE;

        log::info!(
            "[scene] {} meshes, {} panels, font={} texture={}",
            scene.len(),
            panels.len(),
            assets.font.is_some(),
            assets.texture.is_some()
        );

        Ok(Self {
            scene,
            camera,
            controls,
            panels,
            driver: AnimationDriver::new(globe, ring, stars),
            globe,
            ring,
            stars,
        })
    }

    /// Pointer Mapper + Hit Tester over the panel meshes only.
    pub fn panel_hits(&self, sample: PointerSample, viewport: Viewport) -> HitResult {
        let ndc = NormalizedPointer::from_sample(sample, viewport);
        hit_test(ndc, &self.camera, &self.scene, &self.panels.meshes())
    }

    pub fn on_pointer_move(
        &mut self,
        sample: PointerSample,
        viewport: Viewport,
    ) -> Vec<HighlightState> {
        let hits = self.panel_hits(sample, viewport);
        apply_highlight(&hits, &self.panels, &mut self.scene)
    }

    /// Returns the target navigated to, if any.
    pub fn on_click<N: Navigator + ?Sized>(
        &mut self,
        sample: PointerSample,
        viewport: Viewport,
        navigator: &mut N,
    ) -> Option<String> {
        let hits = self.panel_hits(sample, viewport);
        dispatch_navigation(&hits, &self.panels, navigator).map(|p| p.target.clone())
    }

    /// One animation frame: rotation step plus damped camera update.
    pub fn frame(&mut self) {
        self.driver.step(&mut self.scene);
        self.controls.update(&mut self.camera);
    }

    /// Delay for the phase timer when `since_mount` has already passed
    /// since mounting began (asset and GPU loading count against it).
    pub fn phase_two_due_in(&self, since_mount: Duration) -> Option<Duration> {
        self.driver.remaining(since_mount)
    }

    pub fn enter_phase_two(&mut self) -> bool {
        self.driver.enter_phase_two(&mut self.scene)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.aspect());
    }
}

fn build_panels(scene: &mut Scene, font: Option<&Font>) -> Result<PanelRegistry, PanelError> {
    let card_geo = scene.add_geometry(geometry::rounded_box(
        CARD_WIDTH,
        CARD_HEIGHT,
        CARD_DEPTH,
        CARD_CORNER_SEGMENTS,
        CARD_CORNER_RADIUS,
    ));
    let border_geo = scene.add_geometry(geometry::rounded_box_edges(
        CARD_WIDTH,
        CARD_HEIGHT,
        CARD_DEPTH,
        CARD_CORNER_SEGMENTS,
        CARD_CORNER_RADIUS,
    ));

    let mut registry = PanelRegistry::new(MAX_PANELS);
    for (index, spec) in PANELS.iter().enumerate() {
        let pos = panel_position(index);
        let mesh = scene.add_mesh(
            NodeKind::Panel,
            card_geo,
            Transform::at(pos),
            Material::basic(rgb_from_hex(CARD_IDLE_COLOR)),
        );
        let border = scene.add_mesh(
            NodeKind::PanelBorder,
            border_geo,
            Transform::at(pos),
            Material::Line {
                color: rgb_from_hex(CARD_BORDER_COLOR),
            },
        );
        registry.register(Panel {
            mesh,
            border: Some(border),
            target: spec.url.to_string(),
            label: spec.label.to_string(),
        })?;
        log::debug!("[panel] {} -> {} at {:?}", spec.label, spec.url, pos);

        if let Some(font) = font {
            let text = font.text_mesh(spec.label, CARD_LABEL_SIZE);
            add_label(
                scene,
                text,
                Vec3::new(CARD_LABEL_X, pos.y, CARD_LABEL_Z),
                Material::basic(rgb_from_hex(CARD_LABEL_COLOR)),
            );
        }
    }
    Ok(registry)
}

fn add_decorative_labels(scene: &mut Scene, font: &Font) {
    for spec in DECORATIVE_LABELS.iter() {
        let text = font.text_mesh(spec.text, spec.size);
        add_label(
            scene,
            text,
            spec.position,
            Material::Standard {
                color: rgb_from_hex(spec.color),
                emissive: rgb_from_hex(spec.emissive),
                emissive_intensity: spec.emissive_intensity,
            },
        );
    }
}

fn add_label(
    scene: &mut Scene,
    text: MeshData,
    position: Vec3,
    material: Material,
) -> Option<MeshHandle> {
    if text.is_empty() {
        return None;
    }
    let geo = scene.add_geometry(text);
    Some(scene.add_mesh(NodeKind::Label, geo, Transform::at(position), material))
}
