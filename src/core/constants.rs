use glam::Vec3;

// Scene layout and tuning constants shared by scene construction, picking and
// the renderer.

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 11.0;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.25;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 60.0;

// Globe
pub const GLOBE_RADIUS: f32 = 2.2;
pub const GLOBE_SEGMENTS: u32 = 64;
pub const GLOBE_CENTER: Vec3 = Vec3::new(0.0, 0.8, 0.0);
pub const GLOBE_SHININESS: f32 = 900.0;
pub const GLOBE_EMISSIVE: u32 = 0xffffff;
pub const GLOBE_EMISSIVE_INTENSITY: f32 = 0.0;
pub const PHASE_TWO_GLOBE_COLOR: u32 = 0x00d4ff;

// Ring (torus)
pub const RING_RADIUS: f32 = 4.0;
pub const RING_TUBE: f32 = 0.03;
pub const RING_RADIAL_SEGMENTS: u32 = 10;
pub const RING_TUBULAR_SEGMENTS: u32 = 100;
pub const RING_CENTER: Vec3 = Vec3::new(0.0, 0.8, 0.0);
pub const RING_BASE_ROTATION_X: f32 = std::f32::consts::PI / 1.88;
pub const RING_BASE_ROTATION_Y: f32 = std::f32::consts::PI / -1.1;
pub const RING_COLOR_A: [f32; 3] = [1.0, 0.992, 0.720]; // warm pale yellow, angle > 0
pub const RING_COLOR_B: [f32; 3] = [0.5, 0.0, 0.5]; // purple, angle <= 0

// Starfield
pub const STAR_COUNT: usize = 1000;
pub const STAR_EXTENT: f32 = 50.0; // coordinates drawn from [-extent, extent]
pub const STAR_SATURATION: f32 = 1.0;
pub const STAR_LIGHTNESS: f32 = 0.7;

// Per-frame rotation increments (radians per frame)
pub const GLOBE_SPIN_PER_FRAME: f32 = 0.01;
pub const RING_SPIN_PER_FRAME: f32 = 0.02;
pub const STARS_SPIN_PER_FRAME: f32 = 0.001;

// Delay before the globe material swap and second loop
pub const PHASE_TWO_DELAY_MS: u32 = 10_000;

// Lights
pub const AMBIENT_LIGHT_INTENSITY: f32 = 1.0;
pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

// Panel card geometry
pub const CARD_WIDTH: f32 = 4.0;
pub const CARD_HEIGHT: f32 = 0.5;
pub const CARD_DEPTH: f32 = 0.1;
pub const CARD_CORNER_SEGMENTS: u32 = 6;
pub const CARD_CORNER_RADIUS: f32 = 0.2;
pub const CARD_IDLE_COLOR: u32 = 0x1a1a40;
pub const CARD_HIGHLIGHT_COLOR: u32 = 0x4444ff;
pub const CARD_BORDER_COLOR: u32 = 0xdddddd;

// Panel layout
pub const CARDS_PER_ROW: usize = 1;
pub const CARD_SPACING_X: f32 = 2.8;
pub const CARD_SPACING_Y: f32 = 1.0;
pub const CARD_Y_OFFSET: f32 = -1.2;
pub const CARD_Z: f32 = 5.0;
pub const CARD_LABEL_X: f32 = -1.9;
pub const CARD_LABEL_Z: f32 = 5.1;
pub const CARD_LABEL_SIZE: f32 = 0.14;
pub const CARD_LABEL_COLOR: u32 = 0xffffff;
pub const MAX_PANELS: usize = 3;

// Text flattening
pub const TEXT_CURVE_SEGMENTS: u32 = 12;

// Assets
pub const GLOBE_TEXTURE_PATH: &str = "/globe.png";
pub const FONT_PATH: &str = "/font.json";

/// A clickable panel: the label drawn on it and where a click takes the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelSpec {
    pub label: &'static str,
    pub url: &'static str,
}

pub const PANELS: [PanelSpec; MAX_PANELS] = [
    PanelSpec {
        label: "Wadah Kritik dan Saran BEM FASILKOM",
        url: "https://docs.google.com/forms/d/e/1FAIpQLSf5_wIXNMw2p1SbRBMD1SqEhoR0N7xk47BYdDQKuVTNcosdqQ/viewform",
    },
    PanelSpec {
        label: "Contact Person BEM FASLIKOM (Nadya)",
        url: "https://wa.link/i667j7",
    },
    PanelSpec {
        label: "Contact Person BEM FASLIKOM (Favian)",
        url: "https://wa.link/5k4c9q",
    },
];

/// Decorative, non-interactive 3D text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelSpec {
    pub text: &'static str,
    pub size: f32,
    pub position: Vec3,
    pub color: u32,
    pub emissive: u32,
    pub emissive_intensity: f32,
}

pub const DECORATIVE_LABELS: [LabelSpec; 3] = [
    LabelSpec {
        text: "B E M",
        size: 0.3,
        position: Vec3::new(2.0, 1.58, 1.2),
        color: 0xffffff,
        emissive: 0xffffff,
        emissive_intensity: 1.0,
    },
    LabelSpec {
        text: "FASILKOM",
        size: 0.4,
        position: Vec3::new(-1.20, 0.2, 4.2),
        color: 0xffff80,
        emissive: 0xf9e400,
        emissive_intensity: 0.8,
    },
    LabelSpec {
        text: "UNIVERITAS MERCU BUANA",
        size: 0.140,
        position: Vec3::new(-1.13, 0.0, 4.2),
        color: 0xff0000,
        emissive: 0x000000,
        emissive_intensity: 0.0,
    },
];
