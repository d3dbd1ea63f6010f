use glam::Vec2;

// Pointer Mapper: viewport pixels to normalized device coordinates.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Raw pointer position in viewport pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x_px: f32,
    pub y_px: f32,
}

impl PointerSample {
    pub fn new(x_px: f32, y_px: f32) -> Self {
        Self { x_px, y_px }
    }
}

/// Pointer in [-1, 1] x [-1, 1] with +Y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPointer {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPointer {
    /// A zero-sized viewport is the host's responsibility; the result is then
    /// non-finite.
    #[inline]
    pub fn from_sample(sample: PointerSample, viewport: Viewport) -> Self {
        Self {
            x: (sample.x_px / viewport.width) * 2.0 - 1.0,
            y: -(sample.y_px / viewport.height) * 2.0 + 1.0,
        }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
