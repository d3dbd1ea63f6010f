use super::text::Font;

// Asset results as seen by scene construction. Loading itself lives in the web
// shell; decoding is platform-free.

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("fetch {path} failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("font is not valid typeface JSON: {0}")]
    FontJson(#[from] serde_json::Error),
    #[error("glyph {glyph:?} has a malformed outline: {reason}")]
    GlyphOutline { glyph: char, reason: String },
    #[error("texture decode failed: {0}")]
    Texture(#[from] image::ImageError),
}

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    /// 1x1 opaque white, used when the globe texture is unavailable.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![0xff; 4],
        }
    }
}

/// Everything loaded up front. A `None` means that asset failed and the
/// elements depending on it are skipped.
#[derive(Debug, Default)]
pub struct Assets {
    pub font: Option<Font>,
    pub texture: Option<TextureImage>,
}

impl Assets {
    pub fn from_results(
        font: Result<Font, AssetError>,
        texture: Result<TextureImage, AssetError>,
    ) -> Self {
        let font = font
            .map_err(|e| log::warn!("[assets] font unavailable, text will be skipped: {}", e))
            .ok();
        let texture = texture
            .map_err(|e| log::warn!("[assets] globe texture unavailable: {}", e))
            .ok();
        Self { font, texture }
    }
}
