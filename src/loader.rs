use crate::core::constants::{FONT_PATH, GLOBE_TEXTURE_PATH};
use crate::core::{AssetError, Assets, Font, TextureImage};
use futures_util::future::join;
use gloo_net::http::{Request, Response};

fn fetch_error(path: &str, reason: impl ToString) -> AssetError {
    AssetError::Fetch {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

async fn fetch(path: &str) -> Result<Response, AssetError> {
    let resp = Request::get(path)
        .send()
        .await
        .map_err(|e| fetch_error(path, e))?;
    if !resp.ok() {
        return Err(fetch_error(path, format!("HTTP {}", resp.status())));
    }
    Ok(resp)
}

pub async fn load_font(path: &str) -> Result<Font, AssetError> {
    let text = fetch(path)
        .await?
        .text()
        .await
        .map_err(|e| fetch_error(path, e))?;
    Font::from_json(&text)
}

pub async fn load_texture(path: &str) -> Result<TextureImage, AssetError> {
    let bytes = fetch(path)
        .await?
        .binary()
        .await
        .map_err(|e| fetch_error(path, e))?;
    TextureImage::decode(&bytes)
}

/// Fetch the font and globe texture concurrently. Failures are logged and
/// leave the corresponding slot empty.
pub async fn load_assets() -> Assets {
    let (font, texture) = join(load_font(FONT_PATH), load_texture(GLOBE_TEXTURE_PATH)).await;
    Assets::from_results(font, texture)
}
