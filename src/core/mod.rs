pub mod animation;
pub mod assets;
pub mod camera;
pub mod color;
pub mod constants;
pub mod context;
pub mod geometry;
pub mod highlight;
pub mod navigation;
pub mod panels;
pub mod pick;
pub mod pointer;
pub mod scene;
pub mod text;

pub use assets::{AssetError, Assets, TextureImage};
pub use context::SceneContext;
pub use pointer::{PointerSample, Viewport};
pub use text::Font;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
