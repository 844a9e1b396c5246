//! Rendering module
//!
//! `scene` turns a game state into a flat list of draw commands; `canvas`
//! replays that list on a browser 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{Color, DrawCmd, Sprite, build_scene};
