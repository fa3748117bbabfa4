//! Rendering module
//!
//! `scene` turns session state into a flat draw list every frame; the Canvas
//! 2D backend executes it in the browser. Drawing never feeds back into the
//! simulation.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCommand, Rgba, build_scene};
