//! Rendering module
//!
//! Drop geometry is computed in `shapes` and painted with Canvas 2D.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
