//! Rendering module
//!
//! `scene` builds a back-to-front draw list from a snapshot; `canvas` paints it
//! with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use scene::{Shape, build_scene};
