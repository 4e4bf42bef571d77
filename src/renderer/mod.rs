//! Canvas2D rendering module
//!
//! Draws splats, mosquitoes, and the swatter cursor straight from simulation
//! state. Strictly one-way: nothing here feeds back into the simulation.

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
