// src/lib.rs
//! Prism Sandbox
//!
//! An interactive real-time 3D rendering sandbox built on wgpu and winit:
//! a first-person camera, a name-keyed primitive cache, and a handful of
//! simple shaded solids.

pub mod app;
pub mod config;
pub mod gfx;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{AppEvent, EventResponse, FrameInfo, Sandbox, SandboxApp, SandboxContext};
pub use config::WindowOptions;

/// Runs `S` in a window with default options.
pub fn run<S: Sandbox>() -> anyhow::Result<()> {
    SandboxApp::new(WindowOptions::default()).run::<S>()
}
