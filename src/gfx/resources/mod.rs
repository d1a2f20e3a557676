// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles the depth buffer and sampled textures.

pub mod texture_manager;
pub mod texture_resource;

// Re-export main types
pub use texture_manager::{checkerboard, TextureError, TextureId, TextureManager};
pub use texture_resource::TextureResource;
