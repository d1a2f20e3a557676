//! # Graphics Module
//!
//! Camera, primitive caching, shaders, textures and the wgpu backend.
//!
//! ## Architecture Overview
//!
//! - **Camera** ([`camera`]) - first-person camera driven by yaw/pitch and a focal length
//! - **Primitives** ([`primitives`]) - builds GPU buffers once per name and redraws them by name
//! - **Geometry** ([`geometry`]) - cube, tetrahedron and rectangle factories
//! - **Shaders** ([`shader`]) - WGSL programs with a fixed named-uniform block
//! - **Rendering** ([`rendering`]) - surface, pipelines and frame submission
//! - **Resources** ([`resources`]) - depth buffer and sampled textures
//!
//! ## Usage
//!
//! A sandbox's `render` passes the engine and the active shader to the cache:
//!
//! ```no_run
//! # use prism_sandbox::prelude::*;
//! # fn frame(engine: &mut RenderEngine, shader: &mut ShaderProgram, cache: &mut PrimitiveCache<RenderEngine>, camera: &Camera) {
//! shader.activate();
//! shader.set_camera(camera);
//! let mut target = DrawTarget::new(engine, shader);
//! let _ = build_cube(cache, &mut target, "box", Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0), &[]);
//! # }
//! ```

pub mod camera;
pub mod geometry;
pub mod primitives;
pub mod rendering;
pub mod resources;
pub mod shader;

// Re-export commonly used types
pub use camera::Camera;
pub use rendering::render_engine::RenderEngine;
