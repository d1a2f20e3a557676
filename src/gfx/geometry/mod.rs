//! # Procedural Geometry Generation
//!
//! Stateless shape factories. The `*_geometry` functions only compute vertex
//! and index tables; the `build_*` functions also hand them to a primitive
//! cache for drawing.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use prism_sandbox::gfx::geometry::cube_geometry;
//!
//! let cube = cube_geometry(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
//! assert_eq!(cube.vertex_count(), 8);
//! assert_eq!(cube.indices.len(), 36);
//! ```

pub mod polytopes;

pub use polytopes::*;

use cgmath::Vector3;

/// Generated vertex positions with triangle indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeGeometry {
    pub positions: Vec<Vector3<f32>>,
    /// Triangle list indices into `positions`
    pub indices: Vec<u32>,
}

impl ShapeGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
