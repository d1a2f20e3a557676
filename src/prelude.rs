//! # Prism Sandbox Prelude
//!
//! Commonly used types for writing a [`Sandbox`].
//!
//! ```rust
//! use prism_sandbox::prelude::*;
//! ```

pub use crate::app::{AppEvent, EventResponse, FrameInfo, Sandbox, SandboxApp, SandboxContext};
pub use crate::config::WindowOptions;
pub use crate::gfx::{
    camera::{Camera, CameraController, CameraManager, ControllerConfig},
    geometry::{
        build_cube, build_cube_with_model, build_rect, build_rect_with_model, build_tetrahedron,
        build_tetrahedron_with_model, ShapeGeometry,
    },
    primitives::{DrawTarget, PrimitiveCache, PrimitiveData, PrimitiveError, Topology},
    rendering::RenderEngine,
    resources::{TextureId, TextureManager},
    shader::{ShaderBinding, ShaderProgram},
};

pub use cgmath::{Deg, InnerSpace, Matrix4, Rad, SquareMatrix, Vector3};
pub use winit::keyboard::KeyCode;
