//! Shader programs and the uniform-setting interface the primitive cache draws through.

pub(crate) mod activation;
pub mod shader_program;
pub mod uniforms;

pub use shader_program::ShaderProgram;
pub use uniforms::ShaderUniforms;

use cgmath::{Matrix4, Vector3};

use crate::gfx::camera::Camera;

/// Named uniform upload for the currently bound program.
///
/// Names a program does not declare are ignored with a warning.
pub trait ShaderBinding {
    /// Marks this program as the one subsequent draws go through.
    fn activate(&mut self);

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);

    fn set_float(&mut self, name: &str, value: f32);

    fn set_int(&mut self, name: &str, value: i32);

    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_int(name, value as i32);
    }

    /// Uploads `view`, `projection` and `view_pos` from `camera`.
    fn set_camera(&mut self, camera: &Camera) {
        self.set_mat4("view", camera.view_matrix());
        self.set_mat4("projection", camera.projection_matrix());
        self.set_vec3("view_pos", camera.position());
    }
}
