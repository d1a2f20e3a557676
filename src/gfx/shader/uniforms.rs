use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::gfx::camera::camera_utils::convert_matrix4_to_array;

/// The uniform block every bundled shader declares, in WGSL layout order.
///
/// `params` packs the scalar uniforms: `x` alpha, `y` ambient strength,
/// `z` specular strength, `w` texture toggle (0 or 1).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShaderUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub view_pos: [f32; 4],
    pub params: [f32; 4],
}

impl Default for ShaderUniforms {
    fn default() -> Self {
        let identity = convert_matrix4_to_array(Matrix4::identity());
        Self {
            model: identity,
            view: identity,
            projection: identity,
            light_pos: [0.0, 5.0, 0.0, 1.0],
            light_color: [1.0, 1.0, 1.0, 1.0],
            view_pos: [0.0, 0.0, 0.0, 1.0],
            params: [1.0, 0.1, 0.5, 1.0],
        }
    }
}

impl ShaderUniforms {
    /// Returns false if `name` is not a matrix uniform.
    pub fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) -> bool {
        let slot = match name {
            "model" => &mut self.model,
            "view" => &mut self.view,
            "projection" => &mut self.projection,
            _ => return false,
        };
        *slot = convert_matrix4_to_array(value);
        true
    }

    pub fn set_vec3(&mut self, name: &str, value: Vector3<f32>) -> bool {
        let slot = match name {
            "light_pos" => &mut self.light_pos,
            "light_color" => &mut self.light_color,
            "view_pos" => &mut self.view_pos,
            _ => return false,
        };
        *slot = [value.x, value.y, value.z, 1.0];
        true
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> bool {
        let index = match name {
            "alpha" => 0,
            "ambient_strength" => 1,
            "specular_strength" => 2,
            _ => return false,
        };
        self.params[index] = value;
        true
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> bool {
        match name {
            "use_texture" => {
                self.params[3] = if value != 0 { 1.0 } else { 0.0 };
                true
            }
            _ => false,
        }
    }
}
