use cgmath::Matrix4;

use crate::app::AppEvent;

use super::{camera_controller::CameraController, fps_camera::Camera};

/// Converts OpenGL clip space (depth `-1..1`) to wgpu clip space (depth `0..1`).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pairs the camera with the controller that steers it.
pub struct CameraManager {
    pub camera: Camera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: Camera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Feeds one host event to the controller.
    ///
    /// Returns true when the camera moved or turned.
    pub fn process_event(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Resize { width, height } if *width > 0 && *height > 0 => {
                self.camera.resize(*width, *height);
                true
            }
            _ => self.controller.process_event(event, &mut self.camera),
        }
    }
}

/// Column-major copy of `matrix4` for uniform upload.
pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Vector4};

    #[test]
    fn test_depth_correction_maps_gl_range_to_unit_range() {
        let near = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-6);
        assert!((far.z / far.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let a = convert_matrix4_to_array(m);
        assert_eq!(a[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_resize_event_updates_aspect() {
        let camera = Camera::new(Vector3::new(0.0, 0.0, 0.0), 500.0, 800, 800);
        let mut manager = CameraManager::new(camera, CameraController::default());
        assert!(manager.process_event(&AppEvent::Resize {
            width: 1600,
            height: 800
        }));
        assert!((manager.camera.aspect() - 2.0).abs() < 1e-6);

        // minimised windows report zero sizes and must not poison the camera
        assert!(!manager.process_event(&AppEvent::Resize { width: 0, height: 0 }));
        assert!((manager.camera.aspect() - 2.0).abs() < 1e-6);
    }
}
