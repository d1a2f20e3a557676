use winit::keyboard::KeyCode;

use crate::app::AppEvent;

use super::fps_camera::Camera;

/// Tuning for [`CameraController`].
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Distance travelled per key press, in world units.
    pub move_step: f32,
    /// Degrees turned per pixel of mouse travel.
    pub mouse_sensitivity: f32,
    /// Cursor jumps larger than this (pixels, either axis) are treated as a
    /// re-entry into the window rather than a drag.
    pub jump_threshold: f64,
    /// Pitch is kept inside `±max_pitch` degrees, away from the basis singularity.
    pub max_pitch: f32,
    pub invert_pitch: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_step: 0.25,
            mouse_sensitivity: 0.05,
            jump_threshold: 100.0,
            max_pitch: 89.0,
            invert_pitch: false,
        }
    }
}

/// Maps keyboard and mouse events onto camera motion.
///
/// `W`/`S` move along the view direction, `A`/`D` strafe, `Space`/`C` rise
/// and sink along the camera's up vector, and mouse motion turns the camera.
#[derive(Debug, Default)]
pub struct CameraController {
    pub config: ControllerConfig,
    last_cursor: Option<(f64, f64)>,
}

impl CameraController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            last_cursor: None,
        }
    }

    /// Applies an event to `camera`. Returns true if the camera changed.
    pub fn process_event(&mut self, event: &AppEvent, camera: &mut Camera) -> bool {
        match *event {
            AppEvent::KeyPress { key, .. } => self.process_key(key, camera),
            AppEvent::MouseMove { x, y } => self.process_mouse(x, y, camera),
            _ => false,
        }
    }

    fn process_key(&mut self, key: KeyCode, camera: &mut Camera) -> bool {
        let step = self.config.move_step;
        let direction = match key {
            KeyCode::KeyW => camera.front(),
            KeyCode::KeyS => -camera.front(),
            KeyCode::KeyA => camera.left(),
            KeyCode::KeyD => camera.right(),
            KeyCode::Space => camera.up(),
            KeyCode::KeyC => -camera.up(),
            _ => return false,
        };
        camera.move_by(direction * step);
        true
    }

    fn process_mouse(&mut self, x: f64, y: f64, camera: &mut Camera) -> bool {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return false;
        };

        let (dx, dy) = (x - last_x, y - last_y);
        if dx.abs() > self.config.jump_threshold || dy.abs() > self.config.jump_threshold {
            return false;
        }

        let sensitivity = self.config.mouse_sensitivity;
        // screen y grows downward, so moving the mouse up pitches up
        let pitch_sign = if self.config.invert_pitch { 1.0 } else { -1.0 };
        let max_pitch = self.config.max_pitch;

        camera.turn_yaw(dx as f32 * sensitivity);
        let pitch = camera.pitch() + pitch_sign * dy as f32 * sensitivity;
        camera.set_pitch(pitch.clamp(-max_pitch, max_pitch));
        true
    }

    /// Forgets the last cursor position so the next move is not treated as a drag.
    pub fn reset_cursor(&mut self) {
        self.last_cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn camera() -> Camera {
        Camera::new(Vector3::new(0.0, 0.0, 0.0), 600.0, 1024, 1024)
    }

    fn key(key: KeyCode) -> AppEvent {
        AppEvent::KeyPress {
            key,
            cursor: (0.0, 0.0),
        }
    }

    #[test]
    fn test_keys_move_along_basis() {
        let mut camera = camera();
        let mut controller = CameraController::default();

        assert!(controller.process_event(&key(KeyCode::KeyW), &mut camera));
        assert!((camera.position() - Vector3::new(0.25, 0.0, 0.0)).magnitude() < 1e-6);

        controller.process_event(&key(KeyCode::KeyS), &mut camera);
        controller.process_event(&key(KeyCode::KeyD), &mut camera);
        assert!((camera.position() - Vector3::new(0.0, 0.0, 0.25)).magnitude() < 1e-6);

        controller.process_event(&key(KeyCode::KeyA), &mut camera);
        controller.process_event(&key(KeyCode::Space), &mut camera);
        assert!((camera.position() - Vector3::new(0.0, 0.25, 0.0)).magnitude() < 1e-6);

        assert!(controller.process_event(&key(KeyCode::KeyC), &mut camera));
        controller.process_event(&key(KeyCode::KeyC), &mut camera);
        assert!((camera.position() - Vector3::new(0.0, -0.25, 0.0)).magnitude() < 1e-6);

        assert!(!controller.process_event(&key(KeyCode::KeyQ), &mut camera));
    }

    #[test]
    fn test_first_mouse_move_only_records_position() {
        let mut camera = camera();
        let mut controller = CameraController::default();

        assert!(!controller.process_event(&AppEvent::MouseMove { x: 10.0, y: 10.0 }, &mut camera));
        assert_eq!(camera.yaw(), 0.0);

        assert!(controller.process_event(&AppEvent::MouseMove { x: 30.0, y: 0.0 }, &mut camera));
        assert!((camera.yaw() - 1.0).abs() < 1e-6);
        assert!((camera.pitch() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_large_jump_is_ignored() {
        let mut camera = camera();
        let mut controller = CameraController::default();

        controller.process_event(&AppEvent::MouseMove { x: 0.0, y: 0.0 }, &mut camera);
        assert!(!controller.process_event(&AppEvent::MouseMove { x: 500.0, y: 0.0 }, &mut camera));
        assert_eq!(camera.yaw(), 0.0);

        // the jump target becomes the new reference point
        assert!(controller.process_event(&AppEvent::MouseMove { x: 520.0, y: 0.0 }, &mut camera));
        assert!((camera.yaw() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped_below_vertical() {
        let mut camera = camera();
        let mut controller = CameraController::new(ControllerConfig {
            mouse_sensitivity: 10.0,
            ..Default::default()
        });

        controller.process_event(&AppEvent::MouseMove { x: 0.0, y: 100.0 }, &mut camera);
        for step in 1..=10 {
            let y = 100.0 - 10.0 * step as f64;
            controller.process_event(&AppEvent::MouseMove { x: 0.0, y }, &mut camera);
        }
        assert_eq!(camera.pitch(), 89.0);
        assert!(!camera.right().x.is_nan());
    }

    #[test]
    fn test_reset_cursor_swallows_next_move() {
        let mut camera = camera();
        let mut controller = CameraController::default();
        controller.process_event(&AppEvent::MouseMove { x: 0.0, y: 0.0 }, &mut camera);
        controller.reset_cursor();
        assert!(!controller.process_event(&AppEvent::MouseMove { x: 5.0, y: 5.0 }, &mut camera));
    }
}
