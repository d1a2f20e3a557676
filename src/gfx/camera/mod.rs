pub mod camera_controller;
pub mod camera_utils;
pub mod fps_camera;

// Re-export main types
pub use camera_controller::{CameraController, ControllerConfig};
pub use camera_utils::CameraManager;
pub use fps_camera::Camera;
