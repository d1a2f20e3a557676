//! First-person camera driven by yaw/pitch and a pinhole intrinsic model.
//!
//! The field of view is never stored as primary state: the focal length and
//! sensor dimensions are the single source of truth, and both FOV angles are
//! derived from them with `fov = 2 * atan(dimension / (2 * focal_length))`.
//!
//! # Conventions
//!
//! - Angles passed to and returned from the public API are in **degrees**.
//! - `yaw = 0, pitch = 0` looks down **+X**; positive yaw turns toward **+Z**.
//! - The basis is right-handed: `right = front × world_up`, `up = right × front`.
//!
//! # Singularity
//!
//! At `pitch = ±90°` the view direction is parallel to `world_up` and
//! `front × world_up` has zero length, so `right` and `up` become NaN. This is
//! not clamped here: callers that let users look straight up or down must keep
//! pitch strictly inside `(-90°, 90°)`. NaN or infinite intrinsics likewise
//! flow into the matrices instead of panicking, so a bad value never takes
//! down the frame loop.

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Vector3};

use super::camera_utils::OPENGL_TO_WGPU_MATRIX;

/// Near clipping plane distance.
pub const Z_NEAR: f32 = 0.1;
/// Far clipping plane distance.
pub const Z_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,

    focal_length: f32,
    width: f32,
    height: f32,
    fov_x: f32,
    fov_y: f32,

    front: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
}

impl Camera {
    /// Creates a camera with `world_up = +Y` and zero yaw/pitch.
    ///
    /// `focal_length`, `width` and `height` share a unit (typically pixels).
    pub fn new(position: Vector3<f32>, focal_length: f32, width: u32, height: u32) -> Self {
        Self::with_orientation(
            position,
            focal_length,
            width,
            height,
            Vector3::unit_y(),
            0.0,
            0.0,
        )
    }

    pub fn with_orientation(
        position: Vector3<f32>,
        focal_length: f32,
        width: u32,
        height: u32,
        world_up: Vector3<f32>,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        let mut camera = Self {
            position,
            world_up,
            yaw,
            pitch,
            focal_length,
            width: width as f32,
            height: height as f32,
            fov_x: 0.0,
            fov_y: 0.0,
            front: Vector3::unit_x(),
            right: Vector3::unit_z(),
            up: Vector3::unit_y(),
        };
        camera.update_camera_vectors();
        camera.update_fov();
        camera
    }

    /// Right-handed look-at from `position` toward `position + front`.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }

    /// Perspective projection in wgpu clip space (depth in `0..1`).
    ///
    /// Degenerate angles or aspect ratios yield NaN or infinite entries, never a panic.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * gl_perspective(self.fov_y, self.aspect(), Z_NEAR, Z_FAR)
    }

    /// Reinterprets `degrees` as a vertical FOV, derives the focal length that
    /// would produce it, then recomputes both FOV angles from that focal length.
    pub fn set_zoom(&mut self, degrees: f32) {
        let fov_y = Rad::from(Deg(degrees)).0;
        self.focal_length = fov_to_focal_length(fov_y, self.height);
        self.update_fov();
    }

    /// Current vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        Deg::from(Rad(self.fov_y)).0
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_camera_vectors();
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        self.update_camera_vectors();
    }

    pub fn turn_yaw(&mut self, delta: f32) {
        self.yaw += delta;
        self.update_camera_vectors();
    }

    pub fn turn_pitch(&mut self, delta: f32) {
        self.pitch += delta;
        self.update_camera_vectors();
    }

    /// Translates the camera by a world-space offset, usually a basis vector
    /// scaled by a step size.
    pub fn move_by(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    /// Replaces the sensor dimensions (e.g. on window resize). The focal length
    /// is kept, so the field of view widens or narrows with the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        self.update_fov();
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn left(&self) -> Vector3<f32> {
        -self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Horizontal field of view in degrees.
    pub fn fov_x(&self) -> f32 {
        Deg::from(Rad(self.fov_x)).0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    fn update_fov(&mut self) {
        let (fov_x, fov_y) = focal_length_to_fov(self.focal_length, self.width, self.height);
        self.fov_x = fov_x;
        self.fov_y = fov_y;
    }

    fn update_camera_vectors(&mut self) {
        let yaw = Rad::from(Deg(self.yaw)).0;
        let pitch = Rad::from(Deg(self.pitch)).0;

        let front = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// OpenGL-convention perspective (depth `-1..1`), column-major.
#[rustfmt::skip]
fn gl_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let f = 1.0 / (fov_y / 2.0).tan();
    Matrix4::new(
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (far + near) / (near - far), -1.0,
        0.0, 0.0, 2.0 * far * near / (near - far), 0.0,
    )
}

/// Pinhole relation, returns `(fov_x, fov_y)` in radians.
fn focal_length_to_fov(focal_length: f32, width: f32, height: f32) -> (f32, f32) {
    let fov_x = 2.0 * (width / (2.0 * focal_length)).atan();
    let fov_y = 2.0 * (height / (2.0 * focal_length)).atan();
    (fov_x, fov_y)
}

fn fov_to_focal_length(fov_y: f32, height: f32) -> f32 {
    height / (2.0 * (fov_y / 2.0).tan())
}
