//! Perspective orbit camera and damped orbit controls.

use glam::{Mat4, Vec3};

use crate::input::{Input, MouseButton};

/// Radians of orbit per pixel of drag.
const ROTATE_SPEED: f32 = 0.005;
/// Fractional zoom per scroll line.
const ZOOM_SPEED: f32 = 0.1;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 500.0;
const PITCH_LIMIT: f32 = 1.55;

/// Orbit camera with a perspective projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    aspect: f32,
    projection: Mat4,
}

impl Camera {
    /// Camera at `(15, 15, 15)` looking at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            target: Vec3::ZERO,
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
            aspect: 1.0,
            projection: Mat4::IDENTITY,
        };
        camera.look_from(Vec3::splat(15.0));
        camera.resize(width, height);
        camera
    }

    /// Place the camera at `eye`, keeping the current target.
    pub fn look_from(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.distance = offset.length().max(MIN_DISTANCE);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
    }

    /// Update the aspect ratio and projection for a new viewport size.
    /// Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.projection = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Pointer-driven orbit and zoom with exponential damping.
///
/// Drags and scrolls accumulate into pending motion; every [`update`] applies
/// a `damping` fraction of it and keeps the rest, so the camera eases to a
/// stop after the pointer goes still.
///
/// [`update`]: OrbitControls::update
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub damping: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl OrbitControls {
    pub fn new(damping: f32) -> Self {
        Self {
            damping: damping.clamp(0.0, 1.0),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    /// Take this frame's drag and scroll from `input`.
    pub fn handle_input(&mut self, input: &Input) {
        if input.mouse_held(MouseButton::Left) {
            let delta = input.mouse_delta();
            self.pending_yaw -= delta.x * ROTATE_SPEED;
            self.pending_pitch += delta.y * ROTATE_SPEED;
        }
        self.pending_zoom += input.scroll_delta() * ZOOM_SPEED;
    }

    /// Advance the damping by one frame and move `camera`.
    pub fn update(&mut self, camera: &mut Camera) {
        let yaw = self.pending_yaw * self.damping;
        let pitch = self.pending_pitch * self.damping;
        let zoom = self.pending_zoom * self.damping;

        camera.yaw += yaw;
        camera.pitch = (camera.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        camera.distance = (camera.distance * (1.0 - zoom)).clamp(MIN_DISTANCE, MAX_DISTANCE);

        self.pending_yaw -= yaw;
        self.pending_pitch -= pitch;
        self.pending_zoom -= zoom;
    }

    /// Whether any motion is still being eased out.
    pub fn is_moving(&self) -> bool {
        const EPSILON: f32 = 1e-5;
        self.pending_yaw.abs() > EPSILON
            || self.pending_pitch.abs() > EPSILON
            || self.pending_zoom.abs() > EPSILON
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_starts_at_fifteen_fifteen_fifteen() {
        let camera = Camera::new(800, 600);
        assert!((camera.position() - Vec3::splat(15.0)).length() < 1e-3);
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(1280, 720);
        let clip = camera.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_resize_updates_projection() {
        let mut camera = Camera::new(800, 600);
        let before = camera.projection();

        camera.resize(600, 800);
        assert!((camera.aspect() - 0.75).abs() < 1e-6);
        assert_ne!(camera.projection(), before);

        let after = camera.projection();
        camera.resize(0, 400);
        assert_eq!(camera.projection(), after);
    }

    #[test]
    fn test_controls_ease_toward_target() {
        let mut camera = Camera::new(800, 600);
        let start_yaw = camera.yaw;
        let mut controls = OrbitControls::default();
        let mut input = Input::new();
        input.press_mouse(MouseButton::Left);
        input.move_mouse(Vec2::new(-100.0, 0.0));

        controls.handle_input(&input);
        controls.update(&mut camera);
        let first = camera.yaw - start_yaw;
        assert!((first - 0.5 * 0.05).abs() < 1e-5);

        for _ in 0..400 {
            controls.update(&mut camera);
        }
        assert!(!controls.is_moving());
        assert!((camera.yaw - start_yaw - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(800, 600);
        let mut controls = OrbitControls::new(1.0);
        let mut input = Input::new();
        input.scroll(100.0);

        controls.handle_input(&input);
        controls.update(&mut camera);
        assert_eq!(camera.distance, MIN_DISTANCE);
    }
}
