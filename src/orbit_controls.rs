use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::config::ControlsConfig;
use crate::events::PointerButton;
use crate::input::Input;
use crate::scene::Viewport;

const POLAR_EPSILON: f32 = 1e-6;

/// Drag-to-orbit camera controls with damping and auto-rotation.
///
/// The camera position is kept in spherical coordinates around `target`:
/// `azimuth` turns around the Y axis (0 looks down -Z from +Z) and `polar`
/// is measured from +Y. Input and auto-rotation accumulate into a pending
/// delta; with damping enabled each update applies only `damping_factor` of
/// it, which is what keeps the sphere drifting after the button is released.
///
/// # Example
/// ```ignore
/// let mut controls = OrbitControls::new(&camera, Vec3::ZERO, &config.controls);
///
/// // In the frame loop:
/// controls.update(&input, dt, viewport, &mut camera);
/// ```
#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Point the camera orbits around.
    pub target: Vec3,
    pub radius: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub enable_rotate: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub auto_rotate: bool,
    /// 2.0 is one revolution every 30 seconds.
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_pan: Vec3,
}

impl OrbitControls {
    /// Attach to a camera, taking its current position as the starting orbit.
    pub fn new(camera: &PerspectiveCamera, target: Vec3, config: &ControlsConfig) -> Self {
        let offset = camera.position - target;
        let radius = offset.length();
        let (azimuth, polar) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target,
            radius,
            azimuth,
            polar,
            enable_rotate: true,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            enable_pan: config.enable_pan,
            enable_zoom: config.enable_zoom,
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_pan: Vec3::ZERO,
        }
    }

    /// True while the user is dragging the orbit.
    pub fn is_dragging(&self, input: &Input) -> bool {
        self.enable_rotate && input.button_down(PointerButton::Primary)
    }

    /// Auto-rotation in radians per second.
    pub fn auto_rotation_rate(&self) -> f32 {
        self.auto_rotate_speed * TAU / 60.0
    }

    /// Advance one frame and write the result into `camera`.
    pub fn update(
        &mut self,
        input: &Input,
        dt: f32,
        viewport: Viewport,
        camera: &mut PerspectiveCamera,
    ) {
        let height = viewport.height.max(1) as f32;
        let dragging = self.is_dragging(input);

        if dragging {
            let delta = input.delta();
            self.pending_azimuth -= TAU * delta.x / height * self.rotate_speed;
            self.pending_polar -= TAU * delta.y / height * self.rotate_speed;
        } else if self.auto_rotate {
            self.pending_azimuth -= self.auto_rotation_rate() * dt;
        }

        if self.enable_pan && input.button_down(PointerButton::Secondary) {
            self.pan(input.delta(), height, camera);
        }

        if self.enable_zoom && input.scroll() != 0.0 {
            let scale = 0.95f32.powf(self.zoom_speed * input.scroll());
            self.radius = (self.radius * scale).clamp(self.min_distance, self.max_distance);
        }

        if self.enable_damping {
            let f = self.damping_factor;
            self.azimuth += self.pending_azimuth * f;
            self.polar += self.pending_polar * f;
            self.target += self.pending_pan * f;
            self.pending_azimuth *= 1.0 - f;
            self.pending_polar *= 1.0 - f;
            self.pending_pan *= 1.0 - f;
        } else {
            self.azimuth += self.pending_azimuth;
            self.polar += self.pending_polar;
            self.target += self.pending_pan;
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
            self.pending_pan = Vec3::ZERO;
        }

        self.polar = self.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        camera.position = self.position();
        camera.target = self.target;
    }

    /// Current camera position implied by the orbit.
    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    fn pan(&mut self, delta: glam::Vec2, height: f32, camera: &PerspectiveCamera) {
        // World units per pixel at the target's depth.
        let scale = 2.0 * self.radius * (camera.fov * 0.5).tan() / height * self.pan_speed;
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        self.pending_pan += (-right * delta.x + up * delta.y) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup(config: ControlsConfig) -> (OrbitControls, PerspectiveCamera) {
        let camera = PerspectiveCamera::new(45.0, 4.0 / 3.0, 0.1, 100.0)
            .at(Vec3::new(0.0, 0.0, 20.0))
            .looking_at(Vec3::ZERO);
        (OrbitControls::new(&camera, Vec3::ZERO, &config), camera)
    }

    fn undamped() -> ControlsConfig {
        ControlsConfig {
            enable_damping: false,
            ..ControlsConfig::default()
        }
    }

    const VIEWPORT: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    #[test]
    fn starts_from_camera_position() {
        let (controls, _) = setup(ControlsConfig::default());
        assert!((controls.radius - 20.0).abs() < 1e-5);
        assert!(controls.azimuth.abs() < 1e-6);
        assert!((controls.polar - PI / 2.0).abs() < 1e-6);
        assert!((controls.position() - Vec3::new(0.0, 0.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn auto_rotates_at_configured_rate() {
        let (mut controls, mut camera) = setup(undamped());
        let input = Input::new();

        controls.update(&input, 1.0, VIEWPORT, &mut camera);

        let expected = -5.0 * TAU / 60.0;
        assert!((controls.azimuth - expected).abs() < 1e-5);
        assert!(((camera.position - controls.target).length() - 20.0).abs() < 1e-4);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn damped_auto_rotation_reaches_full_rate() {
        let (mut controls, mut camera) = setup(ControlsConfig::default());
        let input = Input::new();
        let dt = 1.0 / 60.0;

        for _ in 0..600 {
            controls.update(&input, dt, VIEWPORT, &mut camera);
        }
        let before = controls.azimuth;
        controls.update(&input, dt, VIEWPORT, &mut camera);

        let step = before - controls.azimuth;
        let expected = controls.auto_rotation_rate() * dt;
        assert!((step - expected).abs() < expected * 1e-3);
    }

    #[test]
    fn drag_rotates_by_viewport_fraction() {
        let (mut controls, mut camera) = setup(ControlsConfig {
            auto_rotate: false,
            ..undamped()
        });
        let mut input = Input::new();
        input.move_to(Vec2::new(100.0, 100.0));
        input.press(PointerButton::Primary);
        input.move_to(Vec2::new(250.0, 100.0));

        controls.update(&input, 1.0 / 60.0, VIEWPORT, &mut camera);

        // 150px of a 600px-high viewport is a quarter turn.
        assert!((controls.azimuth + PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn damping_keeps_momentum_after_release() {
        let (mut controls, mut camera) = setup(ControlsConfig {
            auto_rotate: false,
            ..ControlsConfig::default()
        });
        let mut input = Input::new();
        input.move_to(Vec2::ZERO);
        input.press(PointerButton::Primary);
        input.move_to(Vec2::new(60.0, 0.0));
        controls.update(&input, 1.0 / 60.0, VIEWPORT, &mut camera);

        input.begin_frame();
        input.release(PointerButton::Primary);

        let mut last = controls.azimuth;
        let mut last_step = f32::INFINITY;
        for _ in 0..10 {
            controls.update(&input, 1.0 / 60.0, VIEWPORT, &mut camera);
            let step = (last - controls.azimuth).abs();
            assert!(step > 0.0, "no drift after release");
            assert!(step < last_step, "drift does not decay");
            last_step = step;
            last = controls.azimuth;
        }
    }

    #[test]
    fn zoom_and_pan_disabled_by_default() {
        let (mut controls, mut camera) = setup(ControlsConfig {
            auto_rotate: false,
            ..undamped()
        });
        let mut input = Input::new();
        input.handle_event(&crate::events::AppEvent::Scrolled { lines: 3.0 });
        input.move_to(Vec2::ZERO);
        input.press(PointerButton::Secondary);
        input.move_to(Vec2::new(50.0, 50.0));

        controls.update(&input, 1.0 / 60.0, VIEWPORT, &mut camera);

        assert!((controls.radius - 20.0).abs() < 1e-5);
        assert_eq!(controls.target, Vec3::ZERO);
    }

    #[test]
    fn zoom_moves_camera_in_when_enabled() {
        let (mut controls, mut camera) = setup(ControlsConfig {
            auto_rotate: false,
            enable_zoom: true,
            ..undamped()
        });
        let mut input = Input::new();
        input.handle_event(&crate::events::AppEvent::Scrolled { lines: 1.0 });

        controls.update(&input, 1.0 / 60.0, VIEWPORT, &mut camera);

        assert!(controls.radius < 20.0);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let (mut controls, mut camera) = setup(ControlsConfig {
            auto_rotate: false,
            ..undamped()
        });
        let mut input = Input::new();
        input.move_to(Vec2::ZERO);
        input.press(PointerButton::Primary);
        input.move_to(Vec2::new(0.0, 5000.0));

        controls.update(&input, 1.0 / 60.0, VIEWPORT, &mut camera);

        assert!(controls.polar > 0.0 && controls.polar < PI);
        assert!(camera.position.is_finite());
    }
}
