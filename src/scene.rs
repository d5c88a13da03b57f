//! Scene construction: one sphere, one point light, one camera.

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::color::Color;
use crate::config::SceneConfig;
use crate::geometry::RawGeometry;
use crate::mesh::Transform;

/// Viewport size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`. Not guarded: a zero height yields infinity or NaN.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Lit surface with a single mutable base color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
}

/// Point light with inverse-square falloff, cut off at `distance` (`0` = unbounded).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub position: Vec3,
}

/// The sphere: fixed geometry, animated transform and material.
#[derive(Clone, Debug)]
pub struct SceneMesh {
    pub geometry: RawGeometry,
    pub transform: Transform,
    pub material: StandardMaterial,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub mesh: SceneMesh,
    pub light: PointLight,
    pub camera: PerspectiveCamera,
    pub background: Color,
}

impl Scene {
    pub fn new(viewport: Viewport, config: &SceneConfig) -> Self {
        let mesh = SceneMesh {
            geometry: RawGeometry::sphere(
                config.sphere_radius,
                config.width_segments,
                config.height_segments,
            ),
            transform: Transform::new(),
            material: StandardMaterial {
                color: Color::from_hex(config.sphere_color),
            },
        };

        let light = PointLight {
            color: Color::from_hex(config.light_color),
            intensity: config.light_intensity,
            distance: config.light_distance,
            position: Vec3::from(config.light_position),
        };

        let camera = PerspectiveCamera::new(config.fov, viewport.aspect(), config.near, config.far)
            .at(Vec3::new(0.0, 0.0, config.camera_distance))
            .looking_at(Vec3::ZERO);

        Self {
            mesh,
            light,
            camera,
            background: Color::from_hex(config.background_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_stock_scene() {
        let scene = Scene::new(Viewport::new(800, 600), &SceneConfig::default());

        assert_eq!(scene.mesh.geometry.vertices.len(), 65 * 65);
        assert_eq!(scene.mesh.transform.scale, Vec3::ONE);
        assert_eq!(scene.mesh.material.color, Color::from_hex(0x00ff83));

        assert_eq!(scene.light.position, Vec3::new(0.0, 10.0, 10.0));
        assert_eq!(scene.light.intensity, 100.0);

        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 20.0));
        assert!((scene.camera.fov - 45f32.to_radians()).abs() < 1e-6);
        assert_eq!(scene.camera.aspect, 800.0 / 600.0);
        assert_eq!((scene.camera.near, scene.camera.far), (0.1, 100.0));
    }

    #[test]
    fn viewport_aspect() {
        assert_eq!(Viewport::new(1920, 1080).aspect(), 1920.0 / 1080.0);
        assert!(Viewport::new(0, 10).is_empty());
    }
}
