//! # Orbit Landing
//!
//! **An interactive 3D landing scene.**
//!
//! One lit sphere in a window. Drag to orbit it; the camera keeps drifting
//! with damping and auto-rotates when left alone. On startup the sphere
//! scales in, a navigation bar slides down and a title fades in. Holding the
//! primary button while moving the cursor recolors the sphere.
//!
//! ## Quick Start
//!
//! ```no_run
//! use orbit_landing::{AppConfig, run};
//!
//! fn main() -> Result<(), orbit_landing::Error> {
//!     run(AppConfig::new().title("Give it a spin").size(1280, 720))
//! }
//! ```
//!
//! ## Layout
//!
//! - Pure state: [`Scene`], [`OrbitControls`], [`Timeline`], [`ColorAnimator`],
//!   [`Chrome`] and [`LandingState`] tying them together. None of these touch
//!   the GPU.
//! - Rendering: [`GpuContext`], [`MeshPass`], [`Draw2d`] and [`FontAtlas`],
//!   owned by [`Renderer`].
//! - Driving: [`FrameLoop`] ticks update-then-draw once per redraw; [`run`]
//!   wires winit events through an [`EventDispatcher`].

mod app;
mod camera;
mod chrome;
mod color;
mod color_anim;
mod config;
mod draw2d;
mod error;
mod events;
mod font;
mod frame_loop;
mod geometry;
mod gpu;
mod input;
mod mesh;
mod mesh_pass;
mod orbit_controls;
mod renderer;
mod scene;
mod state;
mod tween;

pub use app::run;
pub use camera::PerspectiveCamera;
pub use chrome::{Chrome, OverlayItem, Rect, TextStyle};
pub use color::Color;
pub use color_anim::{ColorAnimator, PointerHold, pointer_color};
pub use config::{
    AppConfig, ChromeConfig, ControlsConfig, EntranceConfig, PointerConfig, SceneConfig,
    WindowConfig,
};
pub use draw2d::{Draw2d, Vertex2d};
pub use error::{ConfigError, Error, FontError, GpuError};
pub use events::{AppEvent, EventDispatcher, EventTranslator, PointerAction, PointerButton};
pub use font::{FontAtlas, FontId, FontLibrary, GlyphInfo};
pub use frame_loop::{FrameLoop, FrameTarget};
pub use geometry::RawGeometry;
pub use gpu::GpuContext;
pub use input::Input;
pub use mesh::{Mesh, Transform, Vertex3d};
pub use mesh_pass::MeshPass;
pub use orbit_controls::OrbitControls;
pub use renderer::Renderer;
pub use scene::{PointLight, Scene, SceneMesh, StandardMaterial, Viewport};
pub use state::{LandingState, entrance_timeline};
pub use tween::{Easing, Lerp, Position, Timeline, Tween, TweenDefaults};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
