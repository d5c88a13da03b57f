//! Application state and its event handlers.
//!
//! Everything the landing page mutates lives in [`LandingState`]. Event
//! listeners and the frame tick receive it by `&mut`; nothing else holds it.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::chrome::Chrome;
use crate::color_anim::ColorAnimator;
use crate::config::{AppConfig, EntranceConfig};
use crate::events::{AppEvent, EventDispatcher, PointerAction, PointerButton};
use crate::input::Input;
use crate::orbit_controls::OrbitControls;
use crate::scene::{Scene, Viewport};
use crate::tween::{Easing, Timeline, TweenDefaults};

/// Sphere scales in, then the nav slides down, then the title fades in.
pub fn entrance_timeline(config: &EntranceConfig) -> Timeline<LandingState> {
    let mut timeline = Timeline::new(TweenDefaults {
        duration: config.duration,
        easing: Easing::EaseOut,
    });
    timeline
        .from_to(Vec3::ZERO, Vec3::ONE, |s: &mut LandingState, v| {
            s.scene.mesh.transform.scale = v
        })
        .from_to(-1.0f32, 0.0, |s: &mut LandingState, v| {
            s.chrome.nav_offset = v
        })
        .from_to(0.0f32, 1.0, |s: &mut LandingState, v| {
            s.chrome.title_opacity = v
        });
    timeline
}

pub struct LandingState {
    pub viewport: Viewport,
    pub scene: Scene,
    pub chrome: Chrome,
    pub controls: OrbitControls,
    pub input: Input,
    pub color: ColorAnimator,
    entrance: Option<Timeline<LandingState>>,
}

impl LandingState {
    pub fn new(viewport: Viewport, config: &AppConfig) -> Self {
        let scene = Scene::new(viewport, &config.scene);
        let controls = OrbitControls::new(&scene.camera, Vec3::ZERO, &config.controls);

        Self {
            viewport,
            scene,
            chrome: Chrome::new(&config.chrome),
            controls,
            input: Input::new(),
            color: ColorAnimator::new(&config.pointer),
            entrance: Some(entrance_timeline(&config.entrance)),
        }
    }

    /// Listeners wiring typed events into this state, in the order they run.
    pub fn dispatcher() -> EventDispatcher<LandingState> {
        let mut dispatcher: EventDispatcher<LandingState> = EventDispatcher::new();
        dispatcher
            .subscribe("input", |s, event| s.input.handle_event(event))
            .subscribe("resize", |s, event| {
                if let AppEvent::Resized { width, height } = *event {
                    s.on_resize(width, height);
                }
            })
            .subscribe("pointer-color", |s, event| {
                if let AppEvent::Pointer { position, action } = *event {
                    s.on_pointer(position, action);
                }
            });
        dispatcher
    }

    /// Store the new viewport and refresh the camera projection.
    ///
    /// Returns `false` when nothing changed: a zero dimension or the same size.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        let viewport = Viewport::new(width, height);
        if viewport.is_empty() {
            debug!(width, height, "ignoring empty resize");
            return false;
        }
        if viewport == self.viewport {
            return false;
        }

        self.viewport = viewport;
        self.scene.camera.set_aspect(viewport.aspect());
        debug!(width, height, aspect = viewport.aspect(), "resized");
        true
    }

    pub fn on_pointer(&mut self, position: Vec2, action: PointerAction) {
        match action {
            PointerAction::Pressed(PointerButton::Primary) => {
                self.color.press();
                debug!("pointer held");
            }
            PointerAction::Released(PointerButton::Primary) => {
                self.color.release();
                debug!("pointer released");
            }
            PointerAction::Moved => {
                let current = self.scene.mesh.material.color;
                if let Some(rgb) = self.color.pointer_moved(position, self.viewport, current) {
                    debug!(?rgb, "color target");
                }
            }
            PointerAction::Pressed(_) | PointerAction::Released(_) => {}
        }
    }

    /// Advance one frame: entrance, color transition, orbit, then input reset.
    pub fn update(&mut self, dt: f32) {
        if let Some(mut entrance) = self.entrance.take() {
            entrance.advance(self, dt);
            if entrance.is_finished() {
                debug!("entrance finished");
            } else {
                self.entrance = Some(entrance);
            }
        }

        if let Some(color) = self.color.advance(dt) {
            self.scene.mesh.material.color = color;
        }

        self.controls
            .update(&self.input, dt, self.viewport, &mut self.scene.camera);

        self.input.begin_frame();
    }

    pub fn entrance_finished(&self) -> bool {
        self.entrance.is_none()
    }
}
