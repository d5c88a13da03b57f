use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::AppConfig;
use crate::error::Error;
use crate::events::{EventDispatcher, EventTranslator};
use crate::frame_loop::{FrameLoop, FrameTarget};
use crate::renderer::Renderer;
use crate::scene::Viewport;
use crate::state::LandingState;

/// Open the landing window and run until it is closed.
///
/// # Example
///
/// ```no_run
/// use orbit_landing::{AppConfig, run};
///
/// run(AppConfig::new().title("Give it a spin")).unwrap();
/// ```
pub fn run(config: AppConfig) -> Result<(), Error> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = LandingApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        LandingApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

enum LandingApp {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        renderer: Renderer,
        state: LandingState,
        translator: EventTranslator,
        dispatcher: EventDispatcher<LandingState>,
        frame_loop: FrameLoop,
    },
    Failed(Error),
}

impl LandingApp {
    fn start(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, Error> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let viewport = Viewport::new(size.width.max(1), size.height.max(1));
        let state = LandingState::new(viewport, config);
        let renderer = Renderer::new(
            window.clone(),
            &state.scene,
            &state.chrome,
            config.chrome.font_path.as_deref(),
        )?;
        info!(width = viewport.width, height = viewport.height, "window ready");

        window.request_redraw();

        Ok(LandingApp::Running {
            window,
            renderer,
            state,
            translator: EventTranslator::new(),
            dispatcher: LandingState::dispatcher(),
            frame_loop: FrameLoop::new(),
        })
    }
}

/// One tick's view of the app: update the state, then render it.
struct Frame<'a> {
    state: &'a mut LandingState,
    renderer: &'a mut Renderer,
    result: Result<(), wgpu::SurfaceError>,
}

impl FrameTarget for Frame<'_> {
    fn update(&mut self, dt: f32) {
        self.state.update(dt);
    }

    fn draw(&mut self) {
        self.result = self.renderer.render(&self.state.scene, &self.state.chrome);
    }
}

impl ApplicationHandler for LandingApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let LandingApp::Pending { config } = self else {
            return;
        };

        *self = match Self::start(event_loop, config) {
            Ok(running) => running,
            Err(err) => {
                error!("startup failed: {err}");
                event_loop.exit();
                LandingApp::Failed(err)
            }
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let LandingApp::Running {
            window,
            renderer,
            state,
            translator,
            dispatcher,
            frame_loop,
        } = self
        else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                info!("closing");
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(size) => {
                if renderer.resize(size.width, size.height) {
                    debug!(width = size.width, height = size.height, "surface resized");
                }
            }
            WindowEvent::RedrawRequested => {
                let mut frame = Frame {
                    state: &mut *state,
                    renderer: &mut *renderer,
                    result: Ok(()),
                };
                frame_loop.tick(&mut frame, Instant::now());
                let result = frame.result;

                match result {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        debug!("surface lost or outdated, reconfiguring");
                        renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory");
                        event_loop.exit();
                        return;
                    }
                    Err(err) => warn!("skipping frame: {err}"),
                }

                window.request_redraw();
                return;
            }
            _ => {}
        }

        if let Some(app_event) = translator.translate(&event) {
            dispatcher.dispatch(state, &app_event);
        }
    }
}
