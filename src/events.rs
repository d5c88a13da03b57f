//! Typed application events and an observer-style dispatcher.
//!
//! Window events are translated once into [`AppEvent`]s carrying only what the
//! handlers need. Handlers subscribe to an [`EventDispatcher`] and receive the
//! application state by `&mut`.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Mouse buttons the app distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::Primary,
            MouseButton::Right => Self::Secondary,
            MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    Pressed(PointerButton),
    Released(PointerButton),
    Moved,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppEvent {
    /// New viewport size in physical pixels.
    Resized { width: u32, height: u32 },
    /// Pointer activity; `position` is in physical pixels from the top-left.
    Pointer {
        position: Vec2,
        action: PointerAction,
    },
    /// Wheel movement in lines, positive away from the user.
    Scrolled { lines: f32 },
}

/// Converts winit window events into [`AppEvent`]s.
///
/// Button events in winit carry no position, so the translator remembers the
/// last cursor position and attaches it.
#[derive(Debug, Default)]
pub struct EventTranslator {
    cursor: Vec2,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<AppEvent> {
        match event {
            WindowEvent::Resized(size) => Some(AppEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(AppEvent::Pointer {
                    position: self.cursor,
                    action: PointerAction::Moved,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = PointerButton::from(*button);
                let action = match state {
                    ElementState::Pressed => PointerAction::Pressed(button),
                    ElementState::Released => PointerAction::Released(button),
                };
                Some(AppEvent::Pointer {
                    position: self.cursor,
                    action,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                Some(AppEvent::Scrolled { lines })
            }
            _ => None,
        }
    }
}

type Listener<S> = Box<dyn FnMut(&mut S, &AppEvent)>;

/// Ordered list of event listeners over a state type `S`.
///
/// Listeners run in subscription order for every dispatched event.
pub struct EventDispatcher<S> {
    listeners: Vec<(&'static str, Listener<S>)>,
}

impl<S> Default for EventDispatcher<S> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<S> EventDispatcher<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named listener.
    pub fn subscribe(
        &mut self,
        name: &'static str,
        listener: impl FnMut(&mut S, &AppEvent) + 'static,
    ) -> &mut Self {
        self.listeners.push((name, Box::new(listener)));
        self
    }

    pub fn dispatch(&mut self, state: &mut S, event: &AppEvent) {
        for (name, listener) in &mut self.listeners {
            tracing::trace!(listener = *name, ?event, "dispatch");
            listener(state, event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn resize_translates_to_typed_payload() {
        let mut translator = EventTranslator::new();
        let event = translator.translate(&WindowEvent::Resized(PhysicalSize::new(800, 600)));
        assert_eq!(
            event,
            Some(AppEvent::Resized {
                width: 800,
                height: 600
            })
        );
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut translator = EventTranslator::new();
        assert_eq!(translator.translate(&WindowEvent::CloseRequested), None);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let mut dispatcher: EventDispatcher<Vec<&'static str>> = EventDispatcher::new();
        dispatcher
            .subscribe("first", |log, _| log.push("first"))
            .subscribe("second", |log, _| log.push("second"));

        let mut log = Vec::new();
        dispatcher.dispatch(&mut log, &AppEvent::Scrolled { lines: 1.0 });
        dispatcher.dispatch(&mut log, &AppEvent::Scrolled { lines: -1.0 });

        assert_eq!(log, ["first", "second", "first", "second"]);
        assert_eq!(dispatcher.len(), 2);
    }

    #[test]
    fn mouse_buttons_map_to_pointer_buttons() {
        assert_eq!(PointerButton::from(MouseButton::Left), PointerButton::Primary);
        assert_eq!(
            PointerButton::from(MouseButton::Right),
            PointerButton::Secondary
        );
        assert_eq!(PointerButton::from(MouseButton::Back), PointerButton::Other);
    }
}
