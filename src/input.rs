use std::collections::HashSet;

use glam::Vec2;

use crate::events::{AppEvent, PointerAction, PointerButton};

/// Tracks pointer state between frames.
///
/// Fed from [`AppEvent`]s; per-frame deltas are cleared by [`begin_frame`](Self::begin_frame).
#[derive(Debug, Default)]
pub struct Input {
    buttons_down: HashSet<PointerButton>,
    buttons_pressed: HashSet<PointerButton>,
    buttons_released: HashSet<PointerButton>,
    position: Vec2,
    delta: Vec2,
    scroll: f32,
    has_position: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call after each frame's update to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    pub fn handle_event(&mut self, event: &AppEvent) {
        match *event {
            AppEvent::Pointer { position, action } => match action {
                PointerAction::Pressed(button) => self.press(button),
                PointerAction::Released(button) => self.release(button),
                PointerAction::Moved => self.move_to(position),
            },
            AppEvent::Scrolled { lines } => self.scroll += lines,
            AppEvent::Resized { .. } => {}
        }
    }

    pub fn press(&mut self, button: PointerButton) {
        if self.buttons_down.insert(button) {
            self.buttons_pressed.insert(button);
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        self.buttons_down.remove(&button);
        self.buttons_released.insert(button);
    }

    pub fn move_to(&mut self, position: Vec2) {
        // The first move only establishes a reference point.
        if self.has_position {
            self.delta += position - self.position;
        }
        self.position = position;
        self.has_position = true;
    }

    pub fn button_down(&self, button: PointerButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn button_pressed(&self, button: PointerButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn button_released(&self, button: PointerButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Pointer movement accumulated this frame.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Scroll accumulated this frame, in lines.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_reported_once_per_frame() {
        let mut input = Input::new();
        input.press(PointerButton::Primary);
        assert!(input.button_pressed(PointerButton::Primary));
        assert!(input.button_down(PointerButton::Primary));

        input.begin_frame();
        input.press(PointerButton::Primary);
        assert!(!input.button_pressed(PointerButton::Primary));
        assert!(input.button_down(PointerButton::Primary));

        input.release(PointerButton::Primary);
        assert!(input.button_released(PointerButton::Primary));
        assert!(!input.button_down(PointerButton::Primary));
    }

    #[test]
    fn delta_accumulates_and_resets() {
        let mut input = Input::new();
        input.move_to(Vec2::new(10.0, 10.0));
        assert_eq!(input.delta(), Vec2::ZERO);

        input.move_to(Vec2::new(15.0, 12.0));
        input.move_to(Vec2::new(20.0, 20.0));
        assert_eq!(input.delta(), Vec2::new(10.0, 10.0));

        input.begin_frame();
        assert_eq!(input.delta(), Vec2::ZERO);
        assert_eq!(input.position(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn events_drive_state() {
        let mut input = Input::new();
        input.handle_event(&AppEvent::Pointer {
            position: Vec2::ZERO,
            action: PointerAction::Pressed(PointerButton::Secondary),
        });
        input.handle_event(&AppEvent::Scrolled { lines: 2.0 });
        assert!(input.button_down(PointerButton::Secondary));
        assert_eq!(input.scroll(), 2.0);
    }
}
