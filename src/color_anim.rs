//! Pointer-driven recoloring of the sphere.
//!
//! While the primary button is held, every pointer move maps the cursor
//! position to a color and starts a transition toward it. A new target
//! replaces the running transition, which restarts from whatever color is
//! currently shown, so the newest target always wins without a visible jump.

use glam::Vec2;

use crate::color::Color;
use crate::config::PointerConfig;
use crate::scene::Viewport;
use crate::tween::{Easing, Tween};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerHold {
    #[default]
    Released,
    Held,
}

/// Map a pointer position to an sRGB color: red follows x, green follows y.
pub fn pointer_color(position: Vec2, viewport: Viewport, blue: u8) -> [u8; 3] {
    let channel = |pos: f32, extent: u32| {
        let value = (pos / extent as f32 * 255.0).floor();
        if value.is_nan() {
            0
        } else {
            value.clamp(0.0, 255.0) as u8
        }
    };
    [
        channel(position.x, viewport.width),
        channel(position.y, viewport.height),
        blue,
    ]
}

/// Hold state plus the in-flight color transition.
#[derive(Clone, Debug)]
pub struct ColorAnimator {
    hold: PointerHold,
    blue: u8,
    duration: f32,
    easing: Easing,
    last_target: Option<[u8; 3]>,
    tween: Option<Tween<Color>>,
}

impl ColorAnimator {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            hold: PointerHold::Released,
            blue: config.blue,
            duration: config.transition_duration,
            easing: Easing::EaseOut,
            last_target: None,
            tween: None,
        }
    }

    pub fn hold(&self) -> PointerHold {
        self.hold
    }

    pub fn press(&mut self) {
        self.hold = PointerHold::Held;
    }

    pub fn release(&mut self) {
        self.hold = PointerHold::Released;
    }

    /// Most recent sRGB target, if any move happened while held.
    pub fn last_target(&self) -> Option<[u8; 3]> {
        self.last_target
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Handle a pointer move. `current` is the color the material shows now.
    ///
    /// Returns the new sRGB target, or `None` when released.
    pub fn pointer_moved(
        &mut self,
        position: Vec2,
        viewport: Viewport,
        current: Color,
    ) -> Option<[u8; 3]> {
        if self.hold == PointerHold::Released {
            return None;
        }

        let rgb = pointer_color(position, viewport, self.blue);
        let target = Color::from_srgb8(rgb[0], rgb[1], rgb[2]);
        self.tween = Some(Tween::new(current, target, self.duration, self.easing));
        self.last_target = Some(rgb);
        Some(rgb)
    }

    /// Advance the running transition and return the color to show, if any.
    pub fn advance(&mut self, dt: f32) -> Option<Color> {
        let tween = self.tween.as_mut()?;
        let color = tween.advance(dt);
        if tween.is_finished() {
            self.tween = None;
        }
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    #[test]
    fn corner_colors() {
        assert_eq!(pointer_color(Vec2::ZERO, VIEWPORT, 150), [0, 0, 150]);
        assert_eq!(
            pointer_color(Vec2::new(800.0, 600.0), VIEWPORT, 150),
            [255, 255, 150]
        );
    }

    #[test]
    fn channels_floor_and_clamp() {
        // 400 / 800 * 255 = 127.5
        assert_eq!(pointer_color(Vec2::new(400.0, 0.0), VIEWPORT, 150)[0], 127);
        assert_eq!(
            pointer_color(Vec2::new(-20.0, 900.0), VIEWPORT, 150),
            [0, 255, 150]
        );
    }

    #[test]
    fn released_moves_do_nothing() {
        let mut anim = ColorAnimator::new(&PointerConfig::default());
        let target = anim.pointer_moved(Vec2::new(10.0, 10.0), VIEWPORT, Color::WHITE);
        assert_eq!(target, None);
        assert!(!anim.is_animating());
        assert_eq!(anim.advance(0.1), None);
    }

    #[test]
    fn held_move_animates_toward_target() {
        let mut anim = ColorAnimator::new(&PointerConfig::default());
        anim.press();
        let start = Color::from_hex(0x00ff83);
        anim.pointer_moved(Vec2::new(800.0, 600.0), VIEWPORT, start);

        let mid = anim.advance(0.1).unwrap();
        assert_ne!(mid, start);

        let end = anim.advance(1.0).unwrap();
        assert_eq!(end, Color::from_srgb8(255, 255, 150));
        assert!(!anim.is_animating());
    }

    #[test]
    fn newest_target_wins_from_current_color() {
        let mut anim = ColorAnimator::new(&PointerConfig::default());
        anim.press();
        anim.pointer_moved(Vec2::ZERO, VIEWPORT, Color::WHITE);
        let mid = anim.advance(0.1).unwrap();

        anim.pointer_moved(Vec2::new(800.0, 0.0), VIEWPORT, mid);
        // Restarting from the shown color means no jump on the first step.
        let next = anim.advance(0.0).unwrap();
        assert_eq!(next, mid);

        let end = anim.advance(10.0).unwrap();
        assert_eq!(end, Color::from_srgb8(255, 0, 150));
        assert_eq!(anim.last_target(), Some([255, 0, 150]));
    }

    #[test]
    fn release_stops_new_targets() {
        let mut anim = ColorAnimator::new(&PointerConfig::default());
        anim.press();
        anim.release();
        assert_eq!(anim.hold(), PointerHold::Released);
        assert_eq!(
            anim.pointer_moved(Vec2::ZERO, VIEWPORT, Color::WHITE),
            None
        );
    }
}
