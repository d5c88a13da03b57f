//! Tweens and sequenced timelines.
//!
//! A [`Tween`] interpolates a single value over time. A [`Timeline`] schedules
//! several `from → to` transitions against a state type `S`, each writing its
//! value through a setter closure, and sequences them one after another unless
//! told otherwise.
//!
//! # Example
//!
//! ```ignore
//! let mut timeline = Timeline::new(TweenDefaults::default());
//! timeline
//!     .from_to(Vec3::ZERO, Vec3::ONE, |s: &mut Landing, v| s.scene.mesh.transform.scale = v)
//!     .from_to(-1.0, 0.0, |s: &mut Landing, v| s.chrome.nav_offset = v);
//!
//! // Each frame:
//! timeline.advance(&mut landing, dt);
//! ```

use glam::Vec3;

use crate::color::Color;

/// Easing functions mapping linear progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed throughout.
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    #[default]
    EaseOut,
    /// Start slow, speed up, then slow down.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        if t >= 1.0 {
            to
        } else {
            self + (to - self) * t
        }
    }
}

impl Lerp for Vec3 {
    fn lerp(self, to: Self, t: f32) -> Self {
        Vec3::lerp(self, to, t)
    }
}

impl Lerp for Color {
    fn lerp(self, to: Self, t: f32) -> Self {
        Color::rgba(
            self.r.lerp(to.r, t),
            self.g.lerp(to.g, t),
            self.b.lerp(to.b, t),
            self.a.lerp(to.a, t),
        )
    }
}

/// Duration and easing used when an entry does not specify its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenDefaults {
    pub duration: f32,
    pub easing: Easing,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            duration: 0.5,
            easing: Easing::EaseOut,
        }
    }
}

/// A single time-bounded interpolation.
#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Lerp> {
    pub from: T,
    pub to: T,
    pub duration: f32,
    pub easing: Easing,
    elapsed: f32,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Where an entry starts relative to the rest of the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Position {
    /// When the previously added entry ends.
    #[default]
    AfterPrevious,
    /// When the previously added entry starts.
    WithPrevious,
    /// At an absolute time from the timeline start, in seconds.
    At(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Running,
    Done,
}

struct Entry<S> {
    start: f32,
    duration: f32,
    easing: Easing,
    phase: Phase,
    /// Writes the value at the given eased progress into the state.
    apply: Box<dyn FnMut(&mut S, f32)>,
}

impl<S> Entry<S> {
    fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// A one-shot sequence of transitions over a state type `S`.
pub struct Timeline<S> {
    defaults: TweenDefaults,
    entries: Vec<Entry<S>>,
    elapsed: f32,
    started: bool,
}

impl<S> Timeline<S> {
    pub fn new(defaults: TweenDefaults) -> Self {
        Self {
            defaults,
            entries: Vec::new(),
            elapsed: 0.0,
            started: false,
        }
    }

    /// Append a transition sequenced after the previous entry, with default
    /// duration and easing.
    pub fn from_to<T, F>(&mut self, from: T, to: T, setter: F) -> &mut Self
    where
        T: Lerp + 'static,
        F: FnMut(&mut S, T) + 'static,
    {
        let TweenDefaults { duration, easing } = self.defaults;
        self.from_to_with(from, to, duration, easing, Position::AfterPrevious, setter)
    }

    /// Append a transition with explicit duration, easing and position.
    pub fn from_to_with<T, F>(
        &mut self,
        from: T,
        to: T,
        duration: f32,
        easing: Easing,
        position: Position,
        mut setter: F,
    ) -> &mut Self
    where
        T: Lerp + 'static,
        F: FnMut(&mut S, T) + 'static,
    {
        let start = match position {
            Position::AfterPrevious => self.entries.last().map_or(0.0, Entry::end),
            Position::WithPrevious => self.entries.last().map_or(0.0, |e| e.start),
            Position::At(t) => t.max(0.0),
        };

        self.entries.push(Entry {
            start,
            duration: duration.max(0.0),
            easing,
            phase: Phase::Pending,
            apply: Box::new(move |state, t| setter(state, from.lerp(to, t))),
        });
        self
    }

    /// Advance the timeline by `dt` seconds, writing every affected value.
    ///
    /// The first call renders each entry's `from` value before any time
    /// passes, so later entries hold their initial value until their turn.
    pub fn advance(&mut self, state: &mut S, dt: f32) {
        if !self.started {
            self.started = true;
            for entry in &mut self.entries {
                (entry.apply)(state, 0.0);
            }
        }

        self.elapsed += dt.max(0.0);

        for entry in &mut self.entries {
            if entry.phase == Phase::Done || self.elapsed < entry.start {
                continue;
            }

            let local = self.elapsed - entry.start;
            let progress = if entry.duration <= 0.0 {
                1.0
            } else {
                (local / entry.duration).min(1.0)
            };

            (entry.apply)(state, entry.easing.apply(progress));
            entry.phase = if progress >= 1.0 {
                Phase::Done
            } else {
                Phase::Running
            };
        }
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f32 {
        self.entries.iter().map(Entry::end).fold(0.0, f32::max)
    }

    /// `(start, end)` of each entry in insertion order.
    pub fn spans(&self) -> Vec<(f32, f32)> {
        self.entries.iter().map(|e| (e.start, e.end())).collect()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.entries.iter().all(|e| e.phase == Phase::Done)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        a: f32,
        b: f32,
        writes: Vec<&'static str>,
    }

    fn two_step() -> Timeline<Probe> {
        let mut timeline = Timeline::new(TweenDefaults {
            duration: 1.0,
            easing: Easing::Linear,
        });
        timeline
            .from_to(0.0, 10.0, |p: &mut Probe, v| {
                p.a = v;
                p.writes.push("a");
            })
            .from_to(5.0, 1.0, |p: &mut Probe, v| {
                p.b = v;
                p.writes.push("b");
            });
        timeline
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn tween_clamps_at_end() {
        let mut tween = Tween::new(0.0, 4.0, 2.0, Easing::Linear);
        assert_eq!(tween.advance(1.0), 2.0);
        assert!(!tween.is_finished());
        assert_eq!(tween.advance(5.0), 4.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn zero_duration_tween_jumps_to_target() {
        let tween = Tween::new(Color::BLACK, Color::WHITE, 0.0, Easing::EaseOut);
        assert_eq!(tween.value(), Color::WHITE);
    }

    #[test]
    fn first_advance_renders_from_values() {
        let mut timeline = two_step();
        let mut probe = Probe {
            a: -1.0,
            b: -1.0,
            ..Default::default()
        };
        timeline.advance(&mut probe, 0.0);
        assert_eq!(probe.a, 0.0);
        assert_eq!(probe.b, 5.0);
    }

    #[test]
    fn entries_run_in_sequence() {
        let mut timeline = two_step();
        assert_eq!(timeline.spans(), vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(timeline.duration(), 2.0);

        let mut probe = Probe::default();
        timeline.advance(&mut probe, 0.5);
        assert_eq!(probe.a, 5.0);
        assert_eq!(probe.b, 5.0);

        probe.writes.clear();
        timeline.advance(&mut probe, 0.5);
        assert_eq!(probe.a, 10.0);
        assert_eq!(probe.writes, ["a", "b"]);

        timeline.advance(&mut probe, 0.5);
        assert_eq!(probe.b, 3.0);
        assert!(!timeline.is_finished());

        timeline.advance(&mut probe, 10.0);
        assert_eq!(probe.b, 1.0);
        assert!(timeline.is_finished());

        probe.writes.clear();
        timeline.advance(&mut probe, 1.0);
        assert!(probe.writes.is_empty());
    }

    #[test]
    fn explicit_positions() {
        let mut timeline: Timeline<Probe> = Timeline::new(TweenDefaults::default());
        timeline
            .from_to_with(0.0, 1.0, 2.0, Easing::Linear, Position::At(1.0), |p, v| {
                p.a = v
            })
            .from_to_with(
                0.0,
                1.0,
                0.5,
                Easing::Linear,
                Position::WithPrevious,
                |p, v| p.b = v,
            );
        assert_eq!(timeline.spans(), vec![(1.0, 3.0), (1.0, 1.5)]);
    }

    #[test]
    fn large_step_completes_every_entry() {
        let mut timeline = two_step();
        let mut probe = Probe::default();
        timeline.advance(&mut probe, 100.0);
        assert_eq!((probe.a, probe.b), (10.0, 1.0));
        assert!(timeline.is_finished());
    }
}
