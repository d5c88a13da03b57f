use std::time::Instant;

/// Longest step fed to `update`, so a stalled window does not jump animations.
const MAX_DT: f32 = 0.25;

/// Something driven once per displayed frame.
pub trait FrameTarget {
    /// Advance state by `dt` seconds.
    fn update(&mut self, dt: f32);
    /// Draw the state produced by the preceding `update`.
    fn draw(&mut self);
}

/// Per-frame tick: measures elapsed time, then updates strictly before drawing.
#[derive(Debug, Default)]
pub struct FrameLoop {
    last: Option<Instant>,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame at `now`. The first frame has `dt == 0`.
    pub fn tick(&mut self, target: &mut impl FrameTarget, now: Instant) -> f32 {
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32())
            .min(MAX_DT);
        self.last = Some(now);

        target.update(dt);
        target.draw();
        self.frames += 1;
        dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
        dts: Vec<f32>,
    }

    impl FrameTarget for Recorder {
        fn update(&mut self, dt: f32) {
            self.log.push(format!("update{}", self.dts.len()));
            self.dts.push(dt);
        }

        fn draw(&mut self) {
            self.log.push(format!("draw{}", self.dts.len() - 1));
        }
    }

    #[test]
    fn each_tick_updates_then_draws() {
        let mut frame_loop = FrameLoop::new();
        let mut target = Recorder::default();
        let start = Instant::now();

        for i in 0..3 {
            frame_loop.tick(&mut target, start + Duration::from_millis(16 * i));
        }

        assert_eq!(
            target.log,
            ["update0", "draw0", "update1", "draw1", "update2", "draw2"]
        );
        assert_eq!(frame_loop.frame_count(), 3);
    }

    #[test]
    fn dt_measures_time_between_ticks() {
        let mut frame_loop = FrameLoop::new();
        let mut target = Recorder::default();
        let start = Instant::now();

        frame_loop.tick(&mut target, start);
        frame_loop.tick(&mut target, start + Duration::from_millis(20));
        frame_loop.tick(&mut target, start + Duration::from_secs(5));

        assert_eq!(target.dts[0], 0.0);
        assert!((target.dts[1] - 0.02).abs() < 1e-6);
        assert_eq!(target.dts[2], MAX_DT);
    }
}
