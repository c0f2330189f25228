use crate::constants::{MAX_FRAME_DT, REFERENCE_FPS};
use instant::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock was created.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped to [`MAX_FRAME_DT`].
    pub dt: f32,
}

/// Monotonic frame clock shared by the web and native frontends.
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32().min(MAX_FRAME_DT);
        self.last = now;
        FrameTime {
            elapsed: (now - self.start).as_secs_f32(),
            dt,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Rescale a per-frame smoothing factor `k` (tuned at [`REFERENCE_FPS`]) to
/// an arbitrary `dt`. Returns exactly `k` when `dt == 1 / REFERENCE_FPS`.
#[inline]
pub fn frame_factor(k: f32, dt: f32) -> f32 {
    let k = k.clamp(0.0, 1.0);
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - k).powf(dt * REFERENCE_FPS)
}
