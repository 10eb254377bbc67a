use std::time::{Duration, Instant};

/// Time-based interpolation of a scalar from `from` to `to` with a quadratic ease-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub started_at: Instant,
    pub duration: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Linear progress in `[0, 1]`. A zero duration is complete immediately.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> f32 {
        let eased = ease_out_quad(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}
