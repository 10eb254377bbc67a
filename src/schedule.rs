//! Owning handles for the two repeating activities of a session.
//!
//! Both are polled from the host loop rather than running on their own, and
//! both stay inert once cancelled, so nothing keeps firing after a session
//! has stopped.

use std::time::{Duration, Instant};

/// Fires once per `period` of wall-clock time, independent of the frame rate.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl RepeatingTimer {
    /// First firing is one full period after `now`
    pub fn start(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
            cancelled: false,
        }
    }

    /// How many periods have elapsed since the last poll. Zero once cancelled.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.cancelled || self.period.is_zero() {
            return 0;
        }
        let mut fired = 0;
        while now >= self.next_due {
            self.next_due += self.period;
            fired += 1;
        }
        fired
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled
    }
}

/// Paces simulation frames. Missed frames are skipped, never replayed.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next_frame: Instant,
    cancelled: bool,
}

impl FrameClock {
    /// The first frame is due immediately
    pub fn start(now: Instant, interval: Duration) -> Self {
        Self {
            interval,
            next_frame: now,
            cancelled: false,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        !self.cancelled && now >= self.next_frame
    }

    /// Consume the pending frame, if any. Returns whether a frame should run.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_frame += self.interval;
        if self.next_frame <= now {
            // Fell behind; resume pacing from here instead of bursting
            self.next_frame = now + self.interval;
        }
        true
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled
    }
}
