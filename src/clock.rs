/// Self-rearming timer driven by frame time.
///
/// Each firing is armed with the interval current at the moment it was
/// rescheduled, so changing the speed only affects the next firing. Any
/// overshoot past the deadline carries into the next period.
#[derive(Clone, Debug)]
pub struct RepeatingTask {
    interval: f64,
    elapsed: f64,
}

impl RepeatingTask {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Interval of the currently armed firing, in seconds.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt.max(0.0);
    }

    /// Consume one due firing, if any. Call `rearm` after handling it.
    pub fn fire_due(&mut self) -> bool {
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }

    pub fn rearm(&mut self, interval: f64) {
        self.interval = interval;
    }
}
