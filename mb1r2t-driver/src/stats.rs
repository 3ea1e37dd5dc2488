use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// One-second tally for throughput display, like measurements per
/// second. Counts are folded into a rate once per window; the published
/// rate is the total of the previous full window.
pub struct RateCounter {
    window_start: Instant,
    count: u64,
    rate: u64,
}

impl RateCounter {
    pub fn new() -> RateCounter {
        RateCounter {
            window_start: Instant::now(),
            count: 0,
            rate: 0,
        }
    }

    pub fn record(&mut self, n: u64) {
        self.record_at(n, Instant::now());
    }

    /// Count over the last completed window.
    pub fn per_second(&self) -> u64 {
        self.rate
    }

    fn record_at(&mut self, n: u64, now: Instant) {
        self.count += n;
        if now.duration_since(self.window_start) >= WINDOW {
            self.rate = self.count;
            self.count = 0;
            self.window_start = now;
        }
    }
}

impl Default for RateCounter {
    fn default() -> Self {
        RateCounter::new()
    }
}
