use std::time::Instant;

/// One clock reading, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
}

/// Minimal frame clock - tracks total elapsed time and per-frame delta.
/// Animation systems receive both and manage their own state.
#[derive(Debug)]
pub struct Clock {
    started: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
        }
    }

    /// Advance the clock and get the elapsed/delta pair
    pub fn tick(&mut self) -> Tick {
        let now = Instant::now();
        let tick = Tick {
            elapsed: now.duration_since(self.started).as_secs_f32(),
            delta: now.duration_since(self.last_tick).as_secs_f32(),
        };
        self.last_tick = now;
        tick
    }

    /// Elapsed seconds without advancing
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.last_tick = now;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
