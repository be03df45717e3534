use std::time::{Duration, Instant};

/// Fixed-timestep scheduler.
///
/// Every frame feeds the elapsed wall-clock time into an accumulator. A frame
/// is a fixed-update frame when at least one step period has accumulated; it
/// then consumes exactly one period. Whatever is left carries over, so a long
/// stall turns into one step per following frame instead of a burst of steps.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    last_timestamp: Instant,
    accumulated: Duration,
    step_period: Duration,
    is_playing: bool,
    step_requested: bool,
    fixed_update: bool,
    stepped_this_frame: bool,
}

impl SimulationClock {
    /// Create a paused clock firing at `steps_per_second`, starting at `now`
    pub fn new(steps_per_second: f64, now: Instant) -> Self {
        Self {
            last_timestamp: now,
            accumulated: Duration::ZERO,
            step_period: Duration::from_secs_f64(1.0 / steps_per_second.max(f64::EPSILON)),
            is_playing: false,
            step_requested: false,
            fixed_update: false,
            stepped_this_frame: false,
        }
    }

    /// Advance to `now`. Returns whether this is a fixed-update frame.
    pub fn tick(&mut self, now: Instant) -> bool {
        let delta = now.saturating_duration_since(self.last_timestamp);
        self.last_timestamp = now;
        self.advance(delta)
    }

    /// Advance by an explicit elapsed time. Returns whether this is a
    /// fixed-update frame.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.accumulated += delta;
        self.stepped_this_frame = false;

        if self.accumulated >= self.step_period {
            self.accumulated -= self.step_period;
            self.fixed_update = true;
        } else {
            self.fixed_update = false;
        }
        self.fixed_update
    }

    /// Whether the simulation should run a generation this frame
    pub fn should_step(&self) -> bool {
        (self.is_playing || self.step_requested) && self.fixed_update
    }

    /// Record that a generation ran this frame, clearing any single-step request
    pub fn mark_stepped(&mut self) {
        self.step_requested = false;
        self.stepped_this_frame = true;
    }

    pub fn is_fixed_update_frame(&self) -> bool {
        self.fixed_update
    }

    pub fn stepped_this_frame(&self) -> bool {
        self.stepped_this_frame
    }

    pub fn step_period(&self) -> Duration {
        self.step_period
    }

    /// Time carried over towards the next fixed update
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn toggle_play(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Ask for exactly one generation at the next fixed-update frame
    pub fn request_step(&mut self) {
        self.step_requested = true;
    }

    pub fn step_requested(&self) -> bool {
        self.step_requested
    }
}
