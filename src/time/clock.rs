use web_time::Instant;

/// Source of monotonic wall-clock seconds.
pub trait WallClock {
    /// Seconds since an arbitrary but fixed origin.
    fn now(&self) -> f64;
}

/// Wall clock backed by [`web_time::Instant`], counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is the moment of construction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Maps wall-clock time to world time.
///
/// World time is `alpha + beta * sample` while running and a captured
/// constant while frozen. `beta` is the playback rate; `alpha` is re-solved
/// whenever the rate changes or the clock unfreezes so that world time is
/// continuous at the current frame's sampled instant.
///
/// The wall clock is read only by [`sample_time`](Self::sample_time), so
/// every [`time`](Self::time) query between two samples observes the same
/// value.
pub struct WorldClock {
    wall: Box<dyn WallClock>,
    sample_wall_time: f64,
    alpha: f64,
    beta: f64,
    freeze_time: Option<f64>,
}

impl WorldClock {
    /// Running clock at rate 1.0 driven by a [`SystemClock`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_wall_clock(SystemClock::new())
    }

    /// Running clock at rate 1.0 driven by the given wall clock. World time
    /// starts equal to wall time.
    pub fn with_wall_clock(wall: impl WallClock + 'static) -> Self {
        let sample_wall_time = wall.now();
        Self {
            wall: Box::new(wall),
            sample_wall_time,
            alpha: 0.0,
            beta: 1.0,
            freeze_time: None,
        }
    }

    /// Capture the current wall time. Returns the world time for the new
    /// sample.
    pub fn sample_time(&mut self) -> f64 {
        self.sample_wall_time = self.wall.now();
        self.time()
    }

    /// World time at the most recent sample.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.freeze_time
            .unwrap_or_else(|| self.alpha + self.beta * self.sample_wall_time)
    }

    /// Change the playback rate without a jump in world time.
    ///
    /// Zero pauses, negative values run backwards. While frozen only the
    /// rate is stored; the offset is re-solved on unfreeze.
    pub fn set_playback_rate(&mut self, rate: f64) {
        if self.freeze_time.is_none() {
            // alpha + beta * t == alpha' + rate * t
            self.alpha += (self.beta - rate) * self.sample_wall_time;
        }
        log::debug!("playback rate {} -> {rate}", self.beta);
        self.beta = rate;
    }

    /// Current playback rate.
    #[must_use]
    pub fn playback_rate(&self) -> f64 {
        self.beta
    }

    /// Freeze or resume world time. Redundant calls are no-ops.
    pub fn set_frozen(&mut self, frozen: bool) {
        match (frozen, self.freeze_time) {
            (true, None) => {
                let now = self.time();
                self.freeze_time = Some(now);
                log::debug!("world clock frozen at {now:.4}");
            }
            (false, Some(frozen_at)) => {
                self.alpha = frozen_at - self.beta * self.sample_wall_time;
                self.freeze_time = None;
                log::debug!("world clock resumed at {frozen_at:.4}");
            }
            _ => {}
        }
    }

    /// Whether world time is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.freeze_time.is_some()
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new()
    }
}
