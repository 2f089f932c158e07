use web_time::{Duration, Instant};

/// Frame timing with smoothed FPS and a periodic average-duration report.
pub struct FrameTiming {
    /// Frames between two reports (0 = never report)
    report_interval: u32,
    /// Frames counted since the last report
    frames_since_report: u32,
    /// Start of the current report window
    window_start: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer reporting every `report_interval` frames.
    #[must_use]
    pub fn new(report_interval: u32) -> Self {
        Self::starting_at(report_interval, Instant::now())
    }

    fn starting_at(report_interval: u32, now: Instant) -> Self {
        Self {
            report_interval,
            frames_since_report: 0,
            window_start: now,
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Call after rendering to update timing.
    ///
    /// Returns the mean frame duration when a report window completes.
    pub fn end_frame(&mut self) -> Option<Duration> {
        self.end_frame_at(Instant::now())
    }

    fn end_frame_at(&mut self, now: Instant) -> Option<Duration> {
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        if self.report_interval == 0 {
            return None;
        }
        self.frames_since_report += 1;
        if self.frames_since_report < self.report_interval {
            return None;
        }

        let mean = now.duration_since(self.window_start) / self.report_interval;
        log::debug!("{:.4} ms per frame", mean.as_secs_f64() * 1000.0);
        self.frames_since_report = 0;
        self.window_start = now;
        Some(mean)
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_mean_duration_each_window() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(4, start);
        let step = Duration::from_millis(10);

        let reports: Vec<_> = (1..=8)
            .map(|i| timing.end_frame_at(start + step * i))
            .collect();

        assert!(reports[..3].iter().all(Option::is_none));
        assert_eq!(reports[3], Some(step));
        assert!(reports[4..7].iter().all(Option::is_none));
        assert_eq!(reports[7], Some(step));
    }

    #[test]
    fn zero_interval_never_reports() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(0, start);
        for i in 1..50 {
            let at = start + Duration::from_millis(16 * i);
            assert!(timing.end_frame_at(at).is_none());
        }
        assert!(timing.fps() > 60.0);
    }
}
