use std::time::Duration;

/// How long a measurement takes from start to the final reading.
pub const MEASUREMENT_DURATION: Duration = Duration::from_millis(6000);

/// Period of the measurement tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// How long the result of a finished measurement stays on screen before returning to idle.
pub const COMPLETE_HOLD: Duration = Duration::from_secs(5);

/// Signal stability is counted in tenths of a second, one tenth per tick with a good signal.
pub const STABLE_TENTHS_CAP: u16 = 100;

/// Seconds of stable signal before the stability timer reads "Ready".
pub const STABILITY_REQUIRED_SECS: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSession {
    pub start_value: f32,
    pub target_value: u8,
    pub started_at: Duration,
    pub progress: f32, // [0, 100]
}

impl MeasurementSession {
    pub fn new(start_value: f32, target_value: u8, started_at: Duration) -> Self {
        MeasurementSession {
            start_value,
            target_value,
            started_at,
            progress: 0.0,
        }
    }

    pub fn progress_at(&self, at: Duration) -> f32 {
        let elapsed = at.saturating_sub(self.started_at);
        let progress = elapsed.as_secs_f32() / MEASUREMENT_DURATION.as_secs_f32() * 100.0;
        progress.min(100.0)
    }

    /// Linear interpolation between the start and target value, `progress` in [0, 100].
    pub fn interpolate(&self, progress: f32) -> f32 {
        let target = f32::from(self.target_value);
        self.start_value + (target - self.start_value) * (progress / 100.0)
    }

    /// Advances the session to `at`. Returns true once the session is finished.
    pub fn step(&mut self, at: Duration) -> bool {
        // never move backwards, even if a timer fires out of order
        self.progress = self.progress_at(at).max(self.progress);
        self.progress >= 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Measuring(MeasurementSession),
    Complete { until: Duration },
}

impl Phase {
    pub fn is_measuring(&self) -> bool {
        matches!(self, Phase::Measuring(_))
    }
}

pub fn stability_remaining(stable_seconds: f32) -> f32 {
    (STABILITY_REQUIRED_SECS - stable_seconds).max(0.0)
}

pub fn stability_percent(stable_seconds: f32) -> f32 {
    (stable_seconds / STABILITY_REQUIRED_SECS * 100.0).round().min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_follows_elapsed_time() {
        let session = MeasurementSession::new(95.0, 98, Duration::from_secs(10));

        assert_eq!(session.progress_at(Duration::from_secs(10)), 0.0);
        assert_eq!(session.progress_at(Duration::from_secs(13)), 50.0);
        assert_eq!(session.progress_at(Duration::from_secs(16)), 100.0);
        assert_eq!(session.progress_at(Duration::from_secs(60)), 100.0);
        // a timestamp before the session started counts as no progress
        assert_eq!(session.progress_at(Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn interpolates_between_start_and_target() {
        let session = MeasurementSession::new(90.0, 98, Duration::ZERO);

        assert_eq!(session.interpolate(0.0), 90.0);
        assert_eq!(session.interpolate(50.0), 94.0);
        assert_eq!(session.interpolate(100.0), 98.0);
    }

    #[test]
    fn step_never_decreases_progress() {
        let mut session = MeasurementSession::new(97.0, 97, Duration::ZERO);

        assert!(!session.step(Duration::from_millis(3000)));
        assert!(!session.step(Duration::from_millis(1000)));
        assert_eq!(session.progress, 50.0);

        assert!(session.step(Duration::from_millis(6000)));
        assert_eq!(session.progress, 100.0);
    }

    #[test]
    fn stability_timer() {
        assert_eq!(stability_remaining(0.0), 2.0);
        assert_eq!(stability_remaining(5.0), 0.0);
        assert_eq!(stability_percent(1.0), 50.0);
        assert_eq!(stability_percent(10.0), 100.0);
    }
}
