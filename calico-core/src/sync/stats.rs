//! Pacing statistics

use std::time::Instant;

use tracing::debug;

/// Session counters with rate-limited reporting
///
/// Tracks the running frame rate since session start and the audio skew in
/// wall-clock terms. Logged at most once per second so the frame callback
/// stays cheap.
#[derive(Debug, Clone)]
pub struct PacerStats {
    started: Instant,
    last_log: Instant,
    frames: u64,
    underruns: u64,
}

impl PacerStats {
    pub fn new(start: Instant) -> Self {
        Self {
            started: start,
            last_log: start,
            frames: 0,
            underruns: 0,
        }
    }

    /// Record executed simulation steps
    pub fn record_steps(&mut self, steps: u64) {
        self.frames += steps;
    }

    /// Record a reported underrun
    pub fn record_underrun(&mut self) {
        self.underruns += 1;
    }

    /// Total simulation steps executed
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Total underruns reported by the device context
    pub fn underruns(&self) -> u64 {
        self.underruns
    }

    /// Log frame rate and audio skew, at most once per second
    pub fn maybe_log(&mut self, now: Instant, skew: i64, sample_rate: u32) {
        if now.duration_since(self.last_log).as_secs() < 1 {
            return;
        }
        let elapsed = now.duration_since(self.started).as_secs_f64();
        if elapsed > 0.0 {
            let fps = self.frames as f64 / elapsed;
            let skew_ms = skew as f64 * 1000.0 / sample_rate as f64;
            debug!(
                "pacing: {fps:.1} frames per second, {skew_ms:+.0} ms audio skew, {} underruns",
                self.underruns
            );
        }
        self.last_log = now;
    }
}
