//! Simulation pacing and clock reconciliation
//!
//! The pacer runs in the frame-callback context. Each tick it decides how
//! many machine steps the wall clock and the audio queue demand, forwards
//! the resulting audio to the device context and hands the framebuffer to
//! the presenter. The caller re-arms it unconditionally; the pacer never
//! stops on its own.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::SyncError;
use crate::machine::{Machine, Presenter};

use super::config::SyncConfig;
use super::link::{Feedback, PacerLink};
use super::stats::PacerStats;

/// Outcome of one pacer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The frame interval has not elapsed; nothing ran
    Idle,
    /// The machine advanced by `steps` frames
    Stepped {
        /// Steps executed this tick (one base step plus any catch-up)
        steps: u32,
    },
}

/// Frame-callback driver reconciling the simulation and device clocks
///
/// Owns the machine, the presenter and the producer end of the link. The
/// skew estimate is single-writer: only this struct mutates it, either
/// optimistically during catch-up or by adopting a received `Skew` message
/// wholesale.
pub struct Pacer<M: Machine, P: Presenter> {
    machine: M,
    presenter: P,
    link: PacerLink,
    frame_interval: Duration,
    sample_rate: u32,
    high_watermark: i64,
    last_tick: Instant,
    skew: i64,
    frame_count: u64,
    stats: PacerStats,
}

impl<M: Machine, P: Presenter> Pacer<M, P> {
    /// Create a pacer; `start` anchors the first frame interval
    pub fn new(machine: M, presenter: P, link: PacerLink, config: &SyncConfig, start: Instant) -> Self {
        Self {
            machine,
            presenter,
            link,
            frame_interval: config.frame_interval(),
            sample_rate: config.sample_rate,
            high_watermark: config.target_depth as i64,
            last_tick: start,
            skew: 0,
            frame_count: 0,
            stats: PacerStats::new(start),
        }
    }

    /// Process one frame callback with timestamp `now`
    ///
    /// Machine faults abort the session; everything else keeps the loop
    /// live. Queue overflow is detected on the device side and surfaced to
    /// the caller through [`Pacer::overflowed`].
    pub fn tick(&mut self, now: Instant) -> Result<Tick, SyncError> {
        // Feedback may lag by a callback or more; adopt the latest skew
        // wholesale, it supersedes any local estimate.
        while let Some(feedback) = self.link.try_recv_feedback() {
            match feedback {
                Feedback::Skew(value) => self.skew = value,
                Feedback::Underrun(deficit) => {
                    self.stats.record_underrun();
                    warn!("audio underrun: {deficit} samples short");
                }
            }
        }

        let elapsed = now.duration_since(self.last_tick);
        if elapsed < self.frame_interval {
            return Ok(Tick::Idle);
        }

        // Absorb the fractional remainder so timing error cannot accumulate
        // across ticks. Only one base step runs; audio catch-up below covers
        // any backlog that matters.
        self.last_tick = now - remainder(elapsed, self.frame_interval);

        self.machine.step()?;
        self.frame_count += 1;
        let mut steps = 1u32;

        // One frame of audio may be smaller than the deficit; refill the
        // queue within this tick instead of waiting out several more.
        while self.skew < 0 && self.link.device_running() {
            let produced = self.send_chunk();
            self.machine.step()?;
            self.skew += produced as i64;
            self.frame_count += 1;
            steps += 1;
        }

        self.presenter.present(self.machine.video());

        // Steady state: one chunk per tick holds the queue at target depth.
        if self.skew < self.high_watermark && self.link.device_running() {
            self.send_chunk();
        }

        self.stats.record_steps(steps as u64);
        self.stats.maybe_log(now, self.skew, self.sample_rate);

        Ok(Tick::Stepped { steps })
    }

    /// Whether the device context reported a fatal queue overflow
    pub fn overflowed(&self) -> bool {
        self.link.overflowed()
    }

    /// Current skew estimate in samples
    pub fn skew(&self) -> i64 {
        self.skew
    }

    /// Total simulation steps executed
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Timestamp of the last processed frame boundary
    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Session statistics
    pub fn stats(&self) -> &PacerStats {
        &self.stats
    }

    /// Get a reference to the machine
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Get a reference to the presenter
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Copy the machine's latest chunk to the device context
    ///
    /// The copy is owned by the message; the machine's buffer is free to be
    /// overwritten by the next step.
    fn send_chunk(&self) -> usize {
        let chunk: Box<[f32]> = self.machine.audio().into();
        let produced = chunk.len();
        self.link.send_chunk(chunk);
        produced
    }
}

fn remainder(elapsed: Duration, interval: Duration) -> Duration {
    Duration::from_nanos((elapsed.as_nanos() % interval.as_nanos()) as u64)
}
