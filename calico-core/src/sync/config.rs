//! Pacing configuration

use std::time::Duration;

use crate::machine::MachineSpecs;

/// Pacing configuration
///
/// `target_depth` doubles as the high watermark: the pacer stops producing
/// steady-state chunks once the queue sits that far ahead of the device.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Target simulation frame rate in Hz
    pub frame_rate: u32,
    /// Device output sample rate in Hz
    pub sample_rate: u32,
    /// Steady-state buffered sample count the pacer aims to hold
    pub target_depth: usize,
    /// Sample queue capacity in samples
    pub capacity: usize,
}

impl SyncConfig {
    /// Derive a configuration from a machine's specs
    ///
    /// Targets three frames of buffered audio with one second of headroom.
    pub fn for_machine(specs: &MachineSpecs) -> Self {
        Self {
            frame_rate: specs.frame_rate,
            sample_rate: specs.sample_rate,
            target_depth: 3 * specs.samples_per_frame(),
            capacity: specs.sample_rate as usize,
        }
    }

    /// Target wall-clock duration of one simulation frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate as f64)
    }

    /// Audio samples produced per simulation frame
    pub fn samples_per_frame(&self) -> usize {
        (self.sample_rate / self.frame_rate) as usize
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            sample_rate: 48_000,
            target_depth: 2_400,
            capacity: 48_000,
        }
    }
}
