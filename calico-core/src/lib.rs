//! Calico Core - machine pacing runtime
//!
//! This crate keeps a fixed-frame-rate machine core in lockstep with a
//! real-time audio device. The machine produces one video frame and one
//! fixed-length audio chunk per step; the device consumes samples at its own
//! clock. The two clocks drift, so the pacer reconciles them through a skew
//! feedback loop instead of letting either side block.
//!
//! # Architecture
//!
//! - [`Machine`] - Trait implemented by each machine core (step / audio / video)
//! - [`Pacer`] - Frame-callback driver with fixed timestep and audio catch-up
//! - [`SampleQueue`] - Real-time sample buffer with last-sample hold on underrun
//! - [`DeviceAdapter`] - Consumer-context glue run inside the device callback
//! - [`audio_link`] - Chunk and feedback channels between the two contexts

pub mod error;
pub mod machine;
pub mod sync;
#[cfg(test)]
pub mod test_utils;

// Re-export core traits and types
pub use error::SyncError;
pub use machine::{Machine, MachineFault, MachineSpecs, Presenter};
pub use sync::{
    DeviceAdapter, DeviceControls, DeviceLink, Feedback, Pacer, PacerLink, PacerStats, SampleQueue,
    SyncConfig, Tick, audio_link,
};
