//! Error types for the pacing runtime

use thiserror::Error;

use crate::machine::MachineFault;

/// Fatal session errors
///
/// Underrun is deliberately absent: a starved drain is an expected transient
/// condition, reported through [`Feedback`](crate::sync::Feedback) and masked
/// by holding the last sample.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A push would exceed the sample queue's capacity.
    ///
    /// This means the producer has irrecoverably outpaced the device; the
    /// session cannot retry its way out.
    #[error("sample queue overflow: {pushed} samples will not fit ({len} of {capacity} in use)")]
    CapacityOverflow {
        /// Samples in the rejected chunk
        pushed: usize,
        /// Valid samples already queued
        len: usize,
        /// Fixed queue capacity
        capacity: usize,
    },

    /// The machine core failed; the diagnostic comes from the core.
    #[error(transparent)]
    Machine(#[from] MachineFault),
}
