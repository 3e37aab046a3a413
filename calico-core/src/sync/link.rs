//! Message link between the pacer and the device context
//!
//! Two ordered FIFO channels: owned sample chunks flow producer to consumer,
//! skew/underrun feedback flows back. Neither direction ever blocks; the
//! device callback and the frame callback both have hard time budgets.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

/// Feedback from the device context
///
/// Advisory only: pacing stays live even if feedback is delayed or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Signed deviation of queue occupancy from the target depth after a
    /// successful drain. Negative means the queue is running low.
    Skew(i64),
    /// A drain starved. The payload is `available - requested`, non-positive.
    Underrun(i64),
}

/// Flags shared between both link ends
#[derive(Debug, Default)]
struct Shared {
    /// Device is actively consuming samples
    running: AtomicBool,
    /// The queue rejected a push; the session is beyond recovery
    overflowed: AtomicBool,
}

/// Producer-context end of the link, owned by the pacer
pub struct PacerLink {
    chunks: Sender<Box<[f32]>>,
    feedback: Receiver<Feedback>,
    shared: Arc<Shared>,
}

/// Consumer-context end of the link, owned by the device adapter
pub struct DeviceLink {
    chunks: Receiver<Box<[f32]>>,
    feedback: Sender<Feedback>,
    shared: Arc<Shared>,
}

/// Host-side handle to the shared flags
///
/// Lets the audio host flip the running flag from outside the device
/// callback (the `DeviceLink` itself moves into the callback).
#[derive(Clone)]
pub struct DeviceControls {
    shared: Arc<Shared>,
}

/// Create a connected link pair
pub fn audio_link() -> (PacerLink, DeviceLink) {
    let (chunk_tx, chunk_rx) = mpsc::channel();
    let (feedback_tx, feedback_rx) = mpsc::channel();
    let shared = Arc::new(Shared::default());

    (
        PacerLink {
            chunks: chunk_tx,
            feedback: feedback_rx,
            shared: shared.clone(),
        },
        DeviceLink {
            chunks: chunk_rx,
            feedback: feedback_tx,
            shared,
        },
    )
}

impl PacerLink {
    /// Send one chunk to the device context
    ///
    /// Ownership moves with the message; the pacer keeps no alias into the
    /// chunk after sending.
    pub fn send_chunk(&self, chunk: Box<[f32]>) {
        if self.chunks.send(chunk).is_err() {
            debug!("device link disconnected; dropping chunk");
        }
    }

    /// Receive the next pending feedback message, if any
    pub fn try_recv_feedback(&self) -> Option<Feedback> {
        self.feedback.try_recv().ok()
    }

    /// Whether the device is actively consuming samples
    pub fn device_running(&self) -> bool {
        self.shared.running.load(Ordering::Relaxed)
    }

    /// Whether the device context reported a queue overflow
    pub fn overflowed(&self) -> bool {
        self.shared.overflowed.load(Ordering::Relaxed)
    }
}

impl DeviceLink {
    /// Receive the next pending chunk, if any
    pub fn try_recv_chunk(&self) -> Option<Box<[f32]>> {
        self.chunks.try_recv().ok()
    }

    /// Report drain feedback to the pacer
    pub fn send_feedback(&self, feedback: Feedback) {
        if self.feedback.send(feedback).is_err() {
            debug!("pacer link disconnected; dropping feedback");
        }
    }

    /// Flag the session as irrecoverably overflowed
    pub fn mark_overflowed(&self) {
        self.shared.overflowed.store(true, Ordering::Relaxed);
    }

    /// Whether the overflow flag is already set
    pub fn overflowed(&self) -> bool {
        self.shared.overflowed.load(Ordering::Relaxed)
    }

    /// Get a host-side handle to the shared flags
    pub fn controls(&self) -> DeviceControls {
        DeviceControls {
            shared: self.shared.clone(),
        }
    }
}

impl DeviceControls {
    /// Set whether the device is actively consuming samples
    ///
    /// While the flag is clear the pacer suspends audio production; queued
    /// samples stay put until the device resumes.
    pub fn set_running(&self, running: bool) {
        self.shared.running.store(running, Ordering::Relaxed);
    }

    /// Whether the device is actively consuming samples
    pub fn running(&self) -> bool {
        self.shared.running.load(Ordering::Relaxed)
    }

    /// Whether the device context reported a queue overflow
    pub fn overflowed(&self) -> bool {
        self.shared.overflowed.load(Ordering::Relaxed)
    }
}
