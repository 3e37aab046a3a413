//! Device-context adapter
//!
//! The only code in this crate that runs on the real-time audio thread. It
//! must complete within the device's callback deadline: no locks, no
//! allocation beyond the received chunks, no panics.

use tracing::error;

use super::config::SyncConfig;
use super::link::DeviceLink;
use super::queue::SampleQueue;

/// Consumer-context glue between the link and the sample queue
///
/// Owned by the device callback. Each invocation first absorbs every chunk
/// the pacer sent since the previous callback, then serves the device's
/// request and reports the resulting skew or underrun.
pub struct DeviceAdapter {
    queue: SampleQueue,
    link: DeviceLink,
}

impl DeviceAdapter {
    /// Create an adapter with a queue sized from the configuration
    pub fn new(link: DeviceLink, config: &SyncConfig) -> Self {
        Self {
            queue: SampleQueue::new(config.capacity, config.target_depth),
            link,
        }
    }

    /// Serve one device callback
    pub fn fill(&mut self, out: &mut [f32]) {
        while let Some(chunk) = self.link.try_recv_chunk() {
            // After an overflow the session is going down; keep the channel
            // drained but stop feeding the queue.
            if self.link.overflowed() {
                continue;
            }
            if let Err(err) = self.queue.push(&chunk) {
                error!("{err}");
                self.link.mark_overflowed();
            }
        }

        let feedback = self.queue.drain(out);
        self.link.send_feedback(feedback);
    }

    /// Access the underlying queue
    pub fn queue(&self) -> &SampleQueue {
        &self.queue
    }
}
