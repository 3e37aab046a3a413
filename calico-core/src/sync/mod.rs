//! Audio/video clock reconciliation
//!
//! Two execution contexts cooperate without sharing mutable state:
//!
//! ```text
//! Producer (frame callback)                 Consumer (device callback)
//!     │                                           │
//! [Pacer::tick]                                   │
//!     │ step machine, copy chunk                  │
//!     ├──────────(chunk channel)─────────►[DeviceAdapter::fill]
//!     │                                    [SampleQueue push/drain]
//!     ◄──────────(feedback channel)────────┤ skew / underrun
//!     │ adjust catch-up next tick                 │
//! ```
//!
//! The pacer owns the skew estimate and updates it two ways: optimistically
//! while running catch-up steps, and authoritatively from each received
//! `Skew` feedback message. Feedback may lag by a callback or more; the
//! latest received value always wins.

mod config;
mod device;
mod link;
mod pacer;
mod queue;
mod stats;


pub use config::SyncConfig;
pub use device::DeviceAdapter;
pub use link::{DeviceControls, DeviceLink, Feedback, PacerLink, audio_link};
pub use pacer::{Pacer, Tick};
pub use queue::SampleQueue;
pub use stats::PacerStats;
