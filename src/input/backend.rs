//! Input backend abstraction
//!
//! A backend owns the OS-level hooks and feeds display symbols into the
//! shared queue. evdev is the only implementation; the seam exists so
//! another hook mechanism could slot in without touching the pipeline.

use anyhow::Result;
use std::thread::JoinHandle;

use crate::queue::InputQueue;

/// Input listening backend
pub trait InputBackend: Sized {
    /// Spawn the backend's listener threads.
    ///
    /// Each thread normalizes raw input and pushes symbols into `queue`.
    /// The threads are detached workers: a failing listener logs and exits
    /// without tearing down the process, and the returned handles are only
    /// kept so they are not dropped silently.
    fn spawn(queue: InputQueue) -> Result<Vec<JoinHandle<()>>>;

    /// Check if this backend is usable on the current system
    fn is_available() -> bool;

    /// Human-readable backend name
    fn name() -> &'static str;
}
