// src/waker.rs
//! EventLoopWaker - Cross-thread signaling to wake a window's blocking event wait.
//!
//! `Window::next_event` blocks inside the native event wait. Other threads hand
//! it work through an [`EventSender`]: the payload goes into a channel and the
//! waker pushes a native user event so the wait returns and drains it.

use crate::error::ScreenError;
use anyhow::Result;
use log::trace;
use std::any::Any;
use std::sync::mpsc;
use std::sync::Arc;

/// Trait for waking the window event loop from other threads.
///
/// Implementations post an event to the native event queue to interrupt the
/// blocking wait.
pub trait EventLoopWaker: Send + Sync {
    /// Wake the event loop, causing it to return from its blocking wait.
    fn wake(&self) -> Result<()>;
}

pub(crate) type Payload = Box<dyn Any + Send>;

/// Cloneable, thread-safe handle for injecting application events into a window.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Payload>,
    waker: Arc<dyn EventLoopWaker>,
}

impl EventSender {
    pub(crate) fn new(tx: mpsc::Sender<Payload>, waker: Arc<dyn EventLoopWaker>) -> Self {
        Self { tx, waker }
    }

    /// Queues `payload` and wakes the window. It surfaces from `next_event` as
    /// `Event::Custom`, in queue order.
    pub fn send<T: Any + Send>(&self, payload: T) -> Result<(), ScreenError> {
        self.tx
            .send(Box::new(payload))
            .map_err(|_| ScreenError::Platform("window event queue closed".to_string()))?;
        trace!("EventSender: payload queued, waking window");
        self.waker.wake().map_err(ScreenError::platform)
    }
}

impl std::fmt::Debug for EventSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSender").finish_non_exhaustive()
    }
}
