//! Viewport size sources.
//!
//! A source answers "how big is the viewport now" synchronously and hands
//! out resize subscriptions. Dropping the receiver unsubscribes.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::Dimensions;

/// Capacity of the resize broadcast channel.
///
/// A subscriber that falls further behind than this skips the oldest
/// resizes and resumes from the newest ones retained.
pub const RESIZE_CHANNEL_CAPACITY: usize = 64;

/// Something that reports viewport dimensions and resize notifications.
pub trait ViewportSource: Send + Sync {
    /// Current viewport size.
    fn dimensions(&self) -> Dimensions;

    /// Subscribe to resize notifications.
    fn subscribe(&self) -> broadcast::Receiver<Dimensions>;
}

/// In-memory viewport that broadcasts resizes to its subscribers.
///
/// Hosts call [`ViewportEmitter::resize`] from their platform resize hook.
#[derive(Debug, Clone)]
pub struct ViewportEmitter {
    current: Arc<RwLock<Dimensions>>,
    resize_tx: broadcast::Sender<Dimensions>,
}

impl ViewportEmitter {
    /// Create an emitter with the given initial size.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        let (resize_tx, _) = broadcast::channel(RESIZE_CHANNEL_CAPACITY);
        Self {
            current: Arc::new(RwLock::new(dimensions)),
            resize_tx,
        }
    }

    /// Record a new size and notify subscribers.
    ///
    /// Zero-sized resizes (minimised windows) are ignored. Returns whether
    /// the resize was accepted.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        let dimensions = Dimensions::new(width, height);
        if dimensions.is_empty() {
            tracing::debug!("Ignoring zero-sized resize {width}x{height}");
            return false;
        }

        match self.current.write() {
            Ok(mut current) => *current = dimensions,
            Err(poisoned) => *poisoned.into_inner() = dimensions,
        }

        // No subscribers is fine; the size is still recorded
        let _ = self.resize_tx.send(dimensions);
        true
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.resize_tx.receiver_count()
    }
}

impl ViewportSource for ViewportEmitter {
    fn dimensions(&self) -> Dimensions {
        match self.current.read() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<Dimensions> {
        self.resize_tx.subscribe()
    }
}

impl<S: ViewportSource + ?Sized> ViewportSource for Arc<S> {
    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }

    fn subscribe(&self) -> broadcast::Receiver<Dimensions> {
        (**self).subscribe()
    }
}
