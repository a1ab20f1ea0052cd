//! Live viewport classification driven by resize notifications.
//!
//! Each [`AspectRatioWatcher`] owns one background task, one resize
//! subscription and one debounce slot. Watchers never share state.
//!
//! ```text
//! resize ──▶ PendingSlot ──(debounce elapsed)──▶ recompute
//!                                                  │
//!                      watch::Sender<ViewportState> ◀┘──▶ callbacks
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::debounce::PendingSlot;
use crate::source::ViewportSource;
use crate::{
    AspectClassifier, AspectResult, Breakpoint, ClassifierConfig, Dimensions, Orientation,
    ViewportState,
};

/// Called with the new breakpoint name.
pub type BreakpointCallback = Arc<dyn Fn(&str) + Send + Sync>;
/// Called with the new orientation.
pub type OrientationCallback = Arc<dyn Fn(Orientation) + Send + Sync>;
/// Called with every recomputed ratio.
pub type RatioCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Configuration and change callbacks for a watcher.
#[derive(Clone, Default)]
pub struct WatcherOptions {
    /// Breakpoint table and debounce.
    pub config: ClassifierConfig,
    on_breakpoint_change: Option<BreakpointCallback>,
    on_orientation_change: Option<OrientationCallback>,
    on_ratio_change: Option<RatioCallback>,
}

impl WatcherOptions {
    /// Options with the given classifier configuration and no callbacks.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Invoke `f` whenever the matched breakpoint changes.
    #[must_use]
    pub fn on_breakpoint_change(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_breakpoint_change = Some(Arc::new(f));
        self
    }

    /// Invoke `f` whenever the orientation changes.
    #[must_use]
    pub fn on_orientation_change(
        mut self,
        f: impl Fn(Orientation) + Send + Sync + 'static,
    ) -> Self {
        self.on_orientation_change = Some(Arc::new(f));
        self
    }

    /// Invoke `f` after every settled recomputation, changed or not.
    #[must_use]
    pub fn on_ratio_change(mut self, f: impl Fn(f64) + Send + Sync + 'static) -> Self {
        self.on_ratio_change = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for WatcherOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherOptions")
            .field("config", &self.config)
            .field("on_breakpoint_change", &self.on_breakpoint_change.is_some())
            .field("on_orientation_change", &self.on_orientation_change.is_some())
            .field("on_ratio_change", &self.on_ratio_change.is_some())
            .finish()
    }
}

/// Keeps a [`ViewportState`] in sync with a [`ViewportSource`].
///
/// Dropping the watcher closes it and aborts the background task: the
/// pending debounce is discarded, the resize subscription is released and
/// no callback starts after `drop` returns. A callback already running on
/// another worker thread finishes, but nothing after it in the same
/// recomputation fires. Use [`AspectRatioWatcher::shutdown`] to also wait
/// for the task to finish.
pub struct AspectRatioWatcher {
    classifier: Arc<AspectClassifier>,
    debounce: Duration,
    state_rx: watch::Receiver<ViewportState>,
    closed: Arc<AtomicBool>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl AspectRatioWatcher {
    /// Classify the source's current size and start tracking resizes.
    ///
    /// The initial state is available as soon as this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn<S: ViewportSource + ?Sized>(source: &S, options: WatcherOptions) -> Self {
        // Subscribe before reading so no resize slips between the two
        let resize_rx = source.subscribe();
        let dimensions = source.dimensions();

        let WatcherOptions {
            config,
            on_breakpoint_change,
            on_orientation_change,
            on_ratio_change,
        } = options;
        let debounce = config.debounce();
        let classifier = Arc::new(AspectClassifier::new(config.breakpoints));

        let initial = classifier.state_for(dimensions);
        tracing::debug!(
            "Watching viewport {}x{} ({}, debounce {:?})",
            initial.width,
            initial.height,
            initial.breakpoint,
            debounce
        );

        let (state_tx, state_rx) = watch::channel(initial);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let closed = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            classifier: Arc::clone(&classifier),
            debounce,
            closed: Arc::clone(&closed),
            state_tx,
            on_breakpoint_change,
            on_orientation_change,
            on_ratio_change,
        };
        let task = tokio::spawn(worker.run(resize_rx, shutdown_rx));

        Self {
            classifier,
            debounce,
            state_rx,
            closed,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Stop tracking and wait for the background task to exit.
    pub async fn shutdown(mut self) {
        self.closed.store(true, Ordering::SeqCst);
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    tracing::warn!("Viewport watcher task panicked: {e}");
                }
            }
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state_rx.borrow().clone()
    }

    /// Receiver that observes every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewportState> {
        self.state_rx.clone()
    }

    /// Current breakpoint name.
    #[must_use]
    pub fn breakpoint(&self) -> String {
        self.state_rx.borrow().breakpoint.clone()
    }

    /// Current width / height ratio.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.state_rx.borrow().ratio
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.state_rx.borrow().orientation
    }

    /// Effective debounce after clamping.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        self.debounce
    }

    /// The classifier this watcher matches with.
    #[must_use]
    pub fn classifier(&self) -> &AspectClassifier {
        &self.classifier
    }

    /// See [`ViewportState::is_wide`].
    #[must_use]
    pub fn is_wide(&self) -> bool {
        self.state_rx.borrow().is_wide()
    }

    /// See [`ViewportState::is_ultra_wide`].
    #[must_use]
    pub fn is_ultra_wide(&self) -> bool {
        self.state_rx.borrow().is_ultra_wide()
    }

    /// See [`ViewportState::is_tall`].
    #[must_use]
    pub fn is_tall(&self) -> bool {
        self.state_rx.borrow().is_tall()
    }

    /// See [`ViewportState::is_square`].
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.state_rx.borrow().is_square()
    }

    /// See [`ViewportState::is_mobile`].
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.state_rx.borrow().is_mobile()
    }

    /// See [`ViewportState::is_tablet`].
    #[must_use]
    pub fn is_tablet(&self) -> bool {
        self.state_rx.borrow().is_tablet()
    }

    /// See [`ViewportState::is_desktop`].
    #[must_use]
    pub fn is_desktop(&self) -> bool {
        self.state_rx.borrow().is_desktop()
    }

    /// Whether the current breakpoint is exactly `name`.
    #[must_use]
    pub fn is_breakpoint(&self, name: &str) -> bool {
        self.classifier.is_breakpoint(&self.state_rx.borrow(), name)
    }

    /// Whether the current breakpoint is `name` or declared after it.
    #[must_use]
    pub fn is_breakpoint_or_larger(&self, name: &str) -> bool {
        self.classifier
            .is_breakpoint_or_larger(&self.state_rx.borrow(), name)
    }

    /// Whether the current breakpoint is `name` or declared before it.
    #[must_use]
    pub fn is_breakpoint_or_smaller(&self, name: &str) -> bool {
        self.classifier
            .is_breakpoint_or_smaller(&self.state_rx.borrow(), name)
    }

    /// Look up a breakpoint record by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no entry with that name.
    pub fn breakpoint_info(&self, name: &str) -> AspectResult<&Breakpoint> {
        self.classifier.breakpoint_info(name)
    }
}

impl Drop for AspectRatioWatcher {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl fmt::Debug for AspectRatioWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AspectRatioWatcher")
            .field("state", &*self.state_rx.borrow())
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

/// Background half of a watcher.
struct Worker {
    classifier: Arc<AspectClassifier>,
    debounce: Duration,
    /// Set when the owning watcher is dropped or shut down.
    closed: Arc<AtomicBool>,
    state_tx: watch::Sender<ViewportState>,
    on_breakpoint_change: Option<BreakpointCallback>,
    on_orientation_change: Option<OrientationCallback>,
    on_ratio_change: Option<RatioCallback>,
}

impl Worker {
    async fn run(
        self,
        mut resize_rx: broadcast::Receiver<Dimensions>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        let mut pending = PendingSlot::new();
        let mut source_open = true;

        loop {
            // Source gone and nothing left to flush
            if !source_open && !pending.is_pending() {
                break;
            }

            let deadline = pending.deadline();
            tokio::select! {
                biased;

                // Fires on explicit shutdown and when the watcher is dropped
                _ = &mut shutdown_rx => break,

                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(dimensions) = pending.take_due(Instant::now()) {
                        self.apply(dimensions);
                    }
                }

                event = resize_rx.recv(), if source_open => match event {
                    Ok(dimensions) if self.debounce.is_zero() => self.apply(dimensions),
                    Ok(dimensions) => {
                        if pending.schedule(dimensions, Instant::now(), self.debounce) {
                            tracing::trace!("Resize superseded pending recompute");
                        }
                    }
                    // The newest events are retained, so the final size is
                    // still applied; only the oldest skipped ones are lost.
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Viewport watcher lagged, skipped {skipped} resize events");
                    }
                    Err(RecvError::Closed) => {
                        tracing::debug!("Viewport source closed");
                        source_open = false;
                    }
                },
            }
        }

        pending.clear();
        tracing::debug!("Viewport watcher stopped");
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Recompute, publish, then notify: ratio, orientation, breakpoint.
    ///
    /// The closed flag is rechecked before every callback so a teardown
    /// that lands mid-recomputation suppresses the rest.
    fn apply(&self, dimensions: Dimensions) {
        if self.is_closed() {
            return;
        }
        let next = self.classifier.state_for(dimensions);
        tracing::debug!(
            "Viewport {}x{} ratio {:.3} -> {} ({})",
            next.width,
            next.height,
            next.ratio,
            next.breakpoint,
            next.orientation
        );

        let previous = self.state_tx.send_replace(next.clone());

        if let Some(cb) = &self.on_ratio_change {
            if self.is_closed() {
                return;
            }
            cb(next.ratio);
        }
        if next.orientation != previous.orientation {
            if let Some(cb) = &self.on_orientation_change {
                if self.is_closed() {
                    return;
                }
                cb(next.orientation);
            }
        }
        if next.breakpoint != previous.breakpoint {
            tracing::info!(
                "Breakpoint changed: {} -> {}",
                previous.breakpoint,
                next.breakpoint
            );
            if let Some(cb) = &self.on_breakpoint_change {
                if self.is_closed() {
                    return;
                }
                cb(&next.breakpoint);
            }
        }
    }
}
