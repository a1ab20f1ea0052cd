//! Watcher Integration Tests
//!
//! Drives the watcher with a paused Tokio clock to check:
//! - Trailing-edge debounce of resize bursts
//! - Callback ordering (ratio, orientation, breakpoint)
//! - Zero debounce recomputing on every resize
//! - Zero debounce coalescing a burst larger than the channel
//! - Teardown with a pending timer
//! - Teardown while a callback is running on another thread

use aspect_core::{
    AspectRatioWatcher, Breakpoint, ClassifierConfig, Dimensions, Orientation, ViewportEmitter,
    WatcherOptions, RESIZE_CHANNEL_CAPACITY,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Shared log that callbacks append to.
#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, entry: String) {
        self.0.lock().expect("log lock").push(entry);
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().expect("log lock").clone()
    }
}

/// Options that record every callback into `log`.
fn recording_options(config: ClassifierConfig, log: &CallLog) -> WatcherOptions {
    let ratio_log = log.clone();
    let orientation_log = log.clone();
    let breakpoint_log = log.clone();
    WatcherOptions::new(config)
        .on_ratio_change(move |ratio| ratio_log.push(format!("ratio:{ratio:.3}")))
        .on_orientation_change(move |o| orientation_log.push(format!("orientation:{o}")))
        .on_breakpoint_change(move |name| breakpoint_log.push(format!("breakpoint:{name}")))
}

fn breakpoint_changes(log: &CallLog) -> Vec<String> {
    log.entries()
        .into_iter()
        .filter(|e| e.starts_with("breakpoint:"))
        .collect()
}

// ============================================================================
// Debounce
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_resize_burst_fires_breakpoint_change_once() {
    let emitter = ViewportEmitter::new(Dimensions::new(1920, 1080));
    let log = CallLog::default();
    let watcher =
        AspectRatioWatcher::spawn(&emitter, recording_options(ClassifierConfig::default(), &log));
    assert_eq!(watcher.breakpoint(), "wide");

    // Drag through several widths; the last event lands at t=60ms
    for width in [2000, 2200, 2400, 2560] {
        emitter.resize(width, 1080);
        sleep(ms(20)).await;
    }
    assert!(log.entries().is_empty(), "nothing fires mid-drag");

    // t=180ms, still inside the window opened by the last event
    sleep(ms(100)).await;
    assert!(log.entries().is_empty());

    // t=230ms, past the 210ms deadline
    sleep(ms(50)).await;
    assert_eq!(breakpoint_changes(&log), ["breakpoint:ultra-wide"]);
    assert_eq!(watcher.breakpoint(), "ultra-wide");
    assert_eq!(watcher.state().dimensions(), Dimensions::new(2560, 1080));
    assert!(watcher.is_ultra_wide());

    // Exactly one recomputation for the whole burst
    let ratios = log.entries().iter().filter(|e| e.starts_with("ratio:")).count();
    assert_eq!(ratios, 1);
}

#[tokio::test(start_paused = true)]
async fn test_state_unchanged_until_debounce_elapses() {
    let emitter = ViewportEmitter::new(Dimensions::new(1920, 1080));
    let watcher = AspectRatioWatcher::spawn(&emitter, WatcherOptions::default());

    emitter.resize(390, 844);
    sleep(ms(100)).await;
    assert_eq!(watcher.breakpoint(), "wide");

    sleep(ms(100)).await;
    assert_eq!(watcher.breakpoint(), "tall");
    assert_eq!(watcher.orientation(), Orientation::Portrait);
    assert!(watcher.is_mobile());
}

#[tokio::test(start_paused = true)]
async fn test_ratio_fires_even_when_unchanged() {
    let emitter = ViewportEmitter::new(Dimensions::new(1280, 720));
    let log = CallLog::default();
    let _watcher =
        AspectRatioWatcher::spawn(&emitter, recording_options(ClassifierConfig::default(), &log));

    emitter.resize(1280, 720);
    sleep(ms(200)).await;
    emitter.resize(1280, 720);
    sleep(ms(200)).await;

    assert_eq!(log.entries(), ["ratio:1.778", "ratio:1.778"]);
}

#[tokio::test(start_paused = true)]
async fn test_zero_debounce_recomputes_every_resize() {
    let emitter = ViewportEmitter::new(Dimensions::new(800, 600));
    let log = CallLog::default();
    let config = ClassifierConfig::default().with_debounce_ms(-10);
    let _watcher = AspectRatioWatcher::spawn(&emitter, recording_options(config, &log));

    emitter.resize(1000, 1000);
    emitter.resize(1920, 1080);
    emitter.resize(2560, 1080);
    sleep(ms(1)).await;

    assert_eq!(
        breakpoint_changes(&log),
        ["breakpoint:square", "breakpoint:wide", "breakpoint:ultra-wide"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_zero_debounce_overflow_keeps_newest_resizes() {
    let emitter = ViewportEmitter::new(Dimensions::new(1000, 1000));
    let recomputed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&recomputed);
    let options = WatcherOptions::new(ClassifierConfig::default().with_debounce_ms(0))
        .on_ratio_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    let watcher = AspectRatioWatcher::spawn(&emitter, options);

    // All sent before the watcher task gets a chance to run
    for width in 1001..=1100 {
        emitter.resize(width, 1000);
    }
    sleep(ms(10)).await;

    // The oldest overflow is skipped, the retained tail is applied in order
    assert_eq!(recomputed.load(Ordering::SeqCst), RESIZE_CHANNEL_CAPACITY);
    assert_eq!(watcher.state().dimensions(), Dimensions::new(1100, 1000));
    assert_eq!(watcher.breakpoint(), "standard");
}

// ============================================================================
// Callback ordering
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_callback_order_ratio_orientation_breakpoint() {
    let emitter = ViewportEmitter::new(Dimensions::new(1000, 1000));
    let log = CallLog::default();
    let watcher =
        AspectRatioWatcher::spawn(&emitter, recording_options(ClassifierConfig::default(), &log));
    assert_eq!(watcher.breakpoint(), "square");

    emitter.resize(1920, 1080);
    sleep(ms(200)).await;

    assert_eq!(
        log.entries(),
        ["ratio:1.778", "orientation:landscape", "breakpoint:wide"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_orientation_only_change() {
    // 1100x1000 and 1000x1100 are both "standard" but flip orientation
    let emitter = ViewportEmitter::new(Dimensions::new(1100, 1000));
    let log = CallLog::default();
    let _watcher =
        AspectRatioWatcher::spawn(&emitter, recording_options(ClassifierConfig::default(), &log));

    emitter.resize(1000, 1100);
    sleep(ms(200)).await;

    assert_eq!(log.entries(), ["ratio:0.909", "orientation:portrait"]);
}

// ============================================================================
// Custom tables
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_custom_table_classifies_desktop() {
    let table = vec![
        Breakpoint::new("mobile", Some(0.0), Some(0.8)),
        Breakpoint::new("tablet", Some(0.8), Some(1.2)),
        Breakpoint::new("desktop", Some(1.2), None),
    ];
    let emitter = ViewportEmitter::new(Dimensions::new(1024, 768));
    let watcher = AspectRatioWatcher::spawn(
        &emitter,
        WatcherOptions::new(ClassifierConfig::default().with_breakpoints(table)),
    );

    assert_eq!(watcher.breakpoint(), "desktop");
    assert!(watcher.is_breakpoint_or_larger("mobile"));
    assert!(watcher.is_breakpoint_or_larger("tablet"));
    assert!(!watcher.is_breakpoint_or_smaller("tablet"));
}

#[tokio::test(start_paused = true)]
async fn test_empty_table_reports_fallback() {
    let emitter = ViewportEmitter::new(Dimensions::new(1024, 768));
    let watcher = AspectRatioWatcher::spawn(
        &emitter,
        WatcherOptions::new(ClassifierConfig::default().with_breakpoints(Vec::new())),
    );
    assert_eq!(watcher.breakpoint(), aspect_core::FALLBACK_BREAKPOINT);
}

// ============================================================================
// Teardown
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_drop_with_pending_timer_fires_nothing() {
    let emitter = ViewportEmitter::new(Dimensions::new(1920, 1080));
    let log = CallLog::default();
    let watcher =
        AspectRatioWatcher::spawn(&emitter, recording_options(ClassifierConfig::default(), &log));

    emitter.resize(2560, 1080);
    sleep(ms(50)).await;
    drop(watcher);

    sleep(ms(1000)).await;
    assert!(log.entries().is_empty());
    assert_eq!(emitter.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_with_pending_timer_fires_nothing() {
    let emitter = ViewportEmitter::new(Dimensions::new(1920, 1080));
    let log = CallLog::default();
    let watcher =
        AspectRatioWatcher::spawn(&emitter, recording_options(ClassifierConfig::default(), &log));

    emitter.resize(390, 844);
    sleep(ms(10)).await;
    watcher.shutdown().await;
    assert_eq!(emitter.listener_count(), 0);

    emitter.resize(2560, 1080);
    sleep(ms(1000)).await;
    assert!(log.entries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_watchers_are_independent() {
    let emitter = ViewportEmitter::new(Dimensions::new(1920, 1080));
    let fast_log = CallLog::default();
    let slow_log = CallLog::default();
    let fast = AspectRatioWatcher::spawn(
        &emitter,
        recording_options(ClassifierConfig::default().with_debounce_ms(0), &fast_log),
    );
    let slow = AspectRatioWatcher::spawn(
        &emitter,
        recording_options(ClassifierConfig::default().with_debounce_ms(500), &slow_log),
    );
    assert_eq!(emitter.listener_count(), 2);

    emitter.resize(2560, 1080);
    sleep(ms(10)).await;
    assert_eq!(fast.breakpoint(), "ultra-wide");
    assert_eq!(slow.breakpoint(), "wide");

    drop(fast);
    sleep(ms(600)).await;
    assert_eq!(slow.breakpoint(), "ultra-wide");
    assert_eq!(breakpoint_changes(&slow_log), ["breakpoint:ultra-wide"]);
    assert_eq!(emitter.listener_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_source_dropped_flushes_pending_resize() {
    let emitter = ViewportEmitter::new(Dimensions::new(1920, 1080));
    let watcher = AspectRatioWatcher::spawn(&emitter, WatcherOptions::default());
    let mut states = watcher.subscribe();

    emitter.resize(390, 844);
    drop(emitter);

    states.changed().await.expect("state should publish");
    assert_eq!(states.borrow().breakpoint, "tall");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_drop_during_callback_suppresses_remaining_callbacks() {
    let emitter = ViewportEmitter::new(Dimensions::new(1000, 1000));
    let in_ratio_callback = Arc::new(AtomicBool::new(false));
    let later_calls = Arc::new(AtomicUsize::new(0));

    let entered = Arc::clone(&in_ratio_callback);
    let orientation_calls = Arc::clone(&later_calls);
    let breakpoint_calls = Arc::clone(&later_calls);
    let options = WatcherOptions::new(ClassifierConfig::default().with_debounce_ms(0))
        .on_ratio_change(move |_| {
            entered.store(true, Ordering::SeqCst);
            std::thread::sleep(ms(200));
        })
        .on_orientation_change(move |_| {
            orientation_calls.fetch_add(1, Ordering::SeqCst);
        })
        .on_breakpoint_change(move |_| {
            breakpoint_calls.fetch_add(1, Ordering::SeqCst);
        });
    let watcher = AspectRatioWatcher::spawn(&emitter, options);

    // Square -> wide would normally fire orientation and breakpoint too
    emitter.resize(1920, 1080);
    for _ in 0..2000 {
        if in_ratio_callback.load(Ordering::SeqCst) {
            break;
        }
        sleep(ms(1)).await;
    }
    assert!(in_ratio_callback.load(Ordering::SeqCst), "ratio callback should start");

    drop(watcher);
    sleep(ms(400)).await;

    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    assert_eq!(emitter.listener_count(), 0);
}
