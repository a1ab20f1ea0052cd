//! # Aspect Core
//!
//! Aspect-ratio viewport classification with debounced resize tracking.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 aspect-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Classifier      │  Watcher                 │
//! │  - Breakpoints   │  - Resize subscription   │
//! │  - First match   │  - Trailing debounce     │
//! │  - Predicates    │  - Change callbacks      │
//! ├─────────────────────────────────────────────┤
//! │  Sources         │  Config                  │
//! │  - Emitter       │  - JSON tables           │
//! │  - Dimensions    │  - Debounce clamping     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use aspect_core::{AspectClassifier, Dimensions};
//!
//! let classifier = AspectClassifier::default();
//! let state = classifier.state_for(Dimensions::new(1920, 1080));
//! assert_eq!(state.breakpoint, "wide");
//! assert!(state.is_desktop());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod breakpoint;
pub mod classifier;
pub mod config;
pub mod debounce;
pub mod error;
pub mod source;
pub mod viewport;
pub mod watcher;

pub use breakpoint::{
    default_breakpoints, Breakpoint, FALLBACK_BREAKPOINT, TALL_MAX_RATIO, ULTRA_WIDE_MIN_RATIO,
    WIDE_MIN_RATIO,
};
pub use classifier::AspectClassifier;
pub use config::{ClassifierConfig, DEFAULT_DEBOUNCE_MS};
pub use debounce::PendingSlot;
pub use error::{AspectError, AspectResult};
pub use source::{ViewportEmitter, ViewportSource, RESIZE_CHANNEL_CAPACITY};
pub use viewport::{Dimensions, Orientation, ViewportState, MOBILE_MAX_WIDTH};
pub use watcher::{
    AspectRatioWatcher, BreakpointCallback, OrientationCallback, RatioCallback, WatcherOptions,
};

/// Aspect core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
