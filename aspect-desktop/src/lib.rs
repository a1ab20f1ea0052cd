//! # Aspect Desktop
//!
//! Native desktop host for the aspect-ratio classifier using winit.
//!
//! Opens a window, forwards its resize events to an
//! [`aspect_core::ViewportEmitter`] and shows the settled classification
//! in the window title.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p aspect-desktop
//! ```
//!
//! ## With a custom breakpoint table:
//!
//! ```bash
//! cargo run -p aspect-desktop -- --breakpoints breakpoints.json --debounce-ms 250
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `DesktopConfig` - Window size, title and classifier overrides
//! - `AspectDesktopApp` - Main application implementing `ApplicationHandler`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod app;

pub use app::{AspectDesktopApp, ViewportEvent};

use std::path::PathBuf;

use aspect_core::{AspectResult, ClassifierConfig};
use clap::Parser;

/// Command-line arguments for aspect-desktop.
#[derive(Debug, Clone, Parser)]
#[command(name = "aspect-desktop")]
#[command(about = "Live aspect-ratio classification of a desktop window")]
#[command(version)]
pub struct CliArgs {
    /// JSON file with a custom breakpoint table
    #[arg(long, env = "ASPECT_BREAKPOINTS")]
    pub breakpoints: Option<PathBuf>,

    /// Resize debounce in milliseconds (negative disables debouncing)
    #[arg(long, env = "ASPECT_DEBOUNCE_MS", allow_negative_numbers = true)]
    pub debounce_ms: Option<i64>,

    /// Print the effective classifier config as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Window width in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "720")]
    pub height: u32,
}

/// Desktop application configuration.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Window title prefix.
    pub title: String,
    /// Custom breakpoint table file.
    pub breakpoints: Option<PathBuf>,
    /// Debounce override in milliseconds.
    pub debounce_ms: Option<i64>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopConfig {
    /// Create a new desktop configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Aspect".to_string(),
            breakpoints: None,
            debounce_ms: None,
        }
    }

    /// Build the classifier config: file table (or defaults), then overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the breakpoint file cannot be read or parsed.
    pub fn classifier_config(&self) -> AspectResult<ClassifierConfig> {
        let mut config = match &self.breakpoints {
            Some(path) => ClassifierConfig::from_json_file(path)?,
            None => ClassifierConfig::default(),
        };
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        Ok(config)
    }
}

impl From<CliArgs> for DesktopConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            width: args.width,
            height: args.height,
            title: "Aspect".to_string(),
            breakpoints: args.breakpoints,
            debounce_ms: args.debounce_ms,
        }
    }
}
