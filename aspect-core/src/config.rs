//! Classifier configuration.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::breakpoint::{default_breakpoints, Breakpoint};
use crate::{AspectError, AspectResult};

/// Default resize debounce in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: i64 = 150;

/// Breakpoint table and resize debounce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Ordered breakpoint table.
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<Breakpoint>,
    /// Resize debounce in milliseconds. Negative values mean no debounce.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: i64,
}

fn default_debounce_ms() -> i64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            breakpoints: default_breakpoints(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ClassifierConfig {
    /// Replace the breakpoint table.
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Vec<Breakpoint>) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Set the debounce in milliseconds.
    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: i64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Debounce as a duration, clamped at zero.
    ///
    /// At zero every delivered resize is recomputed. A burst larger than
    /// [`crate::RESIZE_CHANNEL_CAPACITY`] that arrives before the watcher
    /// runs is coalesced: the oldest resizes are skipped and the newest
    /// ones, including the final size, are still applied.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.debounce_ms).unwrap_or(0))
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a breakpoint name repeats.
    pub fn from_json(json: &str) -> AspectResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> AspectResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AspectError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded classifier config from {}", path.display());
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AspectResult<String> {
        serde_json::to_string_pretty(self).map_err(AspectError::Serialization)
    }

    /// Reject tables with repeated breakpoint names.
    ///
    /// Ranges are not checked: overlapping or inverted entries are legal.
    ///
    /// # Errors
    ///
    /// Returns [`AspectError::DuplicateBreakpoint`] on the first repeat.
    pub fn validate(&self) -> AspectResult<()> {
        let mut seen = HashSet::new();
        for bp in &self.breakpoints {
            if !seen.insert(bp.name.as_str()) {
                return Err(AspectError::DuplicateBreakpoint(bp.name.clone()));
            }
        }
        Ok(())
    }
}
