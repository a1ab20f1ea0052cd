//! Breakpoint matching and ordinal comparisons.

use crate::breakpoint::{default_breakpoints, Breakpoint, FALLBACK_BREAKPOINT};
use crate::viewport::{Dimensions, ViewportState};
use crate::{AspectError, AspectResult};

/// Classifies aspect ratios against an ordered breakpoint table.
///
/// Entries are checked in declaration order and the first match wins.
/// Overlapping ranges are allowed. When nothing matches, the last entry
/// of the table is reported (or [`FALLBACK_BREAKPOINT`] for an empty table).
#[derive(Debug, Clone, PartialEq)]
pub struct AspectClassifier {
    breakpoints: Vec<Breakpoint>,
}

impl AspectClassifier {
    /// Create a classifier over a custom table.
    #[must_use]
    pub fn new(breakpoints: Vec<Breakpoint>) -> Self {
        Self { breakpoints }
    }

    /// The table in declaration order.
    #[must_use]
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Name of the breakpoint used when nothing matches.
    #[must_use]
    pub fn fallback(&self) -> &str {
        self.breakpoints
            .last()
            .map_or(FALLBACK_BREAKPOINT, |b| b.name.as_str())
    }

    /// Name of the first breakpoint matching `ratio`.
    #[must_use]
    pub fn classify(&self, ratio: f64) -> &str {
        self.breakpoints
            .iter()
            .find(|b| b.matches(ratio))
            .map_or_else(|| self.fallback(), |b| b.name.as_str())
    }

    /// Compute the full state for a viewport size.
    #[must_use]
    pub fn state_for(&self, dimensions: Dimensions) -> ViewportState {
        let ratio = dimensions.ratio();
        ViewportState {
            width: dimensions.width,
            height: dimensions.height,
            ratio,
            orientation: dimensions.orientation(),
            breakpoint: self.classify(ratio).to_string(),
        }
    }

    /// Declaration index of a breakpoint.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.breakpoints.iter().position(|b| b.name == name)
    }

    /// Look up a breakpoint by name.
    ///
    /// # Errors
    ///
    /// Returns [`AspectError::BreakpointNotFound`] if no entry has that name.
    pub fn breakpoint_info(&self, name: &str) -> AspectResult<&Breakpoint> {
        self.breakpoints
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| AspectError::BreakpointNotFound(name.to_string()))
    }

    /// Whether the state is exactly at breakpoint `name`.
    #[must_use]
    pub fn is_breakpoint(&self, state: &ViewportState, name: &str) -> bool {
        state.breakpoint == name
    }

    /// Whether the state is at `name` or declared after it.
    ///
    /// Unknown names on either side compare false.
    #[must_use]
    pub fn is_breakpoint_or_larger(&self, state: &ViewportState, name: &str) -> bool {
        self.compare(state, name).is_some_and(|(current, target)| current >= target)
    }

    /// Whether the state is at `name` or declared before it.
    ///
    /// Unknown names on either side compare false.
    #[must_use]
    pub fn is_breakpoint_or_smaller(&self, state: &ViewportState, name: &str) -> bool {
        self.compare(state, name).is_some_and(|(current, target)| current <= target)
    }

    fn compare(&self, state: &ViewportState, name: &str) -> Option<(usize, usize)> {
        Some((self.position(&state.breakpoint)?, self.position(name)?))
    }
}

impl Default for AspectClassifier {
    fn default() -> Self {
        Self::new(default_breakpoints())
    }
}
