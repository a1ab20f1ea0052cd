//! Breakpoint definitions and the built-in table.

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the default `tall` range.
pub const TALL_MAX_RATIO: f64 = 0.8;

/// Lower bound (inclusive) of the default `wide` range.
pub const WIDE_MIN_RATIO: f64 = 1.2;

/// Lower bound (inclusive) of the default `ultra-wide` range.
pub const ULTRA_WIDE_MIN_RATIO: f64 = 2.0;

/// Name reported when a table is empty and has no catch-all entry.
pub const FALLBACK_BREAKPOINT: &str = "standard";

/// A named aspect-ratio range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Unique identifier, e.g. `"wide"`.
    pub name: String,
    /// Inclusive lower bound. `None` means unbounded.
    #[serde(default)]
    pub min_ratio: Option<f64>,
    /// Exclusive upper bound. `None` means unbounded.
    #[serde(default)]
    pub max_ratio: Option<f64>,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Example devices, informational only.
    #[serde(default)]
    pub common_devices: Vec<String>,
}

impl Breakpoint {
    /// Create a breakpoint covering `[min_ratio, max_ratio)`.
    #[must_use]
    pub fn new(name: impl Into<String>, min_ratio: Option<f64>, max_ratio: Option<f64>) -> Self {
        Self {
            name: name.into(),
            min_ratio,
            max_ratio,
            description: String::new(),
            common_devices: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the example device list.
    #[must_use]
    pub fn with_devices<I, S>(mut self, devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.common_devices = devices.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether `ratio` falls inside this breakpoint.
    ///
    /// A zero-width range (`min == max`) matches only that exact ratio.
    /// An inverted range (`min > max`) never matches.
    #[must_use]
    #[allow(clippy::float_cmp)] // exact point ranges compare exactly
    pub fn matches(&self, ratio: f64) -> bool {
        match (self.min_ratio, self.max_ratio) {
            (Some(min), Some(max)) if min == max => ratio == min,
            (min, max) => {
                min.is_none_or(|min| ratio >= min) && max.is_none_or(|max| ratio < max)
            }
        }
    }
}

/// The built-in five-entry table, in matching order.
///
/// `square` sits before `standard` so the exact 1:1 point wins over the
/// surrounding range.
#[must_use]
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("tall", None, Some(TALL_MAX_RATIO))
            .with_description("Portrait screens, taller than wide")
            .with_devices(["Phones (portrait)", "Vertical monitors"]),
        Breakpoint::new("square", Some(1.0), Some(1.0))
            .with_description("Exactly square viewports")
            .with_devices(["Square displays", "Split-screen panes"]),
        Breakpoint::new("standard", Some(TALL_MAX_RATIO), Some(WIDE_MIN_RATIO))
            .with_description("Near-square screens")
            .with_devices(["Tablets", "4:3 monitors"]),
        Breakpoint::new("wide", Some(WIDE_MIN_RATIO), Some(ULTRA_WIDE_MIN_RATIO))
            .with_description("Landscape widescreen")
            .with_devices(["Laptops", "16:9 monitors", "Phones (landscape)"]),
        Breakpoint::new("ultra-wide", Some(ULTRA_WIDE_MIN_RATIO), None)
            .with_description("Very wide screens")
            .with_devices(["21:9 monitors", "32:9 monitors"]),
    ]
}
