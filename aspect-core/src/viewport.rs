//! Viewport dimensions and the derived classification state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Viewports narrower than this (in portrait) count as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height. A zero height is treated as one pixel.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    /// Orientation derived from the raw sides, so 1:1 is exact.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        match self.width.cmp(&self.height) {
            Ordering::Less => Orientation::Portrait,
            Ordering::Greater => Orientation::Landscape,
            Ordering::Equal => Orientation::Square,
        }
    }

    /// Whether either side is zero (e.g. a minimised window).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Shape of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    Landscape,
    /// Equal sides.
    Square,
}

impl Orientation {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Square => "square",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a viewport at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width / height`.
    pub ratio: f64,
    /// Derived orientation.
    pub orientation: Orientation,
    /// Name of the matched breakpoint.
    pub breakpoint: String,
}

impl ViewportState {
    /// The dimensions this state was computed from.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Breakpoint is `wide`.
    #[must_use]
    pub fn is_wide(&self) -> bool {
        self.breakpoint == "wide"
    }

    /// Breakpoint is `ultra-wide`.
    #[must_use]
    pub fn is_ultra_wide(&self) -> bool {
        self.breakpoint == "ultra-wide"
    }

    /// Breakpoint is `tall`.
    #[must_use]
    pub fn is_tall(&self) -> bool {
        self.breakpoint == "tall"
    }

    /// Breakpoint is `square`, or the sides are equal.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.breakpoint == "square" || self.orientation == Orientation::Square
    }

    /// Tall viewports, or narrow portrait ones.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.is_tall()
            || (self.orientation == Orientation::Portrait && self.width < MOBILE_MAX_WIDTH)
    }

    /// Mid-range near-square viewports that are not mobile.
    #[must_use]
    pub fn is_tablet(&self) -> bool {
        matches!(self.breakpoint.as_str(), "standard" | "square") && !self.is_mobile()
    }

    /// Wide and ultra-wide viewports.
    #[must_use]
    pub fn is_desktop(&self) -> bool {
        self.is_wide() || self.is_ultra_wide()
    }
}
