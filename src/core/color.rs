//! Color Classifier
//!
//! Buckets an orbital radius into one of five color bands. Each band is
//! the half-open interval `[lo, hi)`: a radius sitting exactly on a
//! threshold belongs to the band above it, so `r = 0.2` is `Close`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper (exclusive) radius bound of each band except the last
const THRESHOLDS: [(f64, ColorBand); 4] = [
    (0.2, ColorBand::VeryClose),
    (0.4, ColorBand::Close),
    (0.6, ColorBand::Medium),
    (0.8, ColorBand::Far),
];

/// Discrete color band of a body, from its radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBand {
    /// `r < 0.2`
    VeryClose,
    /// `0.2 ≤ r < 0.4`
    Close,
    /// `0.4 ≤ r < 0.6`
    Medium,
    /// `0.6 ≤ r < 0.8`
    Far,
    /// `r ≥ 0.8`
    VeryFar,
}

impl ColorBand {
    /// All bands, nearest first
    pub const ALL: [ColorBand; 5] = [
        ColorBand::VeryClose,
        ColorBand::Close,
        ColorBand::Medium,
        ColorBand::Far,
        ColorBand::VeryFar,
    ];

    /// Classify a radius. Total: NaN falls through to `VeryFar`.
    pub fn classify(r: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(bound, _)| r < *bound)
            .map(|(_, band)| *band)
            .unwrap_or(ColorBand::VeryFar)
    }

    /// RGB triple on a 0–1 scale
    pub fn rgb(&self) -> [f64; 3] {
        match self {
            ColorBand::VeryClose => [0.7, 0.7, 1.0],
            ColorBand::Close => [1.0, 1.0, 1.0],
            ColorBand::Medium => [1.0, 1.0, 0.7],
            ColorBand::Far => [1.0, 0.7, 0.4],
            ColorBand::VeryFar => [1.0, 0.4, 0.4],
        }
    }

    /// Stable kebab-case name
    pub fn label(&self) -> &'static str {
        match self {
            ColorBand::VeryClose => "very-close",
            ColorBand::Close => "close",
            ColorBand::Medium => "medium",
            ColorBand::Far => "far",
            ColorBand::VeryFar => "very-far",
        }
    }

    /// Position of this band in [`ColorBand::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
