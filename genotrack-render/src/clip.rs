//! Window visibility, endpoint clipping and edge-truncation checks for genomic features.

use genotrack_core::{GenomicFeature, GenomicPos, VisibleWindow};
use serde::Serialize;

/// Features narrower than this are widened so they stay visible.
pub const MIN_FEATURE_WIDTH: f64 = 1.0;

/// A visible feature with its endpoints clamped into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClippedFeature {
    pub start: GenomicPos,
    pub end: GenomicPos,
    pub original_start: GenomicPos,
    pub original_end: GenomicPos,
}

impl ClippedFeature {
    pub fn truncated_start(&self) -> bool {
        self.start != self.original_start
    }

    pub fn truncated_end(&self) -> bool {
        self.end != self.original_end
    }
}

/// Clipping against an optional window. Without a window everything is visible
/// and positions pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureClipper {
    window: Option<VisibleWindow>,
}

impl FeatureClipper {
    pub fn new(window: Option<VisibleWindow>) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Option<VisibleWindow> {
        self.window
    }

    /// False only when `[start, end]` lies entirely before or after the window.
    pub fn is_visible(&self, start: GenomicPos, end: GenomicPos) -> bool {
        match self.window {
            Some(w) => !(end < w.start || start > w.end),
            None => true,
        }
    }

    /// Clamp into `[window.start, window.end]`.
    pub fn clip(&self, position: GenomicPos) -> GenomicPos {
        match self.window {
            Some(w) => position.min(w.end).max(w.start),
            None => position,
        }
    }

    /// Some feature of the collection ends before the window starts.
    pub fn has_truncation_before<F: GenomicFeature>(&self, features: &[F]) -> bool {
        match self.window {
            Some(w) => features.iter().any(|f| f.end() < w.start),
            None => false,
        }
    }

    /// Some feature of the collection starts after the window ends.
    pub fn has_truncation_after<F: GenomicFeature>(&self, features: &[F]) -> bool {
        match self.window {
            Some(w) => features.iter().any(|f| f.start() > w.end),
            None => false,
        }
    }

    /// `None` when the feature is not visible.
    pub fn clip_feature<F: GenomicFeature>(&self, feature: &F) -> Option<ClippedFeature> {
        if !self.is_visible(feature.start(), feature.end()) {
            return None;
        }
        Some(ClippedFeature {
            start: self.clip(feature.start()),
            end: self.clip(feature.end()),
            original_start: feature.start(),
            original_end: feature.end(),
        })
    }
}

/// Display width between two mapped x offsets, never below [`MIN_FEATURE_WIDTH`].
pub fn display_width(x_start: f64, x_end: f64) -> f64 {
    (x_end - x_start).max(MIN_FEATURE_WIDTH)
}
