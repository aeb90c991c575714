/*!
# Coordinate Mapping

Two named conventions convert genomic positions to x offsets within a track:

- **Per-base**: the window is divided into equal slots, one per base. The axis
  scale maps `[start, end]` onto `[slot/2, width - slot/2]` so that ticks land
  on base centers.
- **Proportional**: `x = (position - anchor) / genome_length * width`, anchored
  at the window start. Pixel density is fixed by the genome length, not the
  window length, so panning keeps feature widths constant.

Neither function clips. Positions outside the window map outside `[0, width]`;
callers clip first.
*/

use genotrack_core::{GenomicPos, VisibleWindow};
use serde::{Deserialize, Serialize};

use crate::layout::RenderRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingMode {
    PerBase,
    Proportional { genome_length: GenomicPos },
}

/// x offset of `position` within `rect` under the given mode.
///
/// In per-base mode this is the center of the base's slot.
pub fn map_position(position: GenomicPos, window: &VisibleWindow, rect: &RenderRect, mode: MappingMode) -> f64 {
    match mode {
        MappingMode::PerBase => per_base_x(position, window, rect.width),
        MappingMode::Proportional { genome_length } => {
            proportional_x(position, window.start, genome_length, rect.width)
        }
    }
}

/// Slot-centered x for `position` in a per-base track of `width` pixels.
pub fn per_base_x(position: GenomicPos, window: &VisibleWindow, width: f64) -> f64 {
    PerBaseScale::new(*window, width).center(position)
}

/// Linear x over the full genome length, anchored at `anchor`.
pub fn proportional_x(position: GenomicPos, anchor: GenomicPos, genome_length: GenomicPos, width: f64) -> f64 {
    if genome_length == 0 {
        return 0.0;
    }
    (position as f64 - anchor as f64) / genome_length as f64 * width
}

/// Per-base slot geometry and the slot-centered axis scale for one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerBaseScale {
    start: GenomicPos,
    end: GenomicPos,
    base_count: u64,
    slot_width: f64,
    range: (f64, f64),
}

impl PerBaseScale {
    pub fn new(window: VisibleWindow, width: f64) -> Self {
        let base_count = window.base_count();
        let slot_width = if base_count == 0 { 0.0 } else { width / base_count as f64 };
        Self {
            start: window.start,
            end: window.end,
            base_count,
            slot_width,
            range: (slot_width / 2.0, width - slot_width / 2.0),
        }
    }

    pub fn base_count(&self) -> u64 {
        self.base_count
    }

    pub fn slot_width(&self) -> f64 {
        self.slot_width
    }

    /// Axis range `[slot/2, width - slot/2]`.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Left edge of the slot holding `position`.
    pub fn slot_left(&self, position: GenomicPos) -> f64 {
        (position as f64 - self.start as f64) * self.slot_width
    }

    /// Axis scale: `[start, end]` onto the axis range. A single-base domain maps
    /// to the middle of the range.
    pub fn center(&self, position: GenomicPos) -> f64 {
        if self.base_count == 0 {
            return 0.0;
        }
        let (r0, r1) = self.range;
        if self.end == self.start {
            return (r0 + r1) / 2.0;
        }
        r0 + (position as f64 - self.start as f64) * (r1 - r0) / (self.end - self.start) as f64
    }
}
