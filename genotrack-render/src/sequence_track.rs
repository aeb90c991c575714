/*!
# Sequence Track

Per-base rendering of the reference: a colored slot and a bold monospace
letter for every base in the window, over an axis whose ticks sit on base
centers. Wide windows are not drawn base by base; the composer swaps in the
single [`render_overview`] line once the window exceeds the per-base limit.
*/

use genotrack_core::{GenomicPos, SequenceSource, VisibleWindow};

use crate::coords::PerBaseScale;
use crate::error::Diagnostic;
use crate::layout::RenderRect;
use crate::palette::{BasePalette, TrackStyle};
use crate::primitive::{
    DrawablePrimitive, FontWeight, LinePrimitive, PrimitiveRole, RectanglePrimitive, Stroke, TextAnchor,
    TextGlyph, TextStyle, TrackOutput,
};

/// Height kept free below the glyphs for the axis.
pub const AXIS_HEIGHT: f64 = 20.0;
pub const MAX_TICKS: u64 = 10;
pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;
/// Windows spanning more positions than this are drawn as an overview line.
pub const DEFAULT_PER_BASE_LIMIT: u64 = 100;

pub struct SequenceTrackRenderer {
    palette: BasePalette,
    style: TrackStyle,
    font_size: f64,
}

impl Default for SequenceTrackRenderer {
    fn default() -> Self {
        Self::new(BasePalette::default(), TrackStyle::default(), 10.0)
    }
}

impl SequenceTrackRenderer {
    pub fn new(palette: BasePalette, style: TrackStyle, font_size: f64) -> Self {
        Self { palette, style, font_size }
    }

    /// Render `window` (default: the whole sequence) of `sequence_id` into a
    /// track of `rect`'s size. Output is in track-local coordinates.
    pub fn render<S: SequenceSource + ?Sized>(
        &self,
        source: &S,
        sequence_id: Option<&str>,
        rect: &RenderRect,
        window: Option<VisibleWindow>,
    ) -> TrackOutput {
        let Some(sequence_id) = sequence_id else {
            return TrackOutput::nothing(Diagnostic::NoSequenceId);
        };
        if !source.has_sequences() {
            return TrackOutput::nothing(Diagnostic::NoSequenceData);
        }
        let Some(length) = source.length(sequence_id) else {
            return TrackOutput::nothing(Diagnostic::SequenceNotFound {
                sequence_id: sequence_id.to_string(),
            });
        };

        let requested = window.unwrap_or(VisibleWindow::full(length));
        let resolved = requested.clamp_to(length);
        let bases = source.subsequence(resolved.start, resolved.end, sequence_id).unwrap_or(&[]);
        if bases.is_empty() {
            return TrackOutput::nothing(Diagnostic::EmptyRange { window: requested });
        }

        let glyph_height = rect.height - AXIS_HEIGHT;
        if rect.is_degenerate() || glyph_height <= 0.0 {
            return TrackOutput::nothing(Diagnostic::DegenerateRectangle {
                width: rect.width,
                height: rect.height,
            });
        }

        let start = resolved.start;
        let end = start + bases.len() as GenomicPos - 1;
        let scale = PerBaseScale::new(VisibleWindow::new(start, end), rect.width);
        log::debug!(
            "Sequence track {}:{}-{}: {} bases, {:.2}px per base",
            sequence_id,
            start,
            end,
            bases.len(),
            scale.slot_width()
        );

        let mut primitives = Vec::with_capacity(bases.len() + 2 * MAX_TICKS as usize + 2);
        primitives.push(self.background(rect));
        primitives.extend(
            bases
                .iter()
                .enumerate()
                .map(|(i, &base)| self.base_glyph(base, scale.slot_left(start + i as GenomicPos), &scale, glyph_height)),
        );
        primitives.extend(self.axis(&scale, start, bases.len() as u64, glyph_height));

        TrackOutput::new(primitives)
    }

    fn background(&self, rect: &RenderRect) -> DrawablePrimitive {
        DrawablePrimitive::Rectangle(RectanglePrimitive {
            role: PrimitiveRole::Background,
            x: 0.0,
            y: 0.0,
            width: rect.width,
            height: rect.height,
            fill: self.style.background.clone(),
            fill_opacity: Some(self.style.background_opacity),
        })
    }

    fn base_glyph(&self, base: u8, x: f64, scale: &PerBaseScale, height: f64) -> DrawablePrimitive {
        DrawablePrimitive::TextGlyph(TextGlyph {
            role: PrimitiveRole::Base,
            x,
            y: 0.0,
            width: scale.slot_width(),
            height,
            fill: Some(self.palette.color_for(base).to_string()),
            text: (base as char).to_string(),
            style: TextStyle {
                family: self.style.glyph_font.clone(),
                size: self.font_size,
                weight: FontWeight::Bold,
                fill: self.style.glyph_text.clone(),
                anchor: TextAnchor::Middle,
                dy_em: 0.35,
            },
        })
    }

    /// Domain line at `axis_y`, then a tick and a position label per tick value.
    fn axis(&self, scale: &PerBaseScale, start: GenomicPos, base_count: u64, axis_y: f64) -> Vec<DrawablePrimitive> {
        let stroke = Stroke {
            color: self.style.axis_color.clone(),
            width: 1.0,
        };
        let (r0, r1) = scale.range();

        let mut axis = vec![DrawablePrimitive::Line(LinePrimitive {
            role: PrimitiveRole::AxisDomain,
            x1: r0,
            y1: axis_y,
            x2: r1,
            y2: axis_y,
            stroke: stroke.clone(),
        })];

        for position in tick_values(start, base_count) {
            let x = scale.center(position);
            axis.push(DrawablePrimitive::Line(LinePrimitive {
                role: PrimitiveRole::AxisTick,
                x1: x,
                y1: axis_y,
                x2: x,
                y2: axis_y + TICK_SIZE,
                stroke: stroke.clone(),
            }));
            axis.push(DrawablePrimitive::TextGlyph(TextGlyph {
                role: PrimitiveRole::AxisLabel,
                x,
                y: axis_y + TICK_SIZE + TICK_PADDING,
                width: 0.0,
                height: 0.0,
                fill: None,
                text: position.to_string(),
                style: TextStyle {
                    family: self.style.axis_font.clone(),
                    size: self.font_size,
                    weight: FontWeight::Normal,
                    fill: self.style.axis_color.clone(),
                    anchor: TextAnchor::Middle,
                    dy_em: 0.71,
                },
            }));
        }
        axis
    }
}

/// At most [`MAX_TICKS`] positions, `ceil(n / ticks)` apart, starting at `start`.
pub fn tick_values(start: GenomicPos, base_count: u64) -> Vec<GenomicPos> {
    if base_count == 0 {
        return Vec::new();
    }
    let max_ticks = MAX_TICKS.min(base_count);
    let step = base_count.div_ceil(max_ticks);
    let count = base_count.div_ceil(step);
    (0..count).map(|i| start + i * step).collect()
}

/// True when the window is too wide for per-base glyphs.
pub fn exceeds_per_base_limit(window: &VisibleWindow, limit: u64) -> bool {
    window.span() > limit
}

/// The density fallback: one horizontal line across the track at mid-height.
pub fn render_overview(rect: &RenderRect, style: &TrackStyle) -> TrackOutput {
    if rect.is_degenerate() {
        return TrackOutput::nothing(Diagnostic::DegenerateRectangle {
            width: rect.width,
            height: rect.height,
        });
    }
    TrackOutput::new(vec![DrawablePrimitive::Line(LinePrimitive {
        role: PrimitiveRole::Overview,
        x1: 0.0,
        y1: rect.height / 2.0,
        x2: rect.width,
        y2: rect.height / 2.0,
        stroke: Stroke {
            color: style.overview.clone(),
            width: style.overview_width,
        },
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use genotrack_core::{NamedSequence, SequenceSet};

    fn sequences(data: &[u8]) -> SequenceSet {
        std::iter::once(NamedSequence::new("chr1".into(), data.to_vec())).collect()
    }

    fn glyphs(output: &TrackOutput, role: PrimitiveRole) -> Vec<&TextGlyph> {
        output
            .primitives
            .iter()
            .filter_map(|p| match p {
                DrawablePrimitive::TextGlyph(g) if g.role == role => Some(g),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fifty_base_scenario() {
        let data: Vec<u8> = b"GATTACA".iter().cycle().take(50).copied().collect();
        let set = sequences(&data);
        let rect = RenderRect::new(0.0, 0.0, 500.0, 100.0);

        let output = SequenceTrackRenderer::default().render(&set, Some("chr1"), &rect, Some(VisibleWindow::new(1, 50)));
        assert!(output.diagnostics.is_empty());

        let bases = glyphs(&output, PrimitiveRole::Base);
        assert_eq!(bases.len(), 50);
        assert!(bases.iter().all(|g| g.width == 10.0 && g.height == 80.0));
        assert_eq!(bases[0].text, "G");
        assert_eq!(bases[0].fill.as_deref(), Some("#F8D90C"));
        assert_eq!(bases[1].fill.as_deref(), Some("#A0D6B9"));

        let labels: Vec<String> = glyphs(&output, PrimitiveRole::AxisLabel).iter().map(|g| g.text.clone()).collect();
        assert_eq!(labels, vec!["1", "6", "11", "16", "21", "26", "31", "36", "41", "46"]);
    }

    #[test]
    fn test_z_order() {
        let set = sequences(b"ACGTACGTAC");
        let output = SequenceTrackRenderer::default().render(&set, Some("chr1"), &RenderRect::sized(100.0, 60.0), None);
        let roles: Vec<PrimitiveRole> = output.primitives.iter().map(|p| p.role()).collect();
        assert_eq!(roles[0], PrimitiveRole::Background);
        assert!(roles[1..11].iter().all(|r| *r == PrimitiveRole::Base));
        assert_eq!(roles[11], PrimitiveRole::AxisDomain);
        assert!(roles[12..].iter().all(|r| matches!(r, PrimitiveRole::AxisTick | PrimitiveRole::AxisLabel)));
    }

    #[test]
    fn test_tick_centering() {
        let data: Vec<u8> = b"ACGT".iter().cycle().take(200).copied().collect();
        let set = sequences(&data);
        let rect = RenderRect::sized(733.0, 90.0);
        let output = SequenceTrackRenderer::default().render(&set, Some("chr1"), &rect, Some(VisibleWindow::new(40, 86)));

        let bases = glyphs(&output, PrimitiveRole::Base);
        for label in glyphs(&output, PrimitiveRole::AxisLabel) {
            let pos: usize = label.text.parse().unwrap();
            let glyph = bases[pos - 40];
            assert!((glyph.text_x() - label.text_x()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_window_is_clamped_to_sequence() {
        let set = sequences(b"ACGTACGTAC");
        let output = SequenceTrackRenderer::default().render(
            &set,
            Some("chr1"),
            &RenderRect::sized(100.0, 60.0),
            Some(VisibleWindow::new(0, 40)),
        );
        assert_eq!(output.count_role(PrimitiveRole::Base), 10);
        assert_eq!(glyphs(&output, PrimitiveRole::AxisLabel)[0].text, "1");
    }

    #[test]
    fn test_every_x_within_track() {
        let data: Vec<u8> = b"ACGTN".iter().cycle().take(97).copied().collect();
        let set = sequences(&data);
        let rect = RenderRect::sized(640.0, 60.0);
        let output = SequenceTrackRenderer::default().render(&set, Some("chr1"), &rect, None);
        for p in &output.primitives {
            let (x0, x1) = p.x_extent();
            assert!(x0 >= 0.0 && x1 <= rect.width + 1e-9, "{:?}", p);
        }
    }

    #[test]
    fn test_no_data_conditions() {
        let rect = RenderRect::sized(100.0, 60.0);
        let renderer = SequenceTrackRenderer::default();

        let out = renderer.render(&sequences(b"ACGT"), None, &rect, None);
        assert!(out.is_empty());
        assert_eq!(out.diagnostics, vec![Diagnostic::NoSequenceId]);

        let out = renderer.render(&SequenceSet::new(), Some("chr1"), &rect, None);
        assert_eq!(out.diagnostics, vec![Diagnostic::NoSequenceData]);

        let out = renderer.render(&sequences(b"ACGT"), Some("chr2"), &rect, None);
        assert!(matches!(out.diagnostics[0], Diagnostic::SequenceNotFound { .. }));

        let out = renderer.render(&sequences(b"ACGT"), Some("chr1"), &rect, Some(VisibleWindow::new(10, 20)));
        assert!(out.is_empty());
        assert!(out.diagnostics[0].is_no_data());
    }

    #[test]
    fn test_track_too_short_for_axis() {
        let out = SequenceTrackRenderer::default().render(&sequences(b"ACGT"), Some("chr1"), &RenderRect::sized(100.0, 20.0), None);
        assert!(out.is_empty());
        assert!(matches!(out.diagnostics[0], Diagnostic::DegenerateRectangle { .. }));
    }

    #[test]
    fn test_tick_values() {
        assert_eq!(tick_values(1, 50), vec![1, 6, 11, 16, 21, 26, 31, 36, 41, 46]);
        assert_eq!(tick_values(100, 3), vec![100, 101, 102]);
        assert_eq!(tick_values(1, 101), (0..10).map(|i| 1 + i * 11).collect::<Vec<_>>());
        assert_eq!(tick_values(1, 21), vec![1, 4, 7, 10, 13, 16, 19]);
        assert!(tick_values(1, 0).is_empty());
    }

    #[test]
    fn test_per_base_limit() {
        assert!(!exceeds_per_base_limit(&VisibleWindow::new(1, 101), 100));
        assert!(exceeds_per_base_limit(&VisibleWindow::new(1, 102), 100));
    }

    #[test]
    fn test_overview_is_a_single_line() {
        let out = render_overview(&RenderRect::sized(400.0, 60.0), &TrackStyle::default());
        assert_eq!(out.primitives.len(), 1);
        match &out.primitives[0] {
            DrawablePrimitive::Line(l) => {
                assert_eq!((l.x1, l.x2, l.y1, l.y2), (0.0, 400.0, 30.0, 30.0));
                assert_eq!(l.stroke.width, 2.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
