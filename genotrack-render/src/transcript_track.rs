//! Exon/intron/CDS drawing for a single transcript.
//!
//! Positions map proportionally over the genome length, anchored at the window
//! start, so every transcript row shares one scale. Exons outside the window
//! still matter: when any lies wholly before (after) it, an intron line runs
//! from the window edge to the nearest visible exon.

use genotrack_core::{GenomicFeature, GenomicPos, TranscriptSource, VisibleWindow};

use crate::clip::{display_width, FeatureClipper, MIN_FEATURE_WIDTH};
use crate::coords::proportional_x;
use crate::error::Diagnostic;
use crate::layout::RenderRect;
use crate::palette::TrackStyle;
use crate::primitive::{DrawablePrimitive, LinePrimitive, PrimitiveRole, RectanglePrimitive, Stroke, TrackOutput};

/// Clipped feature in track-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MappedFeature {
    x_start: f64,
    x_end: f64,
    original_start: GenomicPos,
}

/// Horizontal projection of the window for one track.
#[derive(Debug, Clone, Copy)]
struct Projection {
    anchor: GenomicPos,
    far_edge: GenomicPos,
    genome_length: GenomicPos,
    width: f64,
}

impl Projection {
    fn x(&self, position: GenomicPos) -> f64 {
        proportional_x(position, self.anchor, self.genome_length, self.width).clamp(0.0, self.width)
    }

    fn window_start_x(&self) -> f64 {
        self.x(self.anchor)
    }

    fn window_end_x(&self) -> f64 {
        self.x(self.far_edge)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptTrackRenderer {
    style: TrackStyle,
}

impl TranscriptTrackRenderer {
    pub fn new(style: TrackStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &TrackStyle {
        &self.style
    }

    /// Render one transcript into a track of `rect`'s size. Without a window
    /// the whole genome `[0, genome_length]` is shown.
    pub fn render<T: TranscriptSource + ?Sized>(
        &self,
        transcript: &T,
        genome_length: GenomicPos,
        rect: &RenderRect,
        window: Option<VisibleWindow>,
    ) -> TrackOutput {
        let Some((span_start, span_end)) = transcript.span() else {
            return TrackOutput::nothing(Diagnostic::EmptyTranscript);
        };
        if genome_length == 0 {
            return TrackOutput::nothing(Diagnostic::ZeroGenomeLength);
        }
        // Narrower than one feature means no feature can keep its minimum width.
        if rect.is_degenerate() || rect.width < MIN_FEATURE_WIDTH {
            return TrackOutput::nothing(Diagnostic::DegenerateRectangle {
                width: rect.width,
                height: rect.height,
            });
        }

        let clipper = FeatureClipper::new(window);
        let projection = Projection {
            anchor: window.map_or(0, |w| w.start),
            far_edge: window.map_or(genome_length, |w| w.end),
            genome_length,
            width: rect.width,
        };

        let exons = self.map_features(transcript.exons(), &clipper, &projection);
        let mut primitives: Vec<DrawablePrimitive> = exons
            .iter()
            .map(|f| self.feature_rect(PrimitiveRole::Exon, f, rect, self.style.exon_height_ratio, &self.style.exon))
            .collect();

        let intron_y = rect.height / 2.0;
        if exons.is_empty() {
            // Window sits inside an intron.
            let spans_window = window.is_some_and(|w| span_start <= w.end && w.start <= span_end);
            if spans_window {
                primitives.push(self.intron(projection.window_start_x(), projection.window_end_x(), intron_y));
            }
        } else {
            primitives.extend(
                exons
                    .windows(2)
                    .map(|pair| self.intron(pair[0].x_end, pair[1].x_start, intron_y)),
            );
            if clipper.has_truncation_before(transcript.exons()) {
                primitives.push(self.intron(projection.window_start_x(), exons[0].x_start, intron_y));
            }
            if clipper.has_truncation_after(transcript.exons()) {
                let last = exons[exons.len() - 1];
                primitives.push(self.intron(last.x_end, projection.window_end_x(), intron_y));
            }
        }

        let coding = self.map_features(transcript.coding_segments(), &clipper, &projection);
        primitives.extend(
            coding
                .iter()
                .map(|f| self.feature_rect(PrimitiveRole::Cds, f, rect, self.style.cds_height_ratio, &self.style.cds)),
        );

        log::debug!(
            "Transcript track: {} of {} exons visible, {} coding segments, {} primitives",
            exons.len(),
            transcript.exons().len(),
            coding.len(),
            primitives.len()
        );
        TrackOutput::new(primitives)
    }

    fn map_features<F: GenomicFeature>(
        &self,
        features: &[F],
        clipper: &FeatureClipper,
        projection: &Projection,
    ) -> Vec<MappedFeature> {
        let mut mapped: Vec<MappedFeature> = features
            .iter()
            .filter_map(|f| clipper.clip_feature(f))
            .map(|c| MappedFeature {
                x_start: projection.x(c.start),
                x_end: projection.x(c.end),
                original_start: c.original_start,
            })
            .collect();
        mapped.sort_by_key(|f| f.original_start);
        mapped
    }

    /// Vertically centered box `height_ratio` of the track tall. Widened to the
    /// minimum feature width, shifted left if that would overrun the track.
    fn feature_rect(
        &self,
        role: PrimitiveRole,
        feature: &MappedFeature,
        rect: &RenderRect,
        height_ratio: f64,
        fill: &str,
    ) -> DrawablePrimitive {
        let width = display_width(feature.x_start, feature.x_end).min(rect.width);
        let x = feature.x_start.min(rect.width - width).max(0.0);
        let height = rect.height * height_ratio;
        DrawablePrimitive::Rectangle(RectanglePrimitive {
            role,
            x,
            y: (rect.height - height) / 2.0,
            width,
            height,
            fill: fill.to_string(),
            fill_opacity: None,
        })
    }

    fn intron(&self, x1: f64, x2: f64, y: f64) -> DrawablePrimitive {
        DrawablePrimitive::Line(LinePrimitive {
            role: PrimitiveRole::Intron,
            x1,
            y1: y,
            x2,
            y2: y,
            stroke: Stroke {
                color: self.style.intron.clone(),
                width: self.style.intron_width,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genotrack_core::{CodingSegment, Exon, Transcript};
    use proptest::prelude::*;

    fn transcript(exons: &[(u64, u64)]) -> Transcript {
        Transcript::new("tx1".into(), "chr1".into()).with_exons(exons.iter().map(|&(s, e)| Exon::new(s, e)))
    }

    fn rects(output: &TrackOutput, role: PrimitiveRole) -> Vec<RectanglePrimitive> {
        output
            .primitives
            .iter()
            .filter_map(|p| match p {
                DrawablePrimitive::Rectangle(r) if r.role == role => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    fn lines(output: &TrackOutput) -> Vec<LinePrimitive> {
        output
            .primitives
            .iter()
            .filter_map(|p| match p {
                DrawablePrimitive::Line(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_two_exon_scenario() {
        let tx = transcript(&[(100, 200), (400, 500)]);
        let rect = RenderRect::sized(900.0, 40.0);
        let out = TranscriptTrackRenderer::default().render(&tx, 1000, &rect, Some(VisibleWindow::new(150, 450)));
        assert!(out.diagnostics.is_empty());

        let exons = rects(&out, PrimitiveRole::Exon);
        assert_eq!(exons.len(), 2);
        assert!(close(exons[0].x, 0.0) && close(exons[0].width, 45.0));
        assert!(close(exons[1].x, 225.0) && close(exons[1].width, 45.0));
        assert!(exons.iter().all(|e| e.y == 10.0 && e.height == 20.0 && e.fill == "#4A88CA"));

        let introns = lines(&out);
        assert_eq!(introns.len(), 1);
        assert!(close(introns[0].x1, 45.0) && close(introns[0].x2, 225.0));
        assert_eq!(introns[0].y1, 20.0);
    }

    #[test]
    fn test_boundary_continuity() {
        let tx = transcript(&[(10, 40), (200, 260), (380, 420), (900, 950)]);
        let window = VisibleWindow::new(150, 450);
        let rect = RenderRect::sized(900.0, 40.0);
        let out = TranscriptTrackRenderer::default().render(&tx, 1000, &rect, Some(window));

        let introns = lines(&out);
        // one between the visible pair, plus one to each window edge
        assert_eq!(introns.len(), 3);
        let window_start_x = 0.0;
        let window_end_x = proportional_x(450, 150, 1000, 900.0);
        assert!(introns.iter().any(|l| close(l.x1, window_start_x) && close(l.x2, 45.0)));
        assert!(introns.iter().any(|l| close(l.x2, window_end_x)));
    }

    #[test]
    fn test_edge_overlap_is_not_truncation() {
        let tx = transcript(&[(100, 200), (400, 500)]);
        let out = TranscriptTrackRenderer::default().render(
            &tx,
            1000,
            &RenderRect::sized(900.0, 40.0),
            Some(VisibleWindow::new(150, 450)),
        );
        assert_eq!(out.count_role(PrimitiveRole::Intron), 1);
    }

    #[test]
    fn test_window_inside_intron_draws_a_line() {
        let tx = transcript(&[(100, 200), (800, 900)]);
        let out = TranscriptTrackRenderer::default().render(
            &tx,
            1000,
            &RenderRect::sized(900.0, 40.0),
            Some(VisibleWindow::new(300, 500)),
        );
        assert_eq!(out.count_role(PrimitiveRole::Exon), 0);
        let l = &lines(&out)[0];
        assert_eq!(out.primitives.len(), 1);
        assert!(close(l.x1, 0.0) && close(l.x2, 180.0));
    }

    #[test]
    fn test_window_outside_span_draws_nothing() {
        let tx = transcript(&[(100, 200)]);
        let out = TranscriptTrackRenderer::default().render(
            &tx,
            1000,
            &RenderRect::sized(900.0, 40.0),
            Some(VisibleWindow::new(600, 700)),
        );
        assert!(out.is_empty());
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_zero_exons() {
        let tx = Transcript::new("tx1".into(), "chr1".into());
        let out = TranscriptTrackRenderer::default().render(&tx, 1000, &RenderRect::sized(900.0, 40.0), None);
        assert!(out.is_empty());
        assert_eq!(out.diagnostics, vec![Diagnostic::EmptyTranscript]);
        assert!(out.diagnostics[0].is_no_data());
    }

    #[test]
    fn test_degenerate_inputs() {
        let tx = transcript(&[(1, 10)]);
        let renderer = TranscriptTrackRenderer::default();
        let out = renderer.render(&tx, 0, &RenderRect::sized(900.0, 40.0), None);
        assert_eq!(out.diagnostics, vec![Diagnostic::ZeroGenomeLength]);
        let out = renderer.render(&tx, 100, &RenderRect::sized(0.0, 40.0), None);
        assert!(matches!(out.diagnostics[0], Diagnostic::DegenerateRectangle { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_sub_pixel_track_is_degenerate() {
        let tx = transcript(&[(1, 10)]);
        let out = TranscriptTrackRenderer::default().render(&tx, 100, &RenderRect::sized(0.5, 40.0), None);
        assert!(out.is_empty());
        assert_eq!(out.diagnostics, vec![Diagnostic::DegenerateRectangle { width: 0.5, height: 40.0 }]);

        let out = TranscriptTrackRenderer::default().render(&tx, 100, &RenderRect::sized(1.0, 40.0), None);
        assert_eq!(rects(&out, PrimitiveRole::Exon)[0].width, 1.0);
    }

    #[test]
    fn test_coding_segments_clipped_to_window() {
        let tx = transcript(&[(100, 200), (400, 500)])
            .with_coding_segments([CodingSegment::new(120, 480), CodingSegment::new(600, 650)]);
        let out = TranscriptTrackRenderer::default().render(
            &tx,
            1000,
            &RenderRect::sized(900.0, 40.0),
            Some(VisibleWindow::new(150, 450)),
        );

        let cds = rects(&out, PrimitiveRole::Cds);
        // (600, 650) lies past the window end
        assert_eq!(cds.len(), 1);
        assert!(close(cds[0].x, 0.0) && close(cds[0].width, 270.0));
        assert_eq!(out.primitives.last().map(|p| p.role()), Some(PrimitiveRole::Cds));
    }

    #[test]
    fn test_cds_drawn_last_and_taller() {
        let tx = transcript(&[(100, 200), (400, 500)])
            .with_coding_segments([CodingSegment::new(150, 200), CodingSegment::new(400, 420).with_phase(1)]);
        let out = TranscriptTrackRenderer::default().render(&tx, 1000, &RenderRect::sized(1000.0, 80.0), None);

        let roles: Vec<PrimitiveRole> = out.primitives.iter().map(|p| p.role()).collect();
        assert_eq!(
            roles,
            vec![
                PrimitiveRole::Exon,
                PrimitiveRole::Exon,
                PrimitiveRole::Intron,
                PrimitiveRole::Cds,
                PrimitiveRole::Cds
            ]
        );
        let cds = rects(&out, PrimitiveRole::Cds);
        assert!(cds.iter().all(|c| c.y == 10.0 && c.height == 60.0 && c.fill == "#F2C14E"));
        assert!(close(cds[0].x, 150.0) && close(cds[0].width, 50.0));
    }

    #[test]
    fn test_without_window_no_edge_lines() {
        let tx = transcript(&[(100, 200), (400, 500), (700, 800)]);
        let out = TranscriptTrackRenderer::default().render(&tx, 1000, &RenderRect::sized(500.0, 40.0), None);
        assert_eq!(out.count_role(PrimitiveRole::Intron), 2);
        let exons = rects(&out, PrimitiveRole::Exon);
        assert!(close(exons[2].x, 350.0) && close(exons[2].width, 50.0));
    }

    #[test]
    fn test_single_base_exon_keeps_minimum_width() {
        let tx = transcript(&[(1000, 1000)]);
        let out = TranscriptTrackRenderer::default().render(&tx, 1000, &RenderRect::sized(100.0, 40.0), None);
        let exon = &rects(&out, PrimitiveRole::Exon)[0];
        assert_eq!(exon.width, 1.0);
        assert_eq!(exon.x + exon.width, 100.0);
    }

    proptest! {
        #[test]
        fn primitives_stay_inside_track(
            starts in proptest::collection::vec(1u64..5_000, 1..8),
            len in 0u64..400,
            ws in 1u64..5_000,
            wlen in 0u64..3_000,
            width in 10.0f64..1500.0,
        ) {
            let tx = Transcript::new("tx".into(), "chr".into())
                .with_exons(starts.iter().map(|&s| Exon::new(s, s + len)));
            let rect = RenderRect::sized(width, 30.0);
            let out = TranscriptTrackRenderer::default()
                .render(&tx, 6_000, &rect, Some(VisibleWindow::new(ws, ws + wlen)));
            for p in &out.primitives {
                prop_assert!(p.validate().is_ok());
                let (x0, x1) = p.x_extent();
                prop_assert!(x0 >= 0.0 && x1 <= width + 1e-9);
            }
        }
    }
}
