/*!
# View Composition

One render pass over a genome view: the sequence track in grid cell (0, 0)
and the transcripts stacked in cell (1, 0). The composer resolves which
sequence and genome length the view is about, picks per-base or overview
drawing for the sequence track, then translates each track's local
primitives into canvas space and appends them to the surface.
*/

use genotrack_core::{GenomicPos, SequenceSource, Transcriptome, VisibleWindow};
use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, RenderError};
use crate::layout::{GeometryProvider, RenderRect};
use crate::palette::{BasePalette, TrackStyle};
use crate::primitive::TrackOutput;
use crate::sequence_track::{exceeds_per_base_limit, render_overview, SequenceTrackRenderer, DEFAULT_PER_BASE_LIMIT};
use crate::surface::DrawingSurface;
use crate::transcript_track::TranscriptTrackRenderer;

pub const SEQUENCE_CELL: (usize, usize) = (0, 0);
pub const TRANSCRIPT_CELL: (usize, usize) = (1, 0);

/// View options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    pub window: Option<VisibleWindow>,
    pub font_size: f64,
    /// Widest window (end - start) still drawn base by base
    pub per_base_limit: u64,
    /// Overrides the sequence id derived from the loaded data
    pub sequence_id: Option<String>,
    pub max_transcript_row_height: f64,
    pub palette: BasePalette,
    pub style: TrackStyle,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            window: None,
            font_size: 10.0,
            per_base_limit: DEFAULT_PER_BASE_LIMIT,
            sequence_id: None,
            max_transcript_row_height: 40.0,
            palette: BasePalette::default(),
            style: TrackStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceMode {
    PerBase,
    Overview,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReport {
    pub track: String,
    pub primitive_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Summary of one composition pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    pub sequence_id: Option<String>,
    pub genome_length: GenomicPos,
    pub sequence_mode: Option<SequenceMode>,
    pub tracks: Vec<TrackReport>,
    pub primitive_count: usize,
}

impl ViewReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.tracks.iter().flat_map(|t| t.diagnostics.iter())
    }
}

pub struct ViewComposer {
    options: ViewOptions,
    sequence_renderer: SequenceTrackRenderer,
    transcript_renderer: TranscriptTrackRenderer,
}

impl ViewComposer {
    pub fn new(options: ViewOptions) -> Self {
        let sequence_renderer =
            SequenceTrackRenderer::new(options.palette.clone(), options.style.clone(), options.font_size);
        let transcript_renderer = TranscriptTrackRenderer::new(options.style.clone());
        Self {
            options,
            sequence_renderer,
            transcript_renderer,
        }
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Explicit id, else the transcriptome's primary sequence, else the first loaded sequence.
    pub fn resolve_sequence_id<S: SequenceSource + ?Sized>(
        &self,
        sequences: &S,
        transcriptome: &Transcriptome,
    ) -> Option<String> {
        self.options
            .sequence_id
            .clone()
            .or_else(|| transcriptome.seq_id().map(str::to_string))
            .or_else(|| sequences.available_sequence_ids().first().map(|id| id.to_string()))
    }

    /// Sequence length, else the furthest exon end, else the window end.
    pub fn resolve_genome_length<S: SequenceSource + ?Sized>(
        &self,
        sequences: &S,
        transcriptome: &Transcriptome,
        sequence_id: Option<&str>,
    ) -> GenomicPos {
        sequence_id
            .and_then(|id| sequences.length(id))
            .or_else(|| transcriptome.max_end())
            .or_else(|| self.options.window.map(|w| w.end))
            .unwrap_or(0)
    }

    /// Render the whole view onto `surface`.
    pub fn compose<G, S, D>(
        &self,
        geometry: &G,
        sequences: &S,
        transcriptome: &Transcriptome,
        surface: &mut D,
    ) -> Result<ViewReport, RenderError>
    where
        G: GeometryProvider + ?Sized,
        S: SequenceSource + ?Sized,
        D: DrawingSurface + ?Sized,
    {
        let sequence_id = self.resolve_sequence_id(sequences, transcriptome);
        let genome_length = self.resolve_genome_length(sequences, transcriptome, sequence_id.as_deref());
        log::info!(
            "Composing view: sequence {}, genome length {}, window {}",
            sequence_id.as_deref().unwrap_or("<none>"),
            genome_length,
            self.options.window.map_or_else(|| "full".to_string(), |w| w.to_string())
        );

        let mut report = ViewReport {
            sequence_id: sequence_id.clone(),
            genome_length,
            sequence_mode: None,
            tracks: Vec::new(),
            primitive_count: 0,
        };

        let (row, col) = SEQUENCE_CELL;
        match geometry.cell_rectangle(row, col) {
            Some(cell) => {
                let (mode, output) = self.sequence_track(sequences, sequence_id.as_deref(), &cell);
                report.sequence_mode = Some(mode);
                let appended = append_translated(surface, &output, &cell)?;
                report.tracks.push(track_report("sequence", appended, output.diagnostics));
                report.primitive_count += appended;
            }
            None => report
                .tracks
                .push(track_report("sequence", 0, vec![Diagnostic::MissingCell { row, col }])),
        }

        let (row, col) = TRANSCRIPT_CELL;
        match geometry.cell_rectangle(row, col) {
            Some(cell) => {
                let transcripts: Vec<_> = match sequence_id.as_deref() {
                    Some(id) => transcriptome.on_sequence(id).collect(),
                    None => transcriptome.iter().collect(),
                };
                let rows = cell.stacked_rows(transcripts.len(), self.options.max_transcript_row_height);
                for (transcript, row_rect) in transcripts.iter().zip(rows.iter()) {
                    let local = RenderRect::sized(row_rect.width, row_rect.height);
                    let output = self
                        .transcript_renderer
                        .render(*transcript, genome_length, &local, self.options.window);
                    let appended = append_translated(surface, &output, row_rect)?;
                    report
                        .tracks
                        .push(track_report(&transcript.id, appended, output.diagnostics));
                    report.primitive_count += appended;
                }
            }
            None => report
                .tracks
                .push(track_report("transcripts", 0, vec![Diagnostic::MissingCell { row, col }])),
        }

        log::debug!("Appended {} primitives across {} tracks", report.primitive_count, report.tracks.len());
        Ok(report)
    }

    fn sequence_track<S: SequenceSource + ?Sized>(
        &self,
        sequences: &S,
        sequence_id: Option<&str>,
        cell: &RenderRect,
    ) -> (SequenceMode, TrackOutput) {
        let local = RenderRect::sized(cell.width, cell.height);
        let window = self
            .options
            .window
            .or_else(|| sequence_id.and_then(|id| sequences.length(id)).map(VisibleWindow::full));

        match window {
            Some(w) if exceeds_per_base_limit(&w, self.options.per_base_limit) => {
                log::debug!("Window {} exceeds the per-base limit, drawing overview", w);
                (SequenceMode::Overview, render_overview(&local, &self.options.style))
            }
            _ => (
                SequenceMode::PerBase,
                self.sequence_renderer
                    .render(sequences, sequence_id, &local, self.options.window),
            ),
        }
    }
}

fn append_translated<D: DrawingSurface + ?Sized>(
    surface: &mut D,
    output: &TrackOutput,
    origin: &RenderRect,
) -> Result<usize, RenderError> {
    let placed: Vec<_> = output
        .primitives
        .iter()
        .map(|p| p.translated(origin.x, origin.y))
        .collect();
    surface.append_all(&placed)
}

fn track_report(track: &str, primitive_count: usize, diagnostics: Vec<Diagnostic>) -> TrackReport {
    TrackReport {
        track: track.to_string(),
        primitive_count,
        diagnostics,
    }
}
