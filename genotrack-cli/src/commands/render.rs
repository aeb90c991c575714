//! Render command implementation - draw the sequence and transcript tracks to SVG or JSON

use anyhow::{Context, Result};
use genotrack_core::io::{load_or_empty, FastaReader, GtfReader};
use genotrack_core::{SequenceSet, Transcriptome, VisibleWindow};
use genotrack_render::vector_export::{ExportConfig, SvgSurface};
use genotrack_render::{DrawingSurface, PrimitiveList, ViewComposer, ViewReport};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::{OutputFormat, RenderArgs};

pub fn execute(config: &Config, args: RenderArgs) -> Result<()> {
    log::info!("Starting track rendering");
    log::info!("Output file: {}", args.output.display());

    let window = args.range.as_deref().map(parse_range).transpose()?;
    let format = args.format.unwrap_or_else(|| detect_output_format(&args.output));
    log::info!("Output format: {:?}", format);

    let sequences = load_sequences(args.fasta.as_deref())?;
    let transcriptome = load_transcriptome(args.gtf.as_deref())?;
    log::info!(
        "Loaded {} sequences ({} bp) and {} transcripts",
        sequences.len(),
        sequences.total_length(),
        transcriptome.len()
    );

    let mut options = config.view_options(window, args.sequence_id.clone());
    if let Some(font_size) = args.font_size {
        options.font_size = font_size;
    }
    if let Some(limit) = args.per_base_limit {
        options.per_base_limit = limit;
    }
    let width = args.width.unwrap_or(config.layout.width);
    let height = args.height.unwrap_or(config.layout.height);
    if width == 0 || height == 0 {
        return Err(CliError::validation(format!("canvas {}x{} has no area", width, height)).into());
    }

    let grid = config.grid(width, height);
    let composer = ViewComposer::new(options);

    let report = match format {
        OutputFormat::Svg => {
            let mut surface = SvgSurface::new(&ExportConfig {
                width,
                height,
                background_color: config.layout.background_color.clone(),
                provenance_comment: Some(build_provenance_comment(&args, window)),
            });
            let report = compose(&composer, &grid, &sequences, &transcriptome, &mut surface)?;
            surface
                .save(&args.output)
                .map_err(CliError::from)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            report
        }
        OutputFormat::Json => {
            let mut surface = PrimitiveList::new();
            let report = compose(&composer, &grid, &sequences, &transcriptome, &mut surface)?;
            let json = surface.to_json().map_err(CliError::from)?;
            std::fs::write(&args.output, json)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            report
        }
    };

    log_report(&report);
    log::info!("Wrote {} primitives to {}", report.primitive_count, args.output.display());
    Ok(())
}

/// Parse `START-END` (or `START..END`) and reject inverted ranges.
pub fn parse_range(range: &str) -> CliResult<VisibleWindow> {
    let window: VisibleWindow = range
        .parse()
        .map_err(|e| CliError::validation(format!("invalid range '{}': {}", range, e)))?;
    if window.is_inverted() {
        return Err(CliError::validation(format!(
            "range start {} is greater than end {}",
            window.start, window.end
        )));
    }
    Ok(window)
}

fn detect_output_format(path: &Path) -> OutputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Svg,
    }
}

fn require_file(path: &Path) -> CliResult<()> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    Ok(())
}

/// A missing path is an error; an unreadable file renders as if nothing was loaded.
pub fn load_sequences(path: Option<&Path>) -> CliResult<SequenceSet> {
    match path {
        Some(path) => {
            require_file(path)?;
            Ok(load_or_empty(FastaReader::read_file(path), "FASTA"))
        }
        None => Ok(SequenceSet::new()),
    }
}

pub fn load_transcriptome(path: Option<&Path>) -> CliResult<Transcriptome> {
    match path {
        Some(path) => {
            require_file(path)?;
            Ok(load_or_empty(GtfReader::read_file(path), "GTF"))
        }
        None => Ok(Transcriptome::new()),
    }
}

fn compose<D: DrawingSurface>(
    composer: &ViewComposer,
    grid: &genotrack_render::GridLayout,
    sequences: &SequenceSet,
    transcriptome: &Transcriptome,
    surface: &mut D,
) -> CliResult<ViewReport> {
    Ok(composer.compose(grid, sequences, transcriptome, surface)?)
}

fn log_report(report: &ViewReport) {
    for track in &report.tracks {
        for diagnostic in &track.diagnostics {
            log::warn!("{}: {}", track.track, diagnostic);
        }
        log::debug!("{}: {} primitives", track.track, track.primitive_count);
    }
}

fn build_provenance_comment(args: &RenderArgs, window: Option<VisibleWindow>) -> String {
    let describe = |p: &Option<PathBuf>| p.as_ref().map_or_else(|| "-".to_string(), |p| p.display().to_string());
    format!(
        "genotrack {}\nfasta: {}\ngtf: {}\nwindow: {}",
        env!("CARGO_PKG_VERSION"),
        describe(&args.fasta),
        describe(&args.gtf),
        window.map_or_else(|| "full".to_string(), |w| w.to_string())
    )
}
