/*!
# GenoTrack Rendering Pipeline

Maps genomic positions to pixels and turns a sequence and its transcripts into
a closed set of drawable primitives for a fixed-size canvas.

## Architecture

Rendering happens in two layers:
1. **Track renderers**: pure functions from data, a cell rectangle and an
   optional window to an ordered primitive list in track-local coordinates.
   The sequence track draws per-base glyphs over a slot-centered axis; the
   transcript track draws exons, introns and coding segments proportionally
   over the genome length.
2. **Composition**: [`ViewComposer`] resolves the sequence and genome length,
   chooses per-base or overview drawing, places tracks into grid cells and
   appends canvas-space primitives to a [`DrawingSurface`].

Missing data and unusable geometry are reported as [`Diagnostic`]s next to
the (empty) output, never as errors.
*/

pub mod clip;
pub mod composer;
pub mod coords;
pub mod error;
pub mod layout;
pub mod palette;
pub mod primitive;
pub mod sequence_track;
pub mod surface;
pub mod transcript_track;
#[cfg(feature = "vector-export")]
pub mod vector_export;

pub use clip::{display_width, ClippedFeature, FeatureClipper, MIN_FEATURE_WIDTH};
pub use composer::{SequenceMode, TrackReport, ViewComposer, ViewOptions, ViewReport};
pub use coords::{map_position, per_base_x, proportional_x, MappingMode, PerBaseScale};
pub use error::{Diagnostic, RenderError};
pub use layout::{GeometryProvider, GridLayout, RenderRect};
pub use palette::{BasePalette, TrackStyle};
pub use primitive::{DrawablePrimitive, LinePrimitive, PrimitiveRole, RectanglePrimitive, TextGlyph, TrackOutput};
pub use sequence_track::SequenceTrackRenderer;
pub use surface::{DrawingSurface, PrimitiveList};
pub use transcript_track::TranscriptTrackRenderer;
#[cfg(feature = "vector-export")]
pub use vector_export::{ExportConfig, SvgSurface};
