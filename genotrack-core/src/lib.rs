//! GenoTrack Core Library
//!
//! Genomic windows, feature and transcript models, the source traits consumed by
//! the renderers, and the FASTA/GTF loaders that populate them.

pub mod types;
pub mod source;
pub mod transcriptome;
pub mod io;

// Re-export commonly used types and functions
pub use types::{CodingSegment, Exon, GenomicFeature, GenomicPos, ParseWindowError, Strand, VisibleWindow};
pub use source::{NamedSequence, SequenceSet, SequenceSource, TranscriptSource};
pub use transcriptome::{Transcript, Transcriptome};

/// Version information for the GenoTrack core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
