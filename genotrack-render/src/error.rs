//! Rendering faults and non-fatal track diagnostics

use genotrack_core::VisibleWindow;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::primitive::PrimitiveRole;

/// Faults that abort a render pass or export.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid geometry for {role}: {message}")]
    InvalidGeometry { role: String, message: String },

    #[error("Export error: {0}")]
    Export(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RenderError {
    pub fn invalid_geometry<S: Into<String>>(role: PrimitiveRole, message: S) -> Self {
        Self::InvalidGeometry {
            role: role.class_name().to_string(),
            message: message.into(),
        }
    }
}

/// Why a track drew nothing. These are expected conditions, reported to the
/// caller alongside the (empty) output instead of as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No sequence id could be resolved for the view
    NoSequenceId,
    /// No sequences are loaded at all
    NoSequenceData,
    SequenceNotFound { sequence_id: String },
    /// The window does not overlap the sequence
    EmptyRange { window: VisibleWindow },
    /// Transcript without exons; its span is undefined
    EmptyTranscript,
    ZeroGenomeLength,
    DegenerateRectangle { width: f64, height: f64 },
    /// The geometry provider has no such cell
    MissingCell { row: usize, col: usize },
}

impl Diagnostic {
    /// Missing input data, as opposed to unusable geometry. An exon-less
    /// transcript counts as missing data.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            Diagnostic::NoSequenceId
                | Diagnostic::NoSequenceData
                | Diagnostic::SequenceNotFound { .. }
                | Diagnostic::EmptyRange { .. }
                | Diagnostic::EmptyTranscript
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoSequenceId => write!(f, "No sequence ID provided"),
            Diagnostic::NoSequenceData => write!(f, "No sequences available"),
            Diagnostic::SequenceNotFound { sequence_id } => write!(f, "Sequence '{}' is not loaded", sequence_id),
            Diagnostic::EmptyRange { window } => write!(f, "Window {} has no bases to draw", window),
            Diagnostic::EmptyTranscript => write!(f, "Transcript has no exons"),
            Diagnostic::ZeroGenomeLength => write!(f, "Genome length is zero"),
            Diagnostic::DegenerateRectangle { width, height } => {
                write!(f, "Track area {}x{} is too small to draw into", width, height)
            }
            Diagnostic::MissingCell { row, col } => write!(f, "No layout cell at row {}, column {}", row, col),
        }
    }
}
