//! Loaders for the sequence and annotation inputs.
//!
//! Each loader either returns a fully populated model or an error; a partly
//! read file is never handed to the renderers. Callers that want the viewer to
//! keep going after a bad upload use [`load_or_empty`], which logs the failure
//! and substitutes an empty model.

#[cfg(feature = "io-fasta")] pub mod fasta;
#[cfg(feature = "io-gtf")] pub mod gtf;

#[cfg(feature = "io-fasta")] pub use fasta::FastaReader;
#[cfg(feature = "io-gtf")] pub use gtf::GtfReader;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Missing attribute '{key}' at line {line}")]
    MissingAttribute { line: usize, key: String },
    #[error("Empty file or no records found: {0}")]
    EmptyFile(PathBuf),
}

/// Unwrap a loader result, falling back to an empty model on failure.
pub fn load_or_empty<T: Default>(result: anyhow::Result<T>, what: &str) -> T {
    match result {
        Ok(model) => model,
        Err(e) => {
            log::error!("Unable to load {}: {:#}", what, e);
            T::default()
        }
    }
}

/// Open a file, transparently decompressing `.gz` input.
#[cfg(feature = "io-gtf")]
pub(crate) fn open_maybe_gz(path: &std::path::Path) -> std::io::Result<Box<dyn std::io::BufRead>> {
    use flate2::read::GzDecoder;
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path)?;
    if path.to_string_lossy().ends_with(".gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceSet;

    #[test]
    fn test_load_or_empty_substitutes_default() {
        let failed: anyhow::Result<SequenceSet> = Err(anyhow::anyhow!("bad fasta"));
        assert!(load_or_empty(failed, "FASTA").is_empty());
    }

    #[test]
    fn test_error_messages() {
        let err = IoError::Parse { line: 3, message: "bad start".into() };
        assert_eq!(err.to_string(), "Parse error at line 3: bad start");
        let err = IoError::MissingAttribute { line: 7, key: "transcript_id".into() };
        assert_eq!(err.to_string(), "Missing attribute 'transcript_id' at line 7");
    }
}
