//! FASTA sequence loader
//!
//! Parses FASTA (and FASTQ) input with the needletail library into a
//! [`SequenceSet`]. Gzipped files are detected by their `.gz` extension.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use anyhow::Result;
use flate2::read::GzDecoder;

use needletail::{parse_fastx_file, parse_fastx_reader};
use super::IoError;
use crate::source::{NamedSequence, SequenceSet};

pub struct FastaReader;

impl FastaReader {
    /// Parse a FASTA file into a sequence set
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<SequenceSet> {
        let path = path.as_ref();
        let set = if path.to_string_lossy().ends_with(".gz") {
            let decoder = GzDecoder::new(File::open(path)?);
            Self::read(BufReader::new(decoder))?
        } else {
            let mut reader = parse_fastx_file(path)
                .map_err(|e| IoError::Parse { line: 0, message: e.to_string() })?;
            let mut set = SequenceSet::new();
            while let Some(record) = reader.next() {
                let record = record.map_err(|e| IoError::Parse { line: 0, message: e.to_string() })?;
                set.add(Self::record_to_sequence(&record));
            }
            set
        };

        if set.is_empty() {
            return Err(IoError::EmptyFile(path.to_path_buf()).into());
        }
        log::info!(
            "Loaded {} sequence(s), {} bp from {}",
            set.len(),
            set.total_length(),
            path.display()
        );
        Ok(set)
    }

    /// Parse FASTA data from any readable source
    pub fn read<R: std::io::Read + Send>(reader: R) -> Result<SequenceSet> {
        let mut set = SequenceSet::new();
        let mut fastx_reader = parse_fastx_reader(reader)
            .map_err(|e| IoError::Parse { line: 0, message: e.to_string() })?;

        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| IoError::Parse { line: 0, message: e.to_string() })?;
            set.add(Self::record_to_sequence(&record));
        }

        Ok(set)
    }

    /// The header's first word is the id; the remainder, if any, is the description.
    fn record_to_sequence(record: &needletail::parser::SequenceRecord) -> NamedSequence {
        let header = String::from_utf8_lossy(record.id()).to_string();
        let (id, description) = match header.split_once(char::is_whitespace) {
            Some((id, rest)) => (id.to_string(), Some(rest.trim().to_string())),
            None => (header.clone(), None),
        };

        let sequence = NamedSequence::new(id, record.seq().to_vec());
        match description {
            Some(desc) if !desc.is_empty() => sequence.with_description(desc),
            _ => sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SequenceSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_multi_record_fasta() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">chr1 test virus").unwrap();
        writeln!(file, "GATTACAATTCGAGTACG").unwrap();
        writeln!(file, "ATCGATCG").unwrap();
        writeln!(file, ">chr2").unwrap();
        writeln!(file, "ACGTN").unwrap();

        let set = FastaReader::read_file(file.path()).unwrap();
        assert_eq!(set.available_sequence_ids(), vec!["chr1", "chr2"]);
        assert_eq!(set.length("chr1"), Some(26));
        assert_eq!(set.get("chr1").unwrap().description.as_deref(), Some("test virus"));
        assert_eq!(set.subsequence(1, 7, "chr1"), Some(&b"GATTACA"[..]));
        assert_eq!(set.get("chr2").unwrap().description, None);
    }

    #[test]
    fn test_read_gzipped_fasta() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let file = tempfile::Builder::new().suffix(".fa.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
        encoder.write_all(b">seq\nACGTACGT\n").unwrap();
        encoder.finish().unwrap();

        let set = FastaReader::read_file(file.path()).unwrap();
        assert_eq!(set.length("seq"), Some(8));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not a fasta file").unwrap();
        assert!(FastaReader::read_file(file.path()).is_err());
    }
}
