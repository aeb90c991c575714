//! GTF annotation loader
//!
//! Reads `exon` and `CDS` records and groups them into transcripts by their
//! `transcript_id` attribute. Other feature types (gene, transcript,
//! start_codon, ...) are skipped.

use std::io::BufRead;
use std::path::Path;
use anyhow::Result;

use super::{open_maybe_gz, IoError};
use crate::transcriptome::Transcriptome;
use crate::types::{CodingSegment, Exon, GenomicPos, Strand};

pub struct GtfReader;

/// One parsed exon or CDS line.
#[derive(Debug, Clone, PartialEq)]
struct GtfRecord {
    seqname: String,
    feature_type: String,
    start: GenomicPos,
    end: GenomicPos,
    strand: Option<Strand>,
    phase: Option<u8>,
    transcript_id: String,
    gene_id: Option<String>,
}

impl GtfReader {
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Transcriptome> {
        let path = path.as_ref();
        let transcriptome = Self::read(open_maybe_gz(path)?)?;
        if transcriptome.is_empty() {
            return Err(IoError::EmptyFile(path.to_path_buf()).into());
        }
        log::info!("Loaded {} transcript(s) from {}", transcriptome.len(), path.display());
        Ok(transcriptome)
    }

    pub fn read<R: BufRead>(reader: R) -> Result<Transcriptome> {
        let mut transcriptome = Transcriptome::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(IoError::from)?;
            let line = line.trim_end();

            // Skip comments and empty lines
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(record) = Self::parse_line(line, i + 1)? else {
                continue;
            };

            let transcript = transcriptome.entry(&record.transcript_id, &record.seqname);
            if transcript.strand.is_none() {
                transcript.strand = record.strand;
            }
            if transcript.gene_id.is_none() {
                transcript.gene_id = record.gene_id.clone();
            }
            if record.feature_type == "exon" {
                transcript.add_exon(Exon::new(record.start, record.end));
            } else {
                let segment = CodingSegment::new(record.start, record.end);
                transcript.add_coding_segment(match record.phase {
                    Some(phase) => segment.with_phase(phase),
                    None => segment,
                });
            }
        }

        Ok(transcriptome)
    }

    /// Parse one data line. Returns `None` for feature types that are not drawn.
    fn parse_line(line: &str, line_no: usize) -> Result<Option<GtfRecord>, IoError> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() != 9 {
            return Err(IoError::Parse {
                line: line_no,
                message: format!("GTF line must have 9 tab-separated fields, found {}", fields.len()),
            });
        }

        let feature_type = fields[2];
        if feature_type != "exon" && feature_type != "CDS" {
            return Ok(None);
        }

        let parse_pos = |s: &str, name: &str| -> Result<GenomicPos, IoError> {
            s.parse().map_err(|_| IoError::Parse {
                line: line_no,
                message: format!("invalid {} coordinate '{}'", name, s),
            })
        };
        let start = parse_pos(fields[3], "start")?;
        let end = parse_pos(fields[4], "end")?;
        if start == 0 || start > end {
            return Err(IoError::Parse {
                line: line_no,
                message: format!("interval {}-{} is not a valid 1-based range", start, end),
            });
        }

        let phase = match fields[7] {
            "." => None,
            p => Some(p.parse::<u8>().map_err(|_| IoError::Parse {
                line: line_no,
                message: format!("invalid phase '{}'", p),
            })?),
        };

        let attributes = parse_attributes(fields[8]);
        let transcript_id = attributes
            .iter()
            .find(|(k, _)| *k == "transcript_id")
            .map(|(_, v)| v.to_string())
            .ok_or_else(|| IoError::MissingAttribute { line: line_no, key: "transcript_id".to_string() })?;
        let gene_id = attributes
            .iter()
            .find(|(k, _)| *k == "gene_id")
            .map(|(_, v)| v.to_string());

        Ok(Some(GtfRecord {
            seqname: fields[0].to_string(),
            feature_type: feature_type.to_string(),
            start,
            end,
            strand: Strand::from_column(fields[6]),
            phase,
            transcript_id,
            gene_id,
        }))
    }
}

/// Split `key "value"; key "value";` into pairs, unquoting values.
fn parse_attributes(column: &str) -> Vec<(&str, &str)> {
    column
        .split(';')
        .filter_map(|attr| {
            let (key, value) = attr.trim().split_once(char::is_whitespace)?;
            Some((key, value.trim().trim_matches('"')))
        })
        .collect()
}
