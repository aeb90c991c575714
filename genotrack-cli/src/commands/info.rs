//! Info command implementation - summarize loaded sequences and transcripts

use anyhow::Result;
use genotrack_core::{GenomicPos, SequenceSet, TranscriptSource, Transcriptome};
use serde::Serialize;
use std::path::PathBuf;

use super::render::{load_sequences, load_transcriptome};

#[derive(Debug, Serialize)]
pub struct SequenceSummary {
    pub id: String,
    pub length: GenomicPos,
}

#[derive(Debug, Serialize)]
pub struct TranscriptSummary {
    pub id: String,
    pub sequence_id: String,
    pub gene_id: Option<String>,
    pub strand: Option<char>,
    pub exons: usize,
    pub coding_segments: usize,
    pub span: Option<(GenomicPos, GenomicPos)>,
}

#[derive(Debug, Serialize)]
pub struct InputSummary {
    pub sequences: Vec<SequenceSummary>,
    pub transcripts: Vec<TranscriptSummary>,
}

impl InputSummary {
    pub fn new(sequences: &SequenceSet, transcriptome: &Transcriptome) -> Self {
        Self {
            sequences: sequences
                .iter()
                .map(|s| SequenceSummary {
                    id: s.id.clone(),
                    length: s.len(),
                })
                .collect(),
            transcripts: transcriptome
                .iter()
                .map(|t| TranscriptSummary {
                    id: t.id.clone(),
                    sequence_id: t.sequence_id.clone(),
                    gene_id: t.gene_id.clone(),
                    strand: t.strand.map(char::from),
                    exons: t.exons().len(),
                    coding_segments: t.coding_segments().len(),
                    span: t.span(),
                })
                .collect(),
        }
    }

    fn to_text(&self) -> String {
        let mut out = format!("Sequences: {}\n", self.sequences.len());
        for s in &self.sequences {
            out.push_str(&format!("  {}\t{} bp\n", s.id, s.length));
        }
        out.push_str(&format!("Transcripts: {}\n", self.transcripts.len()));
        for t in &self.transcripts {
            let span = t.span.map_or_else(|| "-".to_string(), |(s, e)| format!("{}-{}", s, e));
            out.push_str(&format!(
                "  {}\t{}:{}\t{}\t{} exons\t{} CDS\n",
                t.id,
                t.sequence_id,
                span,
                t.strand.unwrap_or('.'),
                t.exons,
                t.coding_segments
            ));
        }
        out
    }
}

pub fn execute(fasta: Option<PathBuf>, gtf: Option<PathBuf>, json: bool) -> Result<()> {
    let sequences = load_sequences(fasta.as_deref())?;
    let transcriptome = load_transcriptome(gtf.as_deref())?;
    let summary = InputSummary::new(&sequences, &transcriptome);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.to_text());
    }
    Ok(())
}
