use crate::source::TranscriptSource;
use crate::types::{CodingSegment, Exon, GenomicPos, Strand};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A transcript's exon and CDS structure on one sequence.
///
/// Exons and coding segments are kept sorted by start so that adjacent visible
/// exons are adjacent in the slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    pub sequence_id: String,
    pub gene_id: Option<String>,
    pub strand: Option<Strand>,
    exons: Vec<Exon>,
    coding_segments: Vec<CodingSegment>,
}

impl Transcript {
    pub fn new(id: String, sequence_id: String) -> Self {
        Self {
            id,
            sequence_id,
            gene_id: None,
            strand: None,
            exons: Vec::new(),
            coding_segments: Vec::new(),
        }
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn with_gene_id(mut self, gene_id: String) -> Self {
        self.gene_id = Some(gene_id);
        self
    }

    pub fn with_exons(mut self, exons: impl IntoIterator<Item = Exon>) -> Self {
        for exon in exons {
            self.add_exon(exon);
        }
        self
    }

    pub fn with_coding_segments(mut self, segments: impl IntoIterator<Item = CodingSegment>) -> Self {
        for segment in segments {
            self.add_coding_segment(segment);
        }
        self
    }

    pub fn add_exon(&mut self, exon: Exon) {
        let at = self.exons.partition_point(|e| (e.start, e.end) <= (exon.start, exon.end));
        self.exons.insert(at, exon);
    }

    pub fn add_coding_segment(&mut self, segment: CodingSegment) {
        let at = self
            .coding_segments
            .partition_point(|c| (c.start, c.end) <= (segment.start, segment.end));
        self.coding_segments.insert(at, segment);
    }

    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }
}

impl TranscriptSource for Transcript {
    fn exons(&self) -> &[Exon] {
        &self.exons
    }

    fn coding_segments(&self) -> &[CodingSegment] {
        &self.coding_segments
    }
}

/// All transcripts loaded from one annotation file, in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcriptome {
    seq_id: Option<String>,
    transcripts: Vec<Transcript>,
    index: HashMap<String, usize>,
}

impl Transcriptome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary sequence id: the sequence of the first transcript added.
    pub fn seq_id(&self) -> Option<&str> {
        self.seq_id.as_deref()
    }

    pub fn add_transcript(&mut self, transcript: Transcript) {
        if self.seq_id.is_none() {
            self.seq_id = Some(transcript.sequence_id.clone());
        }
        match self.index.get(&transcript.id) {
            Some(&i) => self.transcripts[i] = transcript,
            None => {
                self.index.insert(transcript.id.clone(), self.transcripts.len());
                self.transcripts.push(transcript);
            }
        }
    }

    /// Existing transcript with this id, or a new empty one on `sequence_id`.
    pub fn entry(&mut self, id: &str, sequence_id: &str) -> &mut Transcript {
        let i = match self.index.get(id) {
            Some(&i) => {
                let existing = &self.transcripts[i].sequence_id;
                if existing != sequence_id {
                    log::warn!(
                        "Transcript '{}' seen on '{}' and '{}', keeping it on '{}'",
                        id,
                        existing,
                        sequence_id,
                        existing
                    );
                }
                i
            }
            None => {
                self.add_transcript(Transcript::new(id.to_string(), sequence_id.to_string()));
                self.transcripts.len() - 1
            }
        };
        &mut self.transcripts[i]
    }

    pub fn get(&self, id: &str) -> Option<&Transcript> {
        self.index.get(id).map(|&i| &self.transcripts[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transcript> {
        self.transcripts.iter()
    }

    /// Transcripts annotated on `sequence_id`, in load order.
    pub fn on_sequence<'a>(&'a self, sequence_id: &'a str) -> impl Iterator<Item = &'a Transcript> + 'a {
        self.transcripts.iter().filter(move |t| t.sequence_id == sequence_id)
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    /// Largest exon end across all transcripts.
    pub fn max_end(&self) -> Option<GenomicPos> {
        self.transcripts.iter().filter_map(|t| t.span()).map(|(_, end)| end).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exons_stay_sorted() {
        let t = Transcript::new("tx1".into(), "chr1".into())
            .with_exons([Exon::new(400, 500), Exon::new(100, 200), Exon::new(250, 300)]);
        let starts: Vec<_> = t.exons().iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![100, 250, 400]);
        assert_eq!(t.span(), Some((100, 500)));
    }

    #[test]
    fn test_span_without_exons_is_none() {
        let t = Transcript::new("tx1".into(), "chr1".into())
            .with_coding_segments([CodingSegment::new(10, 20)]);
        assert_eq!(t.span(), None);
        assert_eq!(t.coding_segments().len(), 1);
    }

    #[test]
    fn test_transcriptome_entry_and_seq_id() {
        let mut tome = Transcriptome::new();
        assert_eq!(tome.seq_id(), None);

        tome.entry("tx1", "chr1").add_exon(Exon::new(1, 10));
        tome.entry("tx2", "chr2").add_exon(Exon::new(5, 80));
        tome.entry("tx1", "chr1").add_exon(Exon::new(20, 30));

        assert_eq!(tome.len(), 2);
        assert_eq!(tome.seq_id(), Some("chr1"));
        assert_eq!(tome.get("tx1").map(|t| t.exon_count()), Some(2));
        assert_eq!(tome.on_sequence("chr2").count(), 1);
        assert_eq!(tome.max_end(), Some(80));
    }

    #[test]
    fn test_entry_on_another_sequence_keeps_first() {
        let mut tome = Transcriptome::new();
        tome.entry("tx1", "chr1").add_exon(Exon::new(1, 10));
        tome.entry("tx1", "chr2").add_exon(Exon::new(20, 30));

        assert_eq!(tome.len(), 1);
        let t = tome.get("tx1").unwrap();
        assert_eq!(t.sequence_id, "chr1");
        assert_eq!(t.exon_count(), 2);
        assert_eq!(tome.on_sequence("chr2").count(), 0);
    }
}
