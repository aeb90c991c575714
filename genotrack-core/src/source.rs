//! Read-only data sources consumed by the track renderers, and the in-memory
//! sequence collection that backs the sequence source.

use crate::types::{CodingSegment, Exon, GenomicFeature, GenomicPos};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Access to reference sequences by id.
pub trait SequenceSource {
    /// Length of the sequence, or `None` when the id is not loaded.
    fn length(&self, sequence_id: &str) -> Option<GenomicPos>;

    /// Bases in `[start, end]` (1-based, inclusive), clamped to the sequence.
    /// An inverted or out-of-range request yields an empty slice; an unknown id yields `None`.
    fn subsequence(&self, start: GenomicPos, end: GenomicPos, sequence_id: &str) -> Option<&[u8]>;

    fn available_sequence_ids(&self) -> Vec<&str>;

    fn has_sequences(&self) -> bool {
        !self.available_sequence_ids().is_empty()
    }
}

/// Exon and CDS structure of a single transcript.
pub trait TranscriptSource {
    fn exons(&self) -> &[Exon];
    fn coding_segments(&self) -> &[CodingSegment];

    /// `[min exon start, max exon end]`, or `None` without exons.
    fn span(&self) -> Option<(GenomicPos, GenomicPos)> {
        let exons = self.exons();
        let start = exons.iter().map(|e| e.start()).min()?;
        let end = exons.iter().map(|e| e.end()).max()?;
        Some((start, end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSequence {
    pub id: String,
    pub description: Option<String>,
    pub data: Vec<u8>,
}

impl NamedSequence {
    pub fn new(id: String, data: Vec<u8>) -> Self {
        Self { id, description: None, data }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> GenomicPos {
        self.data.len() as GenomicPos
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Sequences in load order with an id index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceSet {
    sequences: Vec<NamedSequence>,
    index: HashMap<String, usize>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sequence. A repeated id replaces the earlier record in place.
    pub fn add(&mut self, sequence: NamedSequence) {
        if let Some(&i) = self.index.get(&sequence.id) {
            log::warn!("Duplicate sequence id '{}', keeping the last record", sequence.id);
            self.sequences[i] = sequence;
            return;
        }
        self.index.insert(sequence.id.clone(), self.sequences.len());
        self.sequences.push(sequence);
    }

    pub fn get(&self, id: &str) -> Option<&NamedSequence> {
        self.index.get(id).map(|&i| &self.sequences[i])
    }

    pub fn first(&self) -> Option<&NamedSequence> {
        self.sequences.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedSequence> {
        self.sequences.iter()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn total_length(&self) -> GenomicPos {
        self.sequences.iter().map(|s| s.len()).sum()
    }
}

impl FromIterator<NamedSequence> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = NamedSequence>>(iter: I) -> Self {
        let mut set = SequenceSet::new();
        for sequence in iter {
            set.add(sequence);
        }
        set
    }
}

impl SequenceSource for SequenceSet {
    fn length(&self, sequence_id: &str) -> Option<GenomicPos> {
        self.get(sequence_id).map(|s| s.len())
    }

    fn subsequence(&self, start: GenomicPos, end: GenomicPos, sequence_id: &str) -> Option<&[u8]> {
        let sequence = self.get(sequence_id)?;
        let len = sequence.len();
        let start = start.max(1);
        let end = end.min(len);
        if start > end {
            return Some(&[]);
        }
        Some(&sequence.data[(start - 1) as usize..end as usize])
    }

    fn available_sequence_ids(&self) -> Vec<&str> {
        self.sequences.iter().map(|s| s.id.as_str()).collect()
    }
}
