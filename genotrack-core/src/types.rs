use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 1-based genomic position.
pub type GenomicPos = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse a GTF/GFF strand column. `.` and `?` carry no strand.
    pub fn from_column(c: &str) -> Option<Self> {
        match c {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// The genomic interval chosen for display, 1-based and inclusive on both ends.
///
/// Nothing here forces `start <= end` or keeps the window inside a sequence;
/// renderers clamp at the point of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub start: GenomicPos,
    pub end: GenomicPos,
}

impl VisibleWindow {
    pub fn new(start: GenomicPos, end: GenomicPos) -> Self {
        Self { start, end }
    }

    /// Window covering a whole sequence of `length` bases.
    pub fn full(length: GenomicPos) -> Self {
        Self { start: 1, end: length }
    }

    /// Distance between the endpoints, `end - start`. This is the quantity the
    /// per-base density limit is compared against.
    pub fn span(&self) -> GenomicPos {
        self.end.saturating_sub(self.start)
    }

    /// Number of positions covered, `end - start + 1`, or zero for an inverted window.
    pub fn base_count(&self) -> u64 {
        if self.is_inverted() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, pos: GenomicPos) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// Clamp into `[1, length]`. The result may be inverted when the window lies
    /// entirely past the end of the sequence.
    pub fn clamp_to(&self, length: GenomicPos) -> Self {
        Self {
            start: self.start.max(1),
            end: self.end.min(length),
        }
    }
}

impl fmt::Display for VisibleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseWindowError {
    #[error("expected START-END or START..END, got '{0}'")]
    Syntax(String),
    #[error("invalid position '{0}'")]
    Position(String),
}

impl FromStr for VisibleWindow {
    type Err = ParseWindowError;

    /// Accepts `100-200`, `100..200` and thousands separators such as `1,000-2,000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (start, end) = trimmed
            .split_once("..")
            .or_else(|| trimmed.split_once('-'))
            .ok_or_else(|| ParseWindowError::Syntax(s.to_string()))?;

        let parse = |part: &str| -> Result<GenomicPos, ParseWindowError> {
            let cleaned: String = part.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
            cleaned
                .parse::<GenomicPos>()
                .map_err(|_| ParseWindowError::Position(part.trim().to_string()))
        };

        Ok(Self::new(parse(start)?, parse(end)?))
    }
}

/// Anything with a 1-based inclusive genomic extent.
pub trait GenomicFeature {
    fn start(&self) -> GenomicPos;
    fn end(&self) -> GenomicPos;

    fn length(&self) -> GenomicPos {
        self.end().saturating_sub(self.start()) + 1
    }

    fn overlaps(&self, start: GenomicPos, end: GenomicPos) -> bool {
        self.start() <= end && start <= self.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exon {
    pub start: GenomicPos,
    pub end: GenomicPos,
}

impl Exon {
    pub fn new(start: GenomicPos, end: GenomicPos) -> Self {
        Self { start, end }
    }
}

impl GenomicFeature for Exon {
    fn start(&self) -> GenomicPos {
        self.start
    }

    fn end(&self) -> GenomicPos {
        self.end
    }
}

/// Protein-coding part of an exon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodingSegment {
    pub start: GenomicPos,
    pub end: GenomicPos,
    /// Bases to skip before the first complete codon (GTF column 8)
    pub phase: Option<u8>,
}

impl CodingSegment {
    pub fn new(start: GenomicPos, end: GenomicPos) -> Self {
        Self { start, end, phase: None }
    }

    pub fn with_phase(mut self, phase: u8) -> Self {
        self.phase = Some(phase);
        self
    }
}

impl GenomicFeature for CodingSegment {
    fn start(&self) -> GenomicPos {
        self.start
    }

    fn end(&self) -> GenomicPos {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_counts() {
        let w = VisibleWindow::new(1, 50);
        assert_eq!(w.span(), 49);
        assert_eq!(w.base_count(), 50);
        assert!(w.contains(1) && w.contains(50) && !w.contains(51));

        let inverted = VisibleWindow::new(10, 5);
        assert!(inverted.is_inverted());
        assert_eq!(inverted.base_count(), 0);
        assert_eq!(inverted.span(), 0);
    }

    #[test]
    fn test_window_clamp() {
        assert_eq!(VisibleWindow::new(0, 500).clamp_to(120), VisibleWindow::new(1, 120));
        assert_eq!(VisibleWindow::new(20, 40).clamp_to(120), VisibleWindow::new(20, 40));
        assert!(VisibleWindow::new(200, 300).clamp_to(120).is_inverted());
    }

    #[test]
    fn test_window_parse() {
        assert_eq!("100-200".parse::<VisibleWindow>().unwrap(), VisibleWindow::new(100, 200));
        assert_eq!("1,000..2,500".parse::<VisibleWindow>().unwrap(), VisibleWindow::new(1000, 2500));
        assert_eq!(" 5 - 9 ".parse::<VisibleWindow>().unwrap(), VisibleWindow::new(5, 9));
        assert!(matches!("100".parse::<VisibleWindow>(), Err(ParseWindowError::Syntax(_))));
        assert!(matches!("a-9".parse::<VisibleWindow>(), Err(ParseWindowError::Position(_))));
    }

    #[test]
    fn test_feature_overlap_and_length() {
        let exon = Exon::new(100, 200);
        assert_eq!(exon.length(), 101);
        assert!(exon.overlaps(200, 300));
        assert!(exon.overlaps(1, 100));
        assert!(!exon.overlaps(201, 300));

        let cds = CodingSegment::new(120, 180).with_phase(2);
        assert_eq!(cds.phase, Some(2));
        assert_eq!(cds.length(), 61);
    }

    #[test]
    fn test_strand_column() {
        assert_eq!(Strand::from_column("+"), Some(Strand::Forward));
        assert_eq!(Strand::from_column("-"), Some(Strand::Reverse));
        assert_eq!(Strand::from_column("."), None);
        assert_eq!(char::from(Strand::Reverse), '-');
    }
}
