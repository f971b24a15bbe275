//! Per-line charset detection across a whole buffer

use std::collections::BTreeSet;

use crate::charset::{CandidateList, Charset, ConvertError};
use crate::newline::split_lines;

/// The set of charsets observed across the lines of a buffer.
///
/// Deduplicated and order-insensitive. Lines that resolved as plain ASCII
/// are never counted: 7-bit content is not evidence of needing any
/// particular charset, so a pure-ASCII file yields an empty report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetectionReport {
    charsets: BTreeSet<Charset>,
}

impl DetectionReport {
    /// Two or more distinct charsets: the file mixes encodings across lines
    /// and needs conversion to normalize it
    pub fn is_mixed(&self) -> bool {
        self.charsets.len() > 1
    }

    /// Zero or one distinct charset: uniformly encoded, or pure ASCII
    pub fn is_uniform(&self) -> bool {
        !self.is_mixed()
    }

    /// Whether the given charset was observed
    pub fn contains(&self, charset: Charset) -> bool {
        self.charsets.contains(&charset)
    }

    /// Number of distinct charsets observed
    pub fn len(&self) -> usize {
        self.charsets.len()
    }

    /// True when no line needed more than ASCII
    pub fn is_empty(&self) -> bool {
        self.charsets.is_empty()
    }

    /// The observed charsets, in a stable order
    pub fn charsets(&self) -> impl Iterator<Item = Charset> + '_ {
        self.charsets.iter().copied()
    }
}

/// Analyzes which charsets a buffer uses, without converting it
#[derive(Debug, Clone)]
pub struct Detector {
    candidates: CandidateList,
}

impl Detector {
    /// Create a detector with the default candidate list
    pub fn new() -> Self {
        Self {
            candidates: CandidateList::default(),
        }
    }

    /// Replace the candidate list used to resolve each line
    pub fn with_candidates(mut self, candidates: CandidateList) -> Self {
        self.candidates = candidates;
        self
    }

    /// Resolve every line and report the distinct charsets in use.
    ///
    /// A line no candidate can decode is fatal here too: reporting charsets
    /// for a buffer the converter would refuse would be misleading.
    pub fn detect(&self, input: &[u8]) -> Result<DetectionReport, ConvertError> {
        let mut charsets = BTreeSet::new();
        for (line_index, line) in split_lines(input).into_iter().enumerate() {
            let (charset, _) = self.candidates.resolve(line).ok_or_else(|| {
                ConvertError::UndecodableLine {
                    line_index,
                    raw_bytes: line.to_vec(),
                }
            })?;
            if charset != Charset::Ascii {
                charsets.insert(charset);
            }
        }
        Ok(DetectionReport { charsets })
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
