//! Open reading frame decoding and scanning.
//!
//! [`decode_orf`] translates codons from a fixed offset until a stop codon
//! or the end of the sequence. [`all_orfs`] walks a sequence looking for
//! start codons and decodes a frame at each one it reaches.

use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::codon::{is_start_codon, translate_codon, Residue};
use crate::sequence::Sequence;

/// Errors that can occur while decoding a reading frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// One or two symbols were left over before a stop codon was reached.
    #[error("Incomplete trailing codon: {remaining} symbol(s) left at offset {offset}")]
    IncompleteTrailingCodon { offset: usize, remaining: usize },
}

/// A decoded open reading frame.
///
/// `end` is one past the last consumed symbol, stop codon included.
/// `decoded` holds one symbol per consumed codon and ends in `*` exactly
/// when decoding stopped at a stop codon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OpenReadingFrame {
    pub start: usize,
    pub end: usize,
    pub decoded: String,
}

impl OpenReadingFrame {
    /// Number of codons consumed, the stop codon included.
    pub fn codon_count(&self) -> usize {
        (self.end - self.start) / 3
    }

    /// Returns true if the frame ended at a stop codon.
    pub fn is_terminated(&self) -> bool {
        self.decoded.ends_with(Residue::Stop.symbol())
    }

    /// The amino acid chain without the trailing stop marker.
    pub fn protein(&self) -> &str {
        self.decoded
            .strip_suffix(Residue::Stop.symbol())
            .unwrap_or(&self.decoded)
    }
}

impl fmt::Display for OpenReadingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} {}", self.start, self.end, self.decoded)
    }
}

/// Decodes the reading frame of `sequence` that begins at `start`.
///
/// Codons are consumed three symbols at a time. Decoding ends successfully
/// at the first stop codon (recorded as `*`) or when the sequence runs out
/// exactly on a codon boundary. A leftover of one or two symbols before
/// either happens is a [`DecodeError::IncompleteTrailingCodon`].
///
/// A `start` past the end of the sequence leaves nothing to decode and
/// yields an empty frame ending at `start`.
///
/// # Examples
///
/// ```
/// use dnakit::orf::decode_orf;
/// use dnakit::sequence::Sequence;
///
/// let orf = decode_orf(&Sequence::new("GCTTAA").unwrap(), 0).unwrap();
/// assert_eq!((orf.start, orf.end, orf.decoded.as_str()), (0, 6, "A*"));
///
/// assert!(decode_orf(&Sequence::new("GT").unwrap(), 0).is_err());
/// ```
pub fn decode_orf(sequence: &Sequence, start: usize) -> Result<OpenReadingFrame, DecodeError> {
    let bytes = sequence.as_bytes();
    let tail = bytes.get(start..).unwrap_or_default();

    let mut decoded = String::with_capacity(tail.len() / 3 + 1);
    let mut codons = tail.chunks_exact(3);
    let mut end = start;

    for codon in codons.by_ref() {
        let codon = [codon[0], codon[1], codon[2]];
        let residue = translate_codon(codon)
            .unwrap_or_else(|err| unreachable!("validated sequence produced {err}"));
        decoded.push(residue.symbol());
        end += 3;
        if residue.is_stop() {
            return Ok(OpenReadingFrame { start, end, decoded });
        }
    }

    let remaining = codons.remainder().len();
    if remaining > 0 {
        debug!(start, offset = end, remaining, "reading frame ends mid-codon");
        return Err(DecodeError::IncompleteTrailingCodon { offset: end, remaining });
    }

    Ok(OpenReadingFrame { start, end, decoded })
}

/// Returns a lazy scanner over the open reading frames of `sequence`.
///
/// Each call starts a fresh scan from offset 0.
///
/// # Examples
///
/// ```
/// use dnakit::orf::all_orfs;
/// use dnakit::sequence::Sequence;
///
/// let seq = Sequence::new("ATGGCTTAAATGAATTAG").unwrap();
/// let decoded: Vec<String> = all_orfs(&seq)
///     .map(|orf| orf.map(|orf| orf.decoded))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(decoded, ["MA*", "MN*"]);
/// ```
pub fn all_orfs(sequence: &Sequence) -> OrfScanner<'_> {
    OrfScanner::new(sequence)
}

/// Cursor-based iterator over the open reading frames of a sequence.
///
/// The cursor moves one symbol at a time until it sits on a start codon,
/// decodes a frame there and then jumps to the frame's end, so emitted
/// frames never overlap. If a frame fails to decode the error is yielded
/// and the scan is over.
#[derive(Debug, Clone)]
pub struct OrfScanner<'a> {
    sequence: &'a Sequence,
    cursor: usize,
    min_len: Option<MinLength>,
    finished: bool,
}

#[derive(Debug, Clone, Copy)]
enum MinLength {
    Protein(usize),
    Decoded(usize),
}

impl<'a> OrfScanner<'a> {
    /// Creates a scanner positioned at the start of `sequence`.
    pub fn new(sequence: &'a Sequence) -> Self {
        Self {
            sequence,
            cursor: 0,
            min_len: None,
            finished: false,
        }
    }

    /// Only yield frames whose protein is longer than `len` residues.
    ///
    /// Skipped frames still advance the cursor past their end. Errors are
    /// always yielded.
    pub fn min_protein_len(mut self, len: usize) -> Self {
        self.min_len = Some(MinLength::Protein(len));
        self
    }

    /// Only yield frames whose decoded string, stop marker included, is
    /// longer than `len`.
    ///
    /// Replaces any earlier length filter.
    pub fn min_decoded_len(mut self, len: usize) -> Self {
        self.min_len = Some(MinLength::Decoded(len));
        self
    }

    /// The offset the next search starts from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn keeps(&self, orf: &OpenReadingFrame) -> bool {
        match self.min_len {
            None => true,
            Some(MinLength::Protein(min)) => orf.protein().len() > min,
            Some(MinLength::Decoded(min)) => orf.decoded.len() > min,
        }
    }
}

impl Iterator for OrfScanner<'_> {
    type Item = Result<OpenReadingFrame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let sequence = self.sequence;
        let bytes = sequence.as_bytes();
        while self.cursor < bytes.len() {
            let window = &bytes[self.cursor..bytes.len().min(self.cursor + 3)];
            if !is_start_codon(window) {
                self.cursor += 1;
                continue;
            }

            match decode_orf(sequence, self.cursor) {
                Ok(orf) => {
                    self.cursor = orf.end;
                    if self.keeps(&orf) {
                        trace!(start = orf.start, end = orf.end, "open reading frame");
                        return Some(Ok(orf));
                    }
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }

        self.finished = true;
        None
    }
}

impl FusedIterator for OrfScanner<'_> {}
