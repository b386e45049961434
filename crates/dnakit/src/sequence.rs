//! DNA sequence representation and validation.
//!
//! This module provides the [`validate`] check and the validated
//! [`Sequence`] type that the k-mer and ORF modules operate on.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::kmer::{count_kmers, KmerCounts};
use crate::orf::{all_orfs, decode_orf, DecodeError, OpenReadingFrame, OrfScanner};

/// Errors that can occur when validating raw sequence text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A character outside `{A, T, G, C}` was found.
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { position: usize, symbol: char },
}

/// Returns true if `symbol` is one of the four DNA bases.
///
/// The check is case-sensitive: lowercase bases are rejected.
#[inline]
pub fn is_dna_symbol(symbol: char) -> bool {
    matches!(symbol, 'A' | 'T' | 'G' | 'C')
}

/// Checks that `sequence` consists only of the symbols `A`, `T`, `G` and `C`.
///
/// The empty string is valid. Whitespace and lowercase letters are not.
///
/// # Examples
///
/// ```
/// use dnakit::sequence::{validate, ValidationError};
///
/// assert!(validate("ATGC").is_ok());
/// assert!(validate("").is_ok());
/// assert_eq!(
///     validate("AT GC"),
///     Err(ValidationError::InvalidSymbol { position: 2, symbol: ' ' })
/// );
/// ```
pub fn validate(sequence: &str) -> Result<(), ValidationError> {
    match sequence
        .chars()
        .enumerate()
        .find(|&(_, symbol)| !is_dna_symbol(symbol))
    {
        Some((position, symbol)) => Err(ValidationError::InvalidSymbol { position, symbol }),
        None => Ok(()),
    }
}

/// A validated DNA sequence.
///
/// The bases are stored exactly as given; construction never normalizes
/// case or strips whitespace, it only rejects.
///
/// # Examples
///
/// ```
/// use dnakit::sequence::Sequence;
///
/// let seq = Sequence::new("ATGGCTTAA").unwrap();
/// assert_eq!(seq.len(), 9);
/// assert_eq!(seq.to_string(), "ATGGCTTAA");
///
/// assert!(Sequence::new("atg").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    bases: String,
}

impl Sequence {
    /// Creates a new sequence after validating every symbol.
    pub fn new(bases: impl Into<String>) -> Result<Self, ValidationError> {
        let bases = bases.into();
        validate(&bases)?;
        Ok(Self { bases })
    }

    /// Returns a reference to the underlying bases.
    #[inline]
    pub fn bases(&self) -> &str {
        &self.bases
    }

    /// Returns the bases as raw bytes. Every byte is ASCII.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bases.as_bytes()
    }

    /// Returns the number of symbols in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Returns true if the sequence holds no symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Consumes the sequence, returning the owned bases.
    pub fn into_inner(self) -> String {
        self.bases
    }

    /// Counts the k-mers of this sequence.
    ///
    /// See [`count_kmers`] for the exact windowing rules.
    pub fn kmers(&self, k: usize) -> KmerCounts {
        count_kmers(&self.bases, k)
    }

    /// Decodes the reading frame beginning at `start`.
    pub fn decode_orf(&self, start: usize) -> Result<OpenReadingFrame, DecodeError> {
        decode_orf(self, start)
    }

    /// Returns a fresh scanner over every open reading frame.
    pub fn orfs(&self) -> OrfScanner<'_> {
        all_orfs(self)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bases)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.bases
    }
}

impl FromStr for Sequence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Sequence {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Sequence {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Sequence> for String {
    fn from(seq: Sequence) -> Self {
        seq.bases
    }
}
