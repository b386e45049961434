//! Codon translation with the standard genetic code (NCBI table 1).

use std::fmt;

use thiserror::Error;

/// The codon that opens a reading frame.
pub const START_CODON: &str = "ATG";

/// Residues of the standard genetic code, `*` marking stop codons.
///
/// Codons are ordered with bases ranked `T, C, A, G`, first base most
/// significant: `TTT, TTC, TTA, TTG, TCT, ...`.
static STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// The translation of a single codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Residue {
    /// A one-letter amino acid code.
    Amino(char),
    /// One of the stop codons `TAA`, `TAG` or `TGA`.
    Stop,
}

impl Residue {
    /// The symbol written to a decoded protein string. `Stop` renders as `*`.
    pub fn symbol(self) -> char {
        match self {
            Residue::Amino(symbol) => symbol,
            Residue::Stop => '*',
        }
    }

    /// Returns true for [`Residue::Stop`].
    pub fn is_stop(self) -> bool {
        self == Residue::Stop
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Returned when a codon contains a byte outside `{A, T, G, C}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown codon {}", String::from_utf8_lossy(.codon))]
pub struct UnknownCodon {
    pub codon: [u8; 3],
}

#[inline]
fn base_rank(base: u8) -> Option<usize> {
    match base {
        b'T' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

/// Translates one codon using the standard genetic code.
///
/// Only uppercase DNA bases are accepted. Codons taken from a validated
/// [`Sequence`](crate::sequence::Sequence) always translate.
///
/// # Examples
///
/// ```
/// use dnakit::codon::{translate_codon, Residue};
///
/// assert_eq!(translate_codon(*b"ATG"), Ok(Residue::Amino('M')));
/// assert_eq!(translate_codon(*b"TGA"), Ok(Residue::Stop));
/// assert!(translate_codon(*b"AUG").is_err());
/// ```
pub fn translate_codon(codon: [u8; 3]) -> Result<Residue, UnknownCodon> {
    let index = match (base_rank(codon[0]), base_rank(codon[1]), base_rank(codon[2])) {
        (Some(first), Some(second), Some(third)) => first * 16 + second * 4 + third,
        _ => return Err(UnknownCodon { codon }),
    };

    Ok(match STANDARD_CODE[index] {
        b'*' => Residue::Stop,
        amino => Residue::Amino(char::from(amino)),
    })
}

/// Returns true if `codon` is [`START_CODON`].
pub fn is_start_codon(codon: &[u8]) -> bool {
    codon == START_CODON.as_bytes()
}
