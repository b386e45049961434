//! dnakit - DNA sequence analysis in Rust.
//!
//! This library provides the small set of routines needed to explore a DNA
//! string:
//!
//! - Validation against the `{A, T, G, C}` alphabet
//! - K-mer counting
//! - Codon translation with the standard genetic code
//! - Open reading frame decoding and scanning
//!
//! Every function is pure and synchronous; values can be shared freely
//! across threads.
//!
//! # Example
//!
//! ```rust
//! use dnakit::sequence::Sequence;
//! use dnakit::kmer::count_kmers;
//! use dnakit::orf::all_orfs;
//!
//! let seq = Sequence::new("ATGGCTTAAATGAATTAG").unwrap();
//!
//! // Count 3-mers
//! let counts = count_kmers(seq.bases(), 3);
//! assert_eq!(counts["ATG"], 2);
//!
//! // Scan for open reading frames
//! for orf in all_orfs(&seq) {
//!     let orf = orf.unwrap();
//!     println!("{}..{}: {}", orf.start, orf.end, orf.decoded);
//! }
//! ```

pub mod codon;
pub mod kmer;
pub mod orf;
pub mod sequence;

// Re-export commonly used types for convenience
pub use codon::{translate_codon, Residue, UnknownCodon, START_CODON};
pub use kmer::{count_kmers, KmerCounter, KmerCounts};
pub use orf::{all_orfs, decode_orf, DecodeError, OpenReadingFrame, OrfScanner};
pub use sequence::{validate, Sequence, ValidationError};

/// Library version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library name and version.
pub fn version_string() -> String {
    format!("dnakit v{}", VERSION)
}
