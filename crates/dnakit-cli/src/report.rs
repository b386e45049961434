//! Runs the analyses over loaded records and renders their output.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use dnakit::{validate, KmerCounter, OpenReadingFrame, OrfScanner, Sequence, ValidationError};
use rayon::prelude::*;
use serde::Serialize;

use crate::input::Record;

/// The ORFs found in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOrfs {
    pub id: String,
    pub orfs: Vec<OpenReadingFrame>,
}

/// Validates every record, keeping input order.
pub fn validate_records(records: &[Record]) -> Vec<(&Record, Result<(), ValidationError>)> {
    records
        .par_iter()
        .map(|record| (record, validate(&record.bases)))
        .collect()
}

fn sequence_of(record: &Record) -> Result<Sequence> {
    Sequence::new(record.bases.as_str())
        .with_context(|| format!("Record {} is not a DNA sequence", record.id))
}

/// Counts k-mers across all records into one table.
pub fn count_records(records: &[Record], k: usize) -> Result<KmerCounter> {
    let counters = records
        .par_iter()
        .map(|record| -> Result<KmerCounter> {
            let seq = sequence_of(record)?;
            let mut counter = KmerCounter::new(k);
            counter.count(&seq);
            Ok(counter)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total = KmerCounter::new(k);
    for counter in &counters {
        total.merge(counter);
    }
    Ok(total)
}

/// How ORFs are filtered by length before they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthFilter {
    /// Proteins longer than this many residues, stop marker excluded.
    Protein(usize),
    /// Decoded strings longer than this, stop marker included.
    Decoded(usize),
}

impl LengthFilter {
    fn apply(self, scanner: OrfScanner<'_>) -> OrfScanner<'_> {
        match self {
            LengthFilter::Protein(len) => scanner.min_protein_len(len),
            LengthFilter::Decoded(len) => scanner.min_decoded_len(len),
        }
    }
}

/// Scans every record for ORFs that pass `filter`.
pub fn scan_records(records: &[Record], filter: LengthFilter) -> Result<Vec<RecordOrfs>> {
    records
        .par_iter()
        .map(|record| -> Result<RecordOrfs> {
            let seq = sequence_of(record)?;
            let orfs = filter
                .apply(seq.orfs())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Failed to scan record {}", record.id))?;
            tracing::debug!(id = %record.id, orfs = orfs.len(), "scanned record");
            Ok(RecordOrfs {
                id: record.id.clone(),
                orfs,
            })
        })
        .collect()
}

/// Renders validation results, one line per record.
pub fn render_validation(results: &[(&Record, Result<(), ValidationError>)]) -> String {
    let mut out = String::new();
    for (record, result) in results {
        let line = match result {
            Ok(()) => format!("{}: valid ({} bp)\n", record.id, record.bases.chars().count()),
            Err(err) => format!("{}: {}\n", record.id, err),
        };
        out.push_str(&line);
    }
    out
}

/// Renders a k-mer table: the `top` most frequent, or everything sorted
/// by k-mer when `top` is 0.
pub fn render_kmers(counter: &KmerCounter, top: usize) -> String {
    let rows = if top == 0 {
        counter.sorted()
    } else {
        counter.most_frequent(top)
    };

    let mut out = String::new();
    for (kmer, count) in rows {
        out.push_str(&format!("{kmer}\t{count}\n"));
    }
    out
}

/// Renders a k-mer table as a JSON object keyed by k-mer.
pub fn kmers_json(counter: &KmerCounter, top: usize) -> Result<String> {
    let rows = if top == 0 {
        counter.sorted()
    } else {
        counter.most_frequent(top)
    };
    let table: BTreeMap<String, u64> = rows.into_iter().collect();
    Ok(serde_json::to_string_pretty(&table)?)
}

/// Renders ORFs, with a FASTA-style header per record.
pub fn render_orfs(results: &[RecordOrfs]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&format!(">{}\n", result.id));
        for orf in &result.orfs {
            out.push_str(&format!("{orf}\n"));
        }
    }
    out
}

/// The combined k-mer and protein summary.
pub fn render_report(counter: &KmerCounter, results: &[RecordOrfs]) -> String {
    let mut out = format!("This sequence contains the following {}-mers:\n", counter.k());
    out.push_str(&render_kmers(counter, 0));

    out.push_str("This sequence has the following longer proteins encoded:\n");
    for orf in results.iter().flat_map(|result| &result.orfs) {
        out.push_str(&orf.decoded);
        out.push('\n');
    }
    out
}
