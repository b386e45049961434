//! Reading sequences from the command line or from files.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Id given to sequences that carry no FASTA header.
pub const DEFAULT_ID: &str = "input";

/// One named, not yet validated, sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub bases: String,
}

impl Record {
    pub fn new(id: impl Into<String>, bases: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bases: bases.into(),
        }
    }
}

/// Resolves a command's `INPUT` argument into records.
///
/// Without `file` the argument itself is the sequence and is passed on
/// untouched, so validation sees exactly what was typed.
pub fn load(input: &str, file: bool) -> Result<Vec<Record>> {
    if !file {
        return Ok(vec![Record::new(DEFAULT_ID, input)]);
    }

    let path = Path::new(input);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records = parse(&content);
    if records.is_empty() {
        bail!("No sequences found in {}", path.display());
    }
    tracing::info!(path = %path.display(), records = records.len(), "loaded sequences");
    Ok(records)
}

/// Parses FASTA text, or plain sequence text when there is no header.
///
/// FASTA sequence lines are trimmed and joined. Plain text has all
/// whitespace removed and becomes a single record.
pub fn parse(content: &str) -> Vec<Record> {
    if !content.trim_start().starts_with('>') {
        let bases: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        if bases.is_empty() {
            return Vec::new();
        }
        return vec![Record::new(DEFAULT_ID, bases)];
    }

    let mut records = Vec::new();
    let mut current: Option<Record> = None;

    for line in content.lines() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            records.extend(current.take());
            let id = header.split_whitespace().next().unwrap_or_default();
            let id = if id.is_empty() {
                format!("record{}", records.len() + 1)
            } else {
                id.to_string()
            };
            current = Some(Record::new(id, String::new()));
        } else if let Some(record) = current.as_mut() {
            record.bases.push_str(line);
        }
    }
    records.extend(current);

    records
}
