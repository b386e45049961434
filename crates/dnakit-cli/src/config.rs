//! Optional TOML configuration for the command-line tool.
//!
//! ```toml
//! [kmers]
//! k = 3
//! top = 0        # 0 prints the whole table
//!
//! [orfs]
//! min_protein_len = 10
//!
//! [report]
//! min_decoded_len = 10  # counts the trailing `*`
//! ```
//!
//! Every key may be omitted; command-line flags take precedence.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub kmers: KmerConfig,
    pub orfs: OrfConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KmerConfig {
    /// K-mer length.
    pub k: usize,
    /// Number of most frequent k-mers to print; 0 prints the sorted table.
    pub top: usize,
}

impl Default for KmerConfig {
    fn default() -> Self {
        Self { k: 3, top: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrfConfig {
    /// Proteins must be longer than this many residues to be reported.
    pub min_protein_len: usize,
}

impl Default for OrfConfig {
    fn default() -> Self {
        Self { min_protein_len: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Decoded strings, stop marker included, must be longer than this.
    pub min_decoded_len: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { min_decoded_len: 10 }
    }
}

impl Config {
    /// Loads a config file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.kmers.k, 3);
        assert_eq!(config.kmers.top, 0);
        assert_eq!(config.orfs.min_protein_len, 10);
        assert_eq!(config.report.min_decoded_len, 10);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = Config::from_toml("[kmers]\nk = 5\n").unwrap();
        assert_eq!(config.kmers, KmerConfig { k: 5, top: 0 });
        assert_eq!(config.orfs, OrfConfig::default());
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_report_table() {
        let config = Config::from_toml("[report]\nmin_decoded_len = 4\n").unwrap();
        assert_eq!(config.report.min_decoded_len, 4);
        assert_eq!(config.orfs, OrfConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("[kmers]\nsize = 5\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[orfs]\nmin_protein_len = 2").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.orfs.min_protein_len, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/dnakit.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_none() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
