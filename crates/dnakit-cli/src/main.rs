//! dnakit CLI - k-mer counting and ORF decoding from the command line.

mod config;
mod input;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dnakit::{decode_orf, Sequence, VERSION};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::report::LengthFilter;

#[derive(Parser)]
#[command(name = "dnakit")]
#[command(version = VERSION)]
#[command(about = "K-mer counting and open reading frame decoding for DNA", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that sequences contain only A, T, G and C
    Validate {
        /// Input sequence or file path
        input: String,

        /// Treat input as a file path
        #[arg(short, long)]
        file: bool,
    },

    /// Count k-mers in sequences
    Kmers {
        /// Input sequence or file path
        input: String,

        /// K-mer size
        #[arg(short, long)]
        k: Option<usize>,

        /// Number of most frequent k-mers to display (0 shows all, sorted)
        #[arg(short, long)]
        top: Option<usize>,

        /// Treat input as a file path
        #[arg(short, long)]
        file: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Decode a single reading frame
    Decode {
        /// Input sequence
        input: String,

        /// Offset of the first codon
        #[arg(short, long, default_value = "0")]
        start: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Scan sequences for open reading frames
    Orfs {
        /// Input sequence or file path
        input: String,

        /// Only report proteins longer than this many residues
        #[arg(short, long)]
        min_len: Option<usize>,

        /// Treat input as a file path
        #[arg(short, long)]
        file: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the k-mer table followed by the longer encoded proteins
    Report {
        /// Input sequence or file path
        input: String,

        /// Treat input as a file path
        #[arg(short, long)]
        file: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { input, file } => {
            let records = input::load(&input, file)?;
            let results = report::validate_records(&records);
            print!("{}", report::render_validation(&results));

            let invalid = results.iter().filter(|(_, result)| result.is_err()).count();
            if invalid > 0 {
                bail!("{} of {} record(s) failed validation", invalid, results.len());
            }
        }

        Commands::Kmers {
            input,
            k,
            top,
            file,
            json,
        } => {
            let k = k.unwrap_or(config.kmers.k);
            let top = top.unwrap_or(config.kmers.top);
            let records = input::load(&input, file)?;
            let counter = report::count_records(&records, k)?;
            tracing::info!(k, total = counter.total(), distinct = counter.distinct(), "counted k-mers");

            if json {
                println!("{}", report::kmers_json(&counter, top)?);
            } else {
                print!("{}", report::render_kmers(&counter, top));
            }
        }

        Commands::Decode { input, start, json } => {
            let seq = Sequence::new(input).context("Input is not a DNA sequence")?;
            let orf = decode_orf(&seq, start)
                .with_context(|| format!("Failed to decode reading frame at offset {}", start))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&orf)?);
            } else {
                println!("{}", orf);
            }
        }

        Commands::Orfs {
            input,
            min_len,
            file,
            json,
        } => {
            let min_len = min_len.unwrap_or(config.orfs.min_protein_len);
            let records = input::load(&input, file)?;
            let results = report::scan_records(&records, LengthFilter::Protein(min_len))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", report::render_orfs(&results));
            }
        }

        Commands::Report { input, file } => {
            let records = input::load(&input, file)?;
            let counter = report::count_records(&records, config.kmers.k)?;
            let filter = LengthFilter::Decoded(config.report.min_decoded_len);
            let results = report::scan_records(&records, filter)?;
            print!("{}", report::render_report(&counter, &results));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_kmers_flags() {
        let cli = Cli::parse_from(["dnakit", "-vv", "kmers", "ATGC", "-k", "2", "--top", "1"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Kmers { input, k, top, file, json } => {
                assert_eq!(input, "ATGC");
                assert_eq!(k, Some(2));
                assert_eq!(top, Some(1));
                assert!(!file);
                assert!(!json);
            }
            _ => panic!("expected kmers command"),
        }
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["dnakit", "orfs", "ATG", "--config", "dnakit.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("dnakit.toml")));
    }
}
