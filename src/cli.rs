use clap::{Parser, ValueEnum, ValueHint};
use std::path::PathBuf;

/// Jitter named points so that no two share a rounded coordinate (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "geojitter", version, about)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Input records `name,postcode,lat,lon`, no header ("-" or absent reads stdin, .gz is decompressed)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file ("-" or absent writes stdout, .gz is compressed)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Field delimiter for input and CSV output
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Random seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Warn when one record needs more than this many samples (0 disables)
    #[arg(long, default_value_t = 1000)]
    pub warn_after: u64,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum OutputFormat { Csv, Geojson }

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() && *b != b'"' && *b != b'\n' => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character other than quote or newline, got {s:?}")),
    }
}
