use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Parser;

use crate::data::filter::AddressColumns;

/// Remove rows from a delimited flow log, round after round, by matching
/// per-column criteria. Address columns match by CIDR network.
#[derive(Parser, Debug, Clone)]
#[command(name = "rowsieve", version, about)]
pub struct Args {
    /// Input file (header row required)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file [default: output-<timestamp>-<input name>]
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// File listing the columns to keep, one per line
    #[arg(short = 'k', long = "keep-columns", default_value = "keep_columns.txt")]
    pub keep_columns: PathBuf,

    /// Column matched by network containment (repeatable)
    #[arg(
        short = 'a',
        long = "address-column",
        default_values_t = AddressColumns::DEFAULT.map(String::from)
    )]
    pub address_columns: Vec<String>,

    /// Single-character field delimiter [default: by extension, else ',']
    #[arg(short = 'd', long = "delimiter", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// JSON file of filter rounds to run without prompting
    #[arg(short = 's', long = "script")]
    pub script: Option<PathBuf>,
}

impl Args {
    /// Output path, falling back to the timestamped name next to the input.
    pub fn output_path(&self, now: DateTime<Local>) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, now))
    }
}

/// `output-YYYYmmdd-HHMMSS-<input file name>` in the input's directory.
pub fn default_output_path(input: &Path, now: DateTime<Local>) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table.csv".to_string());
    let file = format!("output-{}-{name}", now.format("%Y%m%d-%H%M%S"));
    match input.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    let unescaped = if s == "\\t" { "\t" } else { s };
    match unescaped.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}
