use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use super::model::Table;

// ---------------------------------------------------------------------------
// Delimiter selection
// ---------------------------------------------------------------------------

/// Pick the field delimiter for `path`: explicit choice first, otherwise by
/// extension (`.tsv` / `.tab` → tab, anything else → comma).
pub fn delimiter_for(path: &Path, explicit: Option<u8>) -> u8 {
    if let Some(d) = explicit {
        return d;
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}

// ---------------------------------------------------------------------------
// Allow-list
// ---------------------------------------------------------------------------

/// Read the list of columns to keep: one name per line, blank lines skipped.
pub fn read_allow_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading column allow-list {}", path.display()))?;
    Ok(text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect())
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Load a delimited file with a header row, keeping only allow-listed
/// columns in header order. Every cell is kept as text.
pub fn load_table(path: &Path, allow_list: &[String], delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let wanted: BTreeSet<&str> = allow_list.iter().map(String::as_str).collect();
    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| wanted.contains(h.as_str()))
        .map(|(i, _)| i)
        .collect();

    for name in allow_list {
        if !headers.contains(name) {
            warn!("allow-listed column {name:?} not present in {}", path.display());
        }
    }
    if keep.is_empty() && !headers.is_empty() {
        warn!("no allow-listed column found in {}", path.display());
    }

    let columns: Vec<String> = keep.iter().map(|&i| headers[i].clone()).collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        // Non-flexible reader: ragged records fail here.
        let record = result.with_context(|| format!("reading record {row_no}"))?;
        records.push(
            keep.iter()
                .map(|&i| record.get(i).unwrap_or("").to_string())
                .collect(),
        );
    }

    let table = Table::from_records(columns, records)
        .with_context(|| format!("building table from {}", path.display()))?;
    info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Write `table` with a header row and no index column.
pub fn write_table(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer
        .write_record(&table.columns)
        .context("writing header row")?;
    for row in &table.rows {
        writer
            .write_record(&row.cells)
            .with_context(|| format!("writing row {}", row.index))?;
    }
    writer.flush().context("flushing output")?;

    info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
