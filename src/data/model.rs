use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// Row – one record of the table
// ---------------------------------------------------------------------------

/// A single record. Cells are aligned with the owning [`Table`]'s columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Positional label. Contiguous `0..N` after [`Table::renumbered`].
    pub index: usize,
    /// One text value per schema column.
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(index: usize, cells: Vec<String>) -> Self {
        Row { index, cells }
    }

    /// Cell at a schema position.
    pub fn cell(&self, col_idx: usize) -> Option<&str> {
        self.cells.get(col_idx).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Table – schema plus rows
// ---------------------------------------------------------------------------

/// An in-memory table of string cells.
///
/// Every row carries exactly one value per column. Tables are never edited in
/// place by the filter: each round builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Ordered column names (the schema).
    pub columns: Vec<String>,
    /// Rows in their current order.
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from raw records, labelling rows `0..N`.
    ///
    /// Fails if a column name repeats or any record's width differs from
    /// the schema.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                bail!("duplicate column {name:?}");
            }
        }
        let width = columns.len();
        let mut rows = Vec::with_capacity(records.len());
        for (i, cells) in records.into_iter().enumerate() {
            if cells.len() != width {
                bail!(
                    "Row {i}: expected {width} values, found {}",
                    cells.len()
                );
            }
            rows.push(Row::new(i, cells));
        }
        Ok(Table { columns, rows })
    }

    /// Position of a column in the schema.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Keep the rows whose `mask` entry is `false`, preserving order.
    ///
    /// Retained rows keep their old labels; call [`Table::renumbered`] to
    /// close the gaps.
    pub fn without_masked(&self, mask: &[bool]) -> Table {
        debug_assert_eq!(mask.len(), self.rows.len());
        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, drop)| !**drop)
            .map(|(row, _)| row.clone())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Reset row labels to `0..M`.
    pub fn renumbered(mut self) -> Table {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.index = i;
        }
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
