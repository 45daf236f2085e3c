use std::collections::BTreeSet;

use ipnetwork::IpNetwork;
use log::debug;

use super::address;
use super::model::{Row, Table};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Criteria: one pattern per column, empty = no constraint
// ---------------------------------------------------------------------------

/// Per-column patterns for one filtering round.
///
/// Entries keep the order they were collected in (schema order when built by
/// the engine). An empty pattern leaves its column unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaSet {
    entries: Vec<(String, String)>,
}

impl CriteriaSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pattern for `column`, replacing an earlier one.
    pub fn set(&mut self, column: impl Into<String>, pattern: impl Into<String>) {
        let column = column.into();
        let pattern = pattern.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = pattern,
            None => self.entries.push((column, pattern)),
        }
    }

    /// Entries with a non-empty pattern.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, p)| !p.is_empty())
            .map(|(c, p)| (c.as_str(), p.as_str()))
    }

    /// True when no column carries a pattern.
    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }
}

impl<C: Into<String>, P: Into<String>> FromIterator<(C, P)> for CriteriaSet {
    fn from_iter<I: IntoIterator<Item = (C, P)>>(iter: I) -> Self {
        let mut set = CriteriaSet::new();
        for (c, p) in iter {
            set.set(c, p);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Address column designation
// ---------------------------------------------------------------------------

/// Columns whose criteria mean "address lies in network" rather than
/// "text is equal". Fixed per session; never guessed from cell contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressColumns(BTreeSet<String>);

impl AddressColumns {
    pub const DEFAULT: [&'static str; 2] = ["Source address", "Destination address"];

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AddressColumns(names.into_iter().map(Into::into).collect())
    }

    pub fn is_address(&self, column: &str) -> bool {
        self.0.contains(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for AddressColumns {
    fn default() -> Self {
        AddressColumns::new(Self::DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Per-column tests and the composite predicate
// ---------------------------------------------------------------------------

/// The test applied to one column's cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnTest {
    /// Exact text equality.
    Equality(String),
    /// The cell is a host address inside this network.
    NetworkContainment(IpNetwork),
}

/// Outcome of testing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOutcome {
    Match,
    NoMatch,
    /// The cell cannot be compared under this test (e.g. an empty address).
    Incomparable,
}

impl ColumnTest {
    /// Resolve the test for `column` from its pattern.
    pub fn for_column(
        column: &str,
        pattern: &str,
        addresses: &AddressColumns,
    ) -> Result<Self, FilterError> {
        if addresses.is_address(column) {
            let network = address::parse_network(pattern).map_err(|e| FilterError::Criterion {
                column: column.to_string(),
                source: Box::new(e),
            })?;
            Ok(ColumnTest::NetworkContainment(network))
        } else {
            Ok(ColumnTest::Equality(pattern.to_string()))
        }
    }

    /// Test a single cell. A malformed, non-empty address is fatal.
    pub fn evaluate(&self, cell: &str) -> Result<CellOutcome, FilterError> {
        let hit = match self {
            ColumnTest::Equality(expected) => cell == expected,
            ColumnTest::NetworkContainment(network) => {
                if cell.is_empty() {
                    return Ok(CellOutcome::Incomparable);
                }
                address::network_contains(network, cell)?
            }
        };
        Ok(if hit {
            CellOutcome::Match
        } else {
            CellOutcome::NoMatch
        })
    }
}

#[derive(Debug, Clone)]
struct BoundTest {
    column: String,
    col_idx: usize,
    test: ColumnTest,
}

/// Logical AND of the round's column tests.
#[derive(Debug, Clone)]
pub struct CompositePredicate {
    tests: Vec<BoundTest>,
}

impl CompositePredicate {
    /// Build the predicate for `table` from `criteria`.
    ///
    /// Returns `Ok(None)` when every pattern is empty: the round removes
    /// nothing.
    pub fn build(
        table: &Table,
        criteria: &CriteriaSet,
        addresses: &AddressColumns,
    ) -> Result<Option<Self>, FilterError> {
        let mut tests = Vec::new();
        for (column, pattern) in criteria.active() {
            let col_idx = table
                .column_index(column)
                .ok_or_else(|| FilterError::UnknownColumn {
                    column: column.to_string(),
                })?;
            let test = ColumnTest::for_column(column, pattern, addresses)?;
            debug!("criterion {column:?}: {test:?}");
            tests.push(BoundTest {
                column: column.to_string(),
                col_idx,
                test,
            });
        }
        if tests.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompositePredicate { tests }))
        }
    }

    /// Whether `row` satisfies every column test.
    ///
    /// All tests run on every row so malformed address cells are always
    /// reported. An incomparable cell makes the row non-matching.
    pub fn matches(&self, row: &Row) -> Result<bool, FilterError> {
        let mut all = true;
        let mut incomparable = false;
        for bound in &self.tests {
            let cell = row.cell(bound.col_idx).unwrap_or("");
            match bound.test.evaluate(cell)? {
                CellOutcome::Match => {}
                CellOutcome::NoMatch => all = false,
                CellOutcome::Incomparable => {
                    debug!(
                        "row {}: column {:?} value {cell:?} not comparable, keeping row",
                        row.index, bound.column
                    );
                    incomparable = true;
                }
            }
        }
        Ok(all && !incomparable)
    }
}

// ---------------------------------------------------------------------------
// Mask, removal, renumbering
// ---------------------------------------------------------------------------

/// `true` for each row the predicate selects for removal.
pub fn removal_mask(table: &Table, predicate: &CompositePredicate) -> Result<Vec<bool>, FilterError> {
    table.rows.iter().map(|row| predicate.matches(row)).collect()
}

/// Rows left after a removal pass.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Retained rows in their original order, still carrying old labels.
    pub table: Table,
    /// How many rows were removed.
    pub removed: usize,
}

/// Drop every row the predicate matches. `table` is left untouched.
pub fn apply_removal(table: &Table, predicate: &CompositePredicate) -> Result<RoundOutcome, FilterError> {
    let mask = removal_mask(table, predicate)?;
    let removed = mask.iter().filter(|m| **m).count();
    Ok(RoundOutcome {
        table: table.without_masked(&mask),
        removed,
    })
}
