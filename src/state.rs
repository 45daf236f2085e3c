use log::{debug, info};

use crate::data::filter::{AddressColumns, CompositePredicate, CriteriaSet, apply_removal};
use crate::data::model::Table;
use crate::error::FilterError;
use crate::ui::Prompt;

pub const REPEAT_QUESTION: &str = "Filter again?";

// ---------------------------------------------------------------------------
// Session phases
// ---------------------------------------------------------------------------

/// Where the filter session currently is.
#[derive(Debug)]
enum Phase {
    CollectCriteria,
    BuildPredicate(CriteriaSet),
    ApplyRemoval(Option<CompositePredicate>),
    Renumber { reduced: Table, removed: usize },
    AskRepeat,
}

/// Interpret an answer to the repeat question.
///
/// `Some(true)` for y/yes, `Some(false)` for n/no (any case), `None` otherwise.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Runs filter rounds over a table until the user is done.
///
/// The engine owns its table. A round only replaces it once the round has
/// fully completed, so after an error [`RowFilterEngine::table`] still holds
/// the result of the last good round.
pub struct RowFilterEngine {
    table: Table,
    addresses: AddressColumns,
    rounds_completed: usize,
}

impl RowFilterEngine {
    pub fn new(table: Table, addresses: AddressColumns) -> Self {
        Self {
            table,
            addresses,
            rounds_completed: 0,
        }
    }

    /// Table as of the last completed round.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn rounds_completed(&self) -> usize {
        self.rounds_completed
    }

    /// Drive rounds through `prompt` until it answers "no".
    pub fn run<P: Prompt + ?Sized>(&mut self, prompt: &mut P) -> Result<&Table, FilterError> {
        let mut phase = Phase::CollectCriteria;
        while let Some(next) = self.step(phase, prompt)? {
            phase = next;
        }
        Ok(&self.table)
    }

    /// Advance one phase. `None` means the user is done.
    fn step<P: Prompt + ?Sized>(
        &mut self,
        phase: Phase,
        prompt: &mut P,
    ) -> Result<Option<Phase>, FilterError> {
        let next = match phase {
            Phase::CollectCriteria => {
                let mut criteria = CriteriaSet::new();
                for column in &self.table.columns {
                    let pattern = prompt.ask_text(column)?;
                    criteria.set(column.as_str(), pattern);
                }
                Phase::BuildPredicate(criteria)
            }
            Phase::BuildPredicate(criteria) => {
                if criteria.is_unconstrained() {
                    debug!(
                        "no criteria given, round {} leaves the table as is",
                        self.rounds_completed + 1
                    );
                }
                let predicate = CompositePredicate::build(&self.table, &criteria, &self.addresses)?;
                Phase::ApplyRemoval(predicate)
            }
            Phase::ApplyRemoval(None) => Phase::Renumber {
                reduced: self.table.clone(),
                removed: 0,
            },
            Phase::ApplyRemoval(Some(predicate)) => {
                let outcome = apply_removal(&self.table, &predicate)?;
                Phase::Renumber {
                    reduced: outcome.table,
                    removed: outcome.removed,
                }
            }
            Phase::Renumber { reduced, removed } => {
                self.table = reduced.renumbered();
                self.rounds_completed += 1;
                info!(
                    "round {}: removed {removed} rows, {} remaining",
                    self.rounds_completed,
                    self.table.len()
                );
                prompt.notify(&format!(
                    "Removed {removed} rows, {} remaining.",
                    self.table.len()
                ))?;
                Phase::AskRepeat
            }
            Phase::AskRepeat => match parse_yes_no(&prompt.ask_repeat(REPEAT_QUESTION)?) {
                Some(true) => Phase::CollectCriteria,
                Some(false) => return Ok(None),
                None => {
                    prompt.notify("Please answer y/yes or n/no.")?;
                    Phase::AskRepeat
                }
            },
        };
        Ok(Some(next))
    }
}
