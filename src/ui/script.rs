use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

use super::prompt::Prompt;
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Script file
// ---------------------------------------------------------------------------

/// Non-interactive filtering rounds.
///
/// ```json
/// { "rounds": [ { "Source address": "10.0.0.0/24", "Protocol": "TCP" },
///               { "Protocol": "UDP" } ] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub rounds: Vec<BTreeMap<String, String>>,
}

impl Script {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }

    /// Every column named by a round must exist in `columns`.
    pub fn validate(&self, columns: &[String]) -> Result<(), FilterError> {
        for round in &self.rounds {
            if let Some(unknown) = round.keys().find(|k| !columns.contains(*k)) {
                return Err(FilterError::UnknownColumn {
                    column: unknown.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scripted prompt
// ---------------------------------------------------------------------------

/// Answers the engine from a [`Script`]: each round's patterns, empty for
/// columns a round leaves out, "yes" while rounds remain and "no" after.
pub struct ScriptedPrompt {
    current: BTreeMap<String, String>,
    pending: VecDeque<BTreeMap<String, String>>,
}

impl ScriptedPrompt {
    pub fn new(script: Script) -> Self {
        let mut pending: VecDeque<_> = script.rounds.into();
        let current = pending.pop_front().unwrap_or_default();
        Self { current, pending }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask_text(&mut self, column: &str) -> io::Result<String> {
        Ok(self.current.get(column).cloned().unwrap_or_default())
    }

    fn ask_repeat(&mut self, _question: &str) -> io::Result<String> {
        match self.pending.pop_front() {
            Some(next) => {
                self.current = next;
                Ok("yes".to_string())
            }
            None => Ok("no".to_string()),
        }
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        info!("{message}");
        Ok(())
    }
}
