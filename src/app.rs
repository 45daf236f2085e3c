use anyhow::{Context, Result};
use chrono::Local;
use log::{error, info, warn};

use crate::cli::Args;
use crate::data::filter::AddressColumns;
use crate::data::loader::{delimiter_for, load_table, read_allow_list, write_table};
use crate::state::RowFilterEngine;
use crate::ui::{ConsolePrompt, Prompt, Script, ScriptedPrompt};

// ---------------------------------------------------------------------------
// Application wiring: load → filter rounds → write
// ---------------------------------------------------------------------------

/// Run one full session for the parsed command line.
///
/// Nothing is written when a round fails; the error bubbles up and the
/// process exits non-zero.
pub fn run(args: &Args) -> Result<()> {
    let keep = read_allow_list(&args.keep_columns)?;
    println!("\nKeeping the following list of columns: {keep:?}");

    let delimiter = delimiter_for(&args.input, args.delimiter);
    let table = load_table(&args.input, &keep, delimiter)?;
    let addresses = AddressColumns::new(args.address_columns.iter().cloned());
    info!(
        "address columns: {:?}",
        addresses.iter().collect::<Vec<_>>()
    );

    let mut prompt: Box<dyn Prompt> = match &args.script {
        Some(path) => {
            let script = Script::from_path(path)?;
            script.validate(&table.columns)?;
            Box::new(ScriptedPrompt::new(script))
        }
        None => {
            println!("Enter a value per column to drop matching rows (empty = any).");
            Box::new(ConsolePrompt::stdio())
        }
    };

    let mut engine = RowFilterEngine::new(table, addresses);
    let outcome = engine.run(prompt.as_mut()).map(|_| ());
    if let Err(e) = outcome {
        if e.is_input_error() {
            error!("invalid filter input: {e}");
        }
        error!(
            "aborting after {} completed rounds ({} rows held), nothing written",
            engine.rounds_completed(),
            engine.table().len()
        );
        return Err(e).context("filtering failed");
    }

    if engine.table().is_empty() {
        warn!("every row was removed, writing header only");
    }
    let output = args.output_path(Local::now());
    write_table(engine.table(), &output, delimiter)?;
    println!("\nOutput file: {}\n", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn args_for(dir: &Path, rounds: &str) -> Args {
        Args {
            input: write(
                dir,
                "flows.csv",
                "Time,Source address,Protocol\n\
                 t1,10.0.0.1,TCP\n\
                 t2,10.0.2.5,TCP\n\
                 t3,10.0.0.9,UDP\n",
            ),
            output: Some(dir.join("out.csv")),
            keep_columns: write(dir, "keep.txt", "Source address\nProtocol\n"),
            address_columns: AddressColumns::DEFAULT.map(String::from).to_vec(),
            delimiter: None,
            script: Some(write(dir, "rounds.json", rounds)),
        }
    }

    #[test]
    fn scripted_run_writes_reduced_table() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(
            dir.path(),
            r#"{"rounds":[{"Source address":"10.0.0.0/24","Protocol":"TCP"},{"Protocol":"UDP"}]}"#,
        );
        run(&args).unwrap();
        let written = fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(written, "Source address,Protocol\n10.0.2.5,TCP\n");
    }

    #[test]
    fn fatal_round_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(dir.path(), r#"{"rounds":[{"Source address":"not-a-net"}]}"#);
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("not-a-net"));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn script_with_dropped_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(dir.path(), r#"{"rounds":[{"Time":"t1"}]}"#);
        assert!(run(&args).is_err());
    }
}
