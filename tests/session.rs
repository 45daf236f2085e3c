// End-to-end filtering sessions through the public API.

use std::collections::VecDeque;
use std::io::{self, Cursor};

use rowsieve::data::address;
use rowsieve::data::filter::AddressColumns;
use rowsieve::data::loader::{load_table, write_table};
use rowsieve::data::model::Table;
use rowsieve::state::RowFilterEngine;
use rowsieve::ui::{ConsolePrompt, Prompt};
use rowsieve::FilterError;

fn flows() -> Table {
    Table::from_records(
        vec!["Source address".into(), "Protocol".into()],
        vec![
            vec!["10.0.0.1".into(), "TCP".into()],
            vec!["10.0.2.5".into(), "TCP".into()],
            vec!["10.0.0.9".into(), "UDP".into()],
        ],
    )
    .unwrap()
}

fn cells(t: &Table) -> Vec<Vec<String>> {
    t.rows.iter().map(|r| r.cells.clone()).collect()
}

/// Prompt that fails the test if the engine asks more than scripted.
struct Strict(VecDeque<&'static str>);

impl Strict {
    fn answer(&mut self) -> io::Result<String> {
        Ok(self
            .0
            .pop_front()
            .expect("engine asked an unscripted question")
            .to_string())
    }
}

impl Prompt for Strict {
    fn ask_text(&mut self, _column: &str) -> io::Result<String> {
        self.answer()
    }

    fn ask_repeat(&mut self, _question: &str) -> io::Result<String> {
        self.answer()
    }

    fn notify(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn address_matcher_examples() {
    assert!(address::contains("10.0.0.5", "10.0.0.0/24").unwrap());
    assert!(!address::contains("10.0.1.5", "10.0.0.0/24").unwrap());
    assert!(!address::contains("10.0.0.5", "::/0").unwrap());
    let err = address::contains("not-an-ip", "10.0.0.0/24").unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn console_session_over_two_rounds() {
    let input = Cursor::new("10.0.0.0/24\nTCP\nmaybe\ny\n\nUDP\nno\n");
    let mut prompt = ConsolePrompt::new(input, Vec::new());
    let mut engine = RowFilterEngine::new(flows(), AddressColumns::default());
    engine.run(&mut prompt).unwrap();

    assert_eq!(cells(engine.table()), vec![vec!["10.0.2.5", "TCP"]]);
    assert_eq!(engine.table().rows[0].index, 0);
    assert_eq!(engine.rounds_completed(), 2);
}

#[test]
fn maybe_does_not_touch_the_table() {
    let mut engine = RowFilterEngine::new(flows(), AddressColumns::default());
    let mut prompt = Strict(VecDeque::from(["", "", "maybe", "maybe", "n"]));
    engine.run(&mut prompt).unwrap();
    assert_eq!(engine.table(), &flows());
    assert_eq!(engine.rounds_completed(), 1);
}

#[test]
fn bad_network_aborts_and_keeps_previous_round() {
    let mut engine = RowFilterEngine::new(flows(), AddressColumns::default());
    let mut prompt = Strict(VecDeque::from(["10.0.0.0/24", "TCP", "y", "10.0.0.0.0", ""]));
    let err = engine.run(&mut prompt).unwrap_err();

    assert!(matches!(err, FilterError::Criterion { .. }));
    assert_eq!(
        cells(engine.table()),
        vec![vec!["10.0.2.5", "TCP"], vec!["10.0.0.9", "UDP"]]
    );
}

#[test]
fn load_filter_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flows.csv");
    std::fs::write(
        &input,
        "Receive Time,Source address,Destination address,Protocol\n\
         t1,10.0.0.1,192.168.1.10,TCP\n\
         t2,2001:db8::1,192.168.1.11,TCP\n\
         t3,10.0.3.3,8.8.8.8,UDP\n",
    )
    .unwrap();
    let keep: Vec<String> = ["Source address", "Destination address", "Protocol"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let table = load_table(&input, &keep, b',').unwrap();
    let mut engine = RowFilterEngine::new(table, AddressColumns::default());
    // Drop everything headed to 192.168.1.0/24, whatever the protocol.
    let mut prompt = Strict(VecDeque::from(["", "192.168.1.0/24", "", "n"]));
    engine.run(&mut prompt).unwrap();

    let output = dir.path().join("out.csv");
    write_table(engine.table(), &output, b',').unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Source address,Destination address,Protocol\n10.0.3.3,8.8.8.8,UDP\n"
    );
}

#[test]
fn console_pattern_matches_cells_with_spaces_exactly() {
    let table = Table::from_records(
        vec!["Protocol".into()],
        vec![vec![" TCP".into()], vec!["TCP".into()]],
    )
    .unwrap();
    let mut engine = RowFilterEngine::new(table, AddressColumns::default());
    let mut prompt = ConsolePrompt::new(Cursor::new(" TCP\r\n n\n"), Vec::new());
    engine.run(&mut prompt).unwrap();
    assert_eq!(cells(engine.table()), vec![vec!["TCP"]]);
}

#[test]
fn repeated_column_names_never_reach_the_engine() {
    let err = Table::from_records(
        vec!["Protocol".into(), "Protocol".into()],
        vec![vec!["TCP".into(), "UDP".into()], vec!["UDP".into(), "TCP".into()]],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Protocol"));
}
