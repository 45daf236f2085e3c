use std::io::{self, BufRead, Write};

// ---------------------------------------------------------------------------
// Prompt collaborator
// ---------------------------------------------------------------------------

/// The blocking conversation the filter engine holds with its user.
///
/// Implementations return raw answers; interpreting yes/no and re-asking is
/// the engine's job.
pub trait Prompt {
    /// Ask for the pattern of one column. An empty answer means "any".
    fn ask_text(&mut self, column: &str) -> io::Result<String>;

    /// Ask whether to run another round.
    fn ask_repeat(&mut self, question: &str) -> io::Result<String>;

    /// Tell the user something (round summaries, re-ask hints).
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// Console prompt
// ---------------------------------------------------------------------------

/// Line-based prompt over any reader/writer pair (stdin/stdout in the binary).
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's terminal.
    pub fn stdio() -> Self {
        ConsolePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn ask_text(&mut self, column: &str) -> io::Result<String> {
        self.read_answer(&format!("{column}: "))
    }

    fn ask_repeat(&mut self, question: &str) -> io::Result<String> {
        let answer = self.read_answer(&format!("{question} [y/n] "))?;
        Ok(answer.trim().to_string())
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}
