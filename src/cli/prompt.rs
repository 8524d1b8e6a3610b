//! Terminal side of the interactive questions.

use crate::core::submit::{OverlapChoice, OverlapPrompter};
use crate::errors::AppResult;
use crate::models::day_batch::OverlapPair;
use crate::ui::messages::{overlap_line, warning};
use std::io::{self, BufRead, Stdin, Stdout, Write};

/// Ask a yes/no confirmation from the user
pub fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Shows a day's overlaps and reads one of `w s W S a`, asking again on
/// anything else. End of input counts as abort.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> OverlapPrompter for TerminalPrompter<R, W> {
    fn choose(&mut self, day_label: &str, overlaps: &[OverlapPair]) -> AppResult<OverlapChoice> {
        writeln!(
            self.output,
            "{day_label}: {} local entr(y/ies) overlap existing remote items",
            overlaps.len()
        )?;
        for (i, pair) in overlaps.iter().enumerate() {
            writeln!(self.output, "  {:>2}. {}", i + 1, overlap_line(pair))?;
        }

        loop {
            write!(
                self.output,
                "[w] write this day  [s] skip this day  [W] write all  [S] skip all  [a] abort > "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(OverlapChoice::Abort);
            }

            match OverlapChoice::from_key(&line) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.output, "Please answer w, s, W, S or a.")?,
            }
        }
    }
}
