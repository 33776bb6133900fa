//! Yes/no prompts for destructive commands.

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Whether an answer counts as a yes.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ask `question` on `output` and read one line from `input`.
///
/// End of input and read failures count as "no".
pub fn ask_with<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> bool {
    if write!(output, "{} {} [y/N] ", "⚠".yellow(), question).is_err() {
        return false;
    }
    output.flush().ok();

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => {
            writeln!(output).ok();
            false
        }
        Ok(_) => is_yes(&answer),
    }
}

/// Ask `question` on the terminal.
///
/// The question goes to stderr so JSON on stdout stays parseable.
pub fn confirm(question: &str) -> bool {
    let stdin = io::stdin();
    ask_with(question, &mut stdin.lock(), &mut io::stderr())
}
