//! Interactive confirmation on the terminal

use std::io::{self, BufRead, Write};

use ormctl::ConfirmationGate;
use tracing::warn;

/// Asks on stdout and reads the answer from stdin.
///
/// Only an answer starting with `y` confirms; anything else, including a
/// read failure or end of input, declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirmation;

impl ConfirmationGate for StdinConfirmation {
    fn confirm(&self, question: &str) -> bool {
        let mut stdout = io::stdout();
        if write!(stdout, "{}", question)
            .and_then(|_| stdout.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().to_ascii_lowercase().starts_with('y')
}
