// Rust guideline compliant 2026-10-19

//! Line-oriented session over one in-memory inventory.
//!
//! Each input line is one `gear` subcommand without the program name, e.g.
//! `borrow EQ002 --borrower-id 984106503 --name "Wu Mei" --from ... --until ...`.
//! Blank lines and lines starting with `#` are skipped; `exit` or `quit` ends
//! the session. Failures are reported inline and the session continues.

use crate::commands::{self, Command};
use crate::OutputFormatter;
use clap::Parser;
use gearloan_app::InventoryService;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: Command,
}

/// Outcome counts of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands that succeeded.
    pub succeeded: usize,
    /// Commands that failed to parse or run.
    pub failed: usize,
}

/// Splits a line into words, honoring single and double quotes.
///
/// # Errors
///
/// Returns a message if a quote is left open.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Runs commands from `input` until it ends or `exit` is read.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(
    service: &InventoryService,
    formatter: &dyn OutputFormatter,
    input: R,
    output: &mut W,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        let words = match split_words(trimmed) {
            Ok(words) => words,
            Err(message) => {
                summary.failed += 1;
                writeln!(output, "Error: {}", message)?;
                continue;
            }
        };

        let command = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                summary.failed += 1;
                write!(output, "{}", e.render())?;
                continue;
            }
        };

        match commands::run(service, command, formatter) {
            Ok(text) => {
                summary.succeeded += 1;
                writeln!(output, "{}", text)?;
            }
            Err(e) => {
                summary.failed += 1;
                writeln!(output, "{}", formatter.format_error(&e))?;
            }
        }
    }

    tracing::debug!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "session finished"
    );
    Ok(summary)
}
