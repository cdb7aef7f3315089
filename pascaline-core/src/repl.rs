//! Interactive session driver
//!
//! Runs one calculation: an optional history command, then numbers and
//! operators until `=`, then evaluation and persistence. The driver is
//! terminal-agnostic: lines come from any [`LineSource`] and prompts and
//! messages go to any `Write`. The `repl` feature adds [`EditlineInput`], a
//! line-edited terminal source.
//!
//! # Example
//!
//! ```ignore
//! use pascaline_core::{Config, MemoryStore, repl::run_session};
//! use std::collections::VecDeque;
//!
//! let mut input: VecDeque<String> = ["", "2", "+", "3", "="].map(String::from).into();
//! let mut store = MemoryStore::new();
//! run_session(&mut input, &mut std::io::stdout(), &mut store, &Config::default())?;
//! ```

use std::collections::VecDeque;
use std::io::{self, Write};

use tracing::{debug, warn};

use crate::config::Config;
use crate::history::HistoryStore;
use crate::operator::{BinaryOp, UnaryOp};
use crate::session::{Evaluation, Session};
use crate::tokenizer::parse_number;
use crate::value::RuntimeError;

pub const COMMAND_PROMPT: &str = "Command (h/clear/Enter): ";
pub const OPERATION_PROMPT: &str = "Operation (+,-,*,/,^,sqrt,fact,=): ";

/// A source of input lines. `Ok(None)` means end of input.
pub trait LineSource {
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

// Scripted input, one entry per line
impl LineSource for VecDeque<String> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.pop_front())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Evaluated and handed to the history store.
    Completed(Evaluation),
    /// Evaluation was refused or failed; nothing was persisted.
    Failed(RuntimeError),
    /// Input ended before `=`.
    Cancelled,
}

pub fn run_session<I, W, S>(
    input: &mut I,
    out: &mut W,
    store: &mut S,
    config: &Config,
) -> io::Result<SessionOutcome>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
    S: HistoryStore + ?Sized,
{
    let Some(command) = prompt(input, out, COMMAND_PROMPT)? else {
        return Ok(SessionOutcome::Cancelled);
    };
    match command.to_lowercase().as_str() {
        "h" => {
            show_history(out, store, config.history_limit)?;
            writeln!(out)?;
        }
        "clear" => match store.clear() {
            Ok(()) => writeln!(out, "History cleared.\n")?,
            Err(e) => writeln!(out, "Error: {}\n", e)?,
        },
        _ => {}
    }

    let Some(first) = ask_number(input, out, "Number 1: ")? else {
        return Ok(SessionOutcome::Cancelled);
    };
    let mut session = Session::new(first);

    loop {
        let Some(token) = prompt(input, out, OPERATION_PROMPT)? else {
            return Ok(SessionOutcome::Cancelled);
        };
        let token = token.to_lowercase();
        if token == "=" {
            break;
        }

        // Unary operations act on the last number and take no operator slot
        if let Ok(op) = token.parse::<UnaryOp>() {
            match session.apply(op) {
                Ok(value) => writeln!(out, "OK {} -> {:?}", op, value)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
            continue;
        }

        let Ok(op) = token.parse::<BinaryOp>() else {
            writeln!(out, "Invalid operation.")?;
            continue;
        };

        let Some(operand) = ask_number(input, out, "Next number: ")? else {
            return Ok(SessionOutcome::Cancelled);
        };
        if let Err(e) = session.push(op, operand) {
            writeln!(out, "Error: {}", e)?;
        }
    }

    let evaluation = match session.finish() {
        Ok(evaluation) => evaluation,
        Err(e) => {
            debug!(error = %e, expression = %session.expression(), "evaluation refused");
            writeln!(out, "Error: {}", e)?;
            return Ok(SessionOutcome::Failed(e));
        }
    };

    writeln!(out, "\nResult: {}", evaluation.result)?;
    match store.append(evaluation.clone().into()) {
        Ok(()) => writeln!(out, "History saved.")?,
        Err(e) => {
            warn!(error = %e, "could not persist history record");
            writeln!(out, "Error: {}", e)?;
        }
    }
    Ok(SessionOutcome::Completed(evaluation))
}

/// Print up to `limit` of the most recent records, oldest first.
pub fn show_history<W, S>(out: &mut W, store: &S, limit: usize) -> io::Result<()>
where
    W: Write + ?Sized,
    S: HistoryStore + ?Sized,
{
    let records = store.recent(limit);
    if records.is_empty() {
        writeln!(out, "History is empty.")?;
    }
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

fn prompt<I, W>(input: &mut I, out: &mut W, text: &str) -> io::Result<Option<String>>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    write!(out, "{}", text)?;
    out.flush()?;
    Ok(input.read_line()?.map(|line| line.trim().to_string()))
}

// RUST CONCEPT: Retry loop over an explicit parse result
// Bad input is reported and asked for again; only end of input stops it
fn ask_number<I, W>(input: &mut I, out: &mut W, text: &str) -> io::Result<Option<f64>>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let Some(line) = prompt(input, out, text)? else {
            return Ok(None);
        };
        match parse_number(&line) {
            Ok(n) => return Ok(Some(n)),
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }
}

/// Terminal input with line editing and per-session line history.
#[cfg(feature = "repl")]
pub struct EditlineInput {
    editor: editline::LineEditor,
    terminal: editline::terminals::StdioTerminal,
}

#[cfg(feature = "repl")]
impl EditlineInput {
    pub fn new() -> Self {
        Self {
            editor: editline::LineEditor::new(1024, 50),
            terminal: editline::terminals::StdioTerminal::new(),
        }
    }
}

#[cfg(feature = "repl")]
impl Default for EditlineInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "repl")]
impl LineSource for EditlineInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.editor.read_line(&mut self.terminal) {
            Ok(line) => Ok(Some(line.to_string())),
            // Ctrl-D or Ctrl-C abandon the current calculation
            Err(editline::Error::Eof) | Err(editline::Error::Interrupted) => {
                println!();
                Ok(None)
            }
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }
}
