/*!
 * Session Commands
 * Line-oriented command parsing for the interactive front end
 */

use crate::core::data_structures::InlineString;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Help text, one entry per line
pub const HELP_LINES: &[&str] = &[
    "Commands:",
    "  add <arrival> <burst>   submit a process (times in ms)",
    "  run [quantum]           run the simulation (default quantum when omitted)",
    "  clear                   remove all processes",
    "  help                    show this help",
    "  quit                    exit",
];

/// Command parse errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    #[diagnostic(code(session::unknown_command), help("Type 'help' for a list of commands."))]
    Unknown(InlineString),

    #[error("Usage: {0}")]
    #[diagnostic(code(session::usage))]
    Usage(InlineString),
}

/// A parsed command
///
/// Arguments stay as text so field validation reports the same messages
/// as any other input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Add { arrival: &'a str, burst: &'a str },
    Run { quantum: Option<&'a str> },
    Clear,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    /// Parse one input line; blank lines and `#` comments yield `None`
    pub fn parse(line: &'a str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&'a str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("add", &[arrival, burst]) => Command::Add { arrival, burst },
            ("add", _) => return Err(CommandError::Usage("add <arrival> <burst>".into())),
            ("run", &[]) => Command::Run { quantum: None },
            ("run", &[quantum]) => Command::Run {
                quantum: Some(quantum),
            },
            ("run", _) => return Err(CommandError::Usage("run [quantum]".into())),
            ("clear", &[]) => Command::Clear,
            ("help", &[]) => Command::Help,
            ("quit" | "exit", &[]) => Command::Quit,
            ("clear" | "help" | "quit" | "exit", _) => {
                return Err(CommandError::Usage(verb.to_ascii_lowercase().into()))
            }
            _ => return Err(CommandError::Unknown(verb.into())),
        };
        Ok(Some(command))
    }
}
