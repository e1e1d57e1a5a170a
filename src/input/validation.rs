/*!
 * Field Validation
 *
 * Values are read as signed 32-bit integers so that "-3" is reported as a
 * negative value rather than as text that is not a number.
 */

use crate::core::types::Tick;
use crate::scheduler::TimeQuantum;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input validation result
pub type InputResult<T> = Result<T, InputError>;

/// A user-editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Arrival,
    Burst,
    Quantum,
}

impl InputField {
    /// Field name as shown to the user
    pub const fn label(self) -> &'static str {
        match self {
            InputField::Arrival => "Arrival time",
            InputField::Burst => "Burst time",
            InputField::Quantum => "Time quantum",
        }
    }

    /// Subject used in range messages
    pub const fn subject(self) -> &'static str {
        match self {
            InputField::Arrival => "Arrival time value",
            InputField::Burst => "Burst time value",
            InputField::Quantum => "Time quantum",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input errors
#[derive(Error, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum InputError {
    #[error("{} must be a number!", .0.label())]
    #[diagnostic(code(input::not_a_number), help("Enter a whole number of milliseconds."))]
    NotANumber(InputField),

    #[error("{} cannot be negative!", .0.subject())]
    #[diagnostic(code(input::negative))]
    Negative(InputField),

    #[error("{} must be greater than zero!", .0.subject())]
    #[diagnostic(code(input::not_positive))]
    NotPositive(InputField),
}

impl InputError {
    pub fn field(&self) -> InputField {
        match *self {
            InputError::NotANumber(f) | InputError::Negative(f) | InputError::NotPositive(f) => f,
        }
    }
}

fn parse_number(text: &str, field: InputField) -> InputResult<i32> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| InputError::NotANumber(field))
}

/// Arrival time: a number, zero or more
pub fn parse_arrival(text: &str) -> InputResult<Tick> {
    let value = parse_number(text, InputField::Arrival)?;
    if value < 0 {
        return Err(InputError::Negative(InputField::Arrival));
    }
    Ok(Tick::from(value.unsigned_abs()))
}

/// Burst time: a number, at least one
pub fn parse_burst(text: &str) -> InputResult<Tick> {
    positive(text, InputField::Burst)
}

/// Time quantum: a number, at least one
pub fn parse_quantum(text: &str) -> InputResult<TimeQuantum> {
    let ticks = positive(text, InputField::Quantum)?;
    TimeQuantum::new(ticks).map_err(|_| InputError::NotPositive(InputField::Quantum))
}

fn positive(text: &str, field: InputField) -> InputResult<Tick> {
    let value = parse_number(text, field)?;
    if value <= 0 {
        return Err(InputError::NotPositive(field));
    }
    Ok(Tick::from(value.unsigned_abs()))
}
