/*!
 * Process Types
 * Common types for process records
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{ProcessName, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(process::invalid_argument),
        help("Arrival times must be 0 or more and burst times at least 1ms.")
    )]
    InvalidArgument(InlineString),
}

/// Timing statistics of one process after a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessStats {
    pub name: ProcessName,
    pub arrival: Tick,
    pub burst: Tick,
    pub completion: Tick,
    pub turnaround: Tick,
    pub waiting: Tick,
}
