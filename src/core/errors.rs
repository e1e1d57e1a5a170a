/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::data_structures::InlineString;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// Re-export ProcessError from process module
pub use crate::process::types::ProcessError;

// Re-export InputError from input module
pub use crate::input::InputError;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("No processes have been entered!")]
    #[diagnostic(
        code(scheduler::empty_process_set),
        help("Add at least one process before running the simulation.")
    )]
    EmptyProcessSet,

    #[error("Invalid time quantum: {0}")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("The time quantum must be a whole number of milliseconds greater than zero.")
    )]
    InvalidQuantum(u64),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),
}

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    #[diagnostic(
        code(config::invalid_env),
        help("Unset the variable or give it a valid value.")
    )]
    InvalidEnv {
        key: InlineString,
        value: InlineString,
        reason: InlineString,
    },
}

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Scenario file errors
#[derive(Error, Debug, Diagnostic)]
pub enum ScenarioError {
    #[error("Failed to read scenario {}", .path.display())]
    #[diagnostic(
        code(scenario::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scenario: {0}")]
    #[diagnostic(
        code(scenario::parse),
        help("Expected {{\"quantum\": 2, \"processes\": [{{\"arrival\": 0, \"burst\": 4}}]}}")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Invalid process #{index} in scenario: {source}")]
    #[diagnostic(
        code(scenario::invalid_process),
        help("Burst times must be at least 1ms.")
    )]
    InvalidProcess {
        index: usize,
        #[source]
        source: ProcessError,
    },
}

/// Scenario result
pub type ScenarioResult<T> = Result<T, ScenarioError>;
