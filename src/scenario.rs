/*!
 * Scenario Files
 *
 * JSON description of a process set and optional quantum:
 *
 * ```json
 * { "quantum": 2, "processes": [ { "arrival": 0, "burst": 4 } ] }
 * ```
 */

use crate::core::errors::{ProcessError, ScenarioError, ScenarioResult, SchedulerError};
use crate::core::limits::MIN_BURST;
use crate::core::types::{ProcessName, Tick};
use crate::monitoring::EventSink;
use crate::scheduler::{Scheduler, TimeQuantum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// One process of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessSpec {
    pub arrival: Tick,
    pub burst: Tick,
}

/// Process set plus the quantum to run it with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<TimeQuantum>,
    pub processes: Vec<ProcessSpec>,
}

impl Scenario {
    /// Load a scenario file
    pub fn from_path(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json_str(&text)?;
        info!(path = %path.display(), processes = scenario.processes.len(), "Scenario loaded");
        Ok(scenario)
    }

    /// Parse and validate scenario JSON
    pub fn from_json_str(json: &str) -> ScenarioResult<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check every process before anything is added
    pub fn validate(&self) -> ScenarioResult<()> {
        match self.processes.iter().position(|p| p.burst < MIN_BURST) {
            Some(index) => Err(ScenarioError::InvalidProcess {
                index,
                source: ProcessError::InvalidArgument(
                    format!("burst time must be at least {}ms", MIN_BURST).into(),
                ),
            }),
            None => Ok(()),
        }
    }

    /// Add every process to `scheduler`, in file order
    ///
    /// Nothing is added when any process is invalid.
    pub fn apply<S: EventSink>(
        &self,
        scheduler: &mut Scheduler<S>,
    ) -> ScenarioResult<Vec<ProcessName>> {
        self.validate()?;

        self.processes
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                scheduler
                    .add_process(spec.arrival, spec.burst)
                    .map_err(|e| match e {
                        SchedulerError::Process(source) => {
                            ScenarioError::InvalidProcess { index, source }
                        }
                        other => ScenarioError::InvalidProcess {
                            index,
                            source: ProcessError::InvalidArgument(other.to_string().into()),
                        },
                    })
            })
            .collect()
    }

    /// Quantum to use: `requested`, then the file's, then `fallback`
    pub fn quantum_or(&self, requested: Option<TimeQuantum>, fallback: TimeQuantum) -> TimeQuantum {
        requested.or(self.quantum).unwrap_or(fallback)
    }
}
