/*!
 * Scheduler Types
 * Domain types for scheduler operations
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{DEFAULT_QUANTUM, MIN_QUANTUM};
use crate::core::types::{Centi, ProcessName, Tick};
use crate::process::ProcessStats;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Time quantum: the longest contiguous stretch a process may hold the CPU
/// while others are waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(Tick);

impl TimeQuantum {
    /// Create new time quantum (at least 1ms)
    pub fn new(ticks: Tick) -> SchedulerResult<Self> {
        if ticks < MIN_QUANTUM {
            return Err(SchedulerError::InvalidQuantum(ticks));
        }
        Ok(Self(ticks))
    }

    /// Get milliseconds
    #[inline(always)]
    pub const fn get(self) -> Tick {
        self.0
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self(DEFAULT_QUANTUM)
    }
}

impl fmt::Display for TimeQuantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl TryFrom<Tick> for TimeQuantum {
    type Error = SchedulerError;

    fn try_from(ticks: Tick) -> SchedulerResult<Self> {
        Self::new(ticks)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = Tick::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// Outcome of one completed simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationReport {
    pub quantum: TimeQuantum,
    /// Ticks executed by the loop, including idle ones and the final check
    pub total_ticks: Tick,
    /// Ticks in which some process held the CPU
    pub busy_ticks: Tick,
    /// Pauses caused by quantum expiry
    pub context_switches: u64,
    pub processes: Vec<ProcessStats>,
    pub average_turnaround: Centi,
    pub average_waiting: Centi,
}

impl SimulationReport {
    /// Stats for one process, by name
    pub fn process(&self, name: &str) -> Option<&ProcessStats> {
        self.processes.iter().find(|p| p.name == *name)
    }

    /// Time of the last termination
    pub fn makespan(&self) -> Tick {
        self.processes
            .iter()
            .map(|p| p.completion)
            .max()
            .unwrap_or(0)
    }

    pub fn names(&self) -> impl Iterator<Item = &ProcessName> {
        self.processes.iter().map(|p| &p.name)
    }
}
