/*!
 * Event System
 * Strongly-typed simulation events and their log-line rendering
 */

use crate::core::types::{Centi, ProcessName, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event category for organization and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    /// Process set changes
    Process,
    /// Run boundaries and errors
    Simulation,
    /// Run-queue transitions inside the tick loop
    Scheduler,
    /// Post-run statistics
    Report,
}

/// Every observable transition of the simulator
///
/// The `Display` implementation is the exact text line written to the
/// event sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    ProcessAdded {
        name: ProcessName,
        arrival: Tick,
        burst: Tick,
    },
    /// Process joined the tail of the run-queue
    Arrived {
        time: Tick,
        name: ProcessName,
    },
    /// Process became head of the run-queue and consumed its first tick
    Started {
        time: Tick,
        name: ProcessName,
    },
    /// Quantum expired and the process was rotated to the tail
    Paused {
        time: Tick,
        name: ProcessName,
    },
    Terminated {
        time: Tick,
        name: ProcessName,
    },
    NoProcesses,
    SimulationStarted,
    SimulationFinished,
    ProcessStats {
        name: ProcessName,
        turnaround: Tick,
        waiting: Tick,
    },
    AverageTurnaround {
        average: Centi,
    },
    AverageWaiting {
        average: Centi,
    },
}

impl SimEvent {
    pub fn category(&self) -> Category {
        match self {
            SimEvent::ProcessAdded { .. } => Category::Process,
            SimEvent::Arrived { .. }
            | SimEvent::Started { .. }
            | SimEvent::Paused { .. }
            | SimEvent::Terminated { .. } => Category::Scheduler,
            SimEvent::NoProcesses | SimEvent::SimulationStarted | SimEvent::SimulationFinished => {
                Category::Simulation
            }
            SimEvent::ProcessStats { .. }
            | SimEvent::AverageTurnaround { .. }
            | SimEvent::AverageWaiting { .. } => Category::Report,
        }
    }

    /// Simulation time of tick-loop events
    pub fn time(&self) -> Option<Tick> {
        match self {
            SimEvent::Arrived { time, .. }
            | SimEvent::Started { time, .. }
            | SimEvent::Paused { time, .. }
            | SimEvent::Terminated { time, .. } => Some(*time),
            _ => None,
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::ProcessAdded {
                name,
                arrival,
                burst,
            } => write!(
                f,
                "Process {} has been added (Arrival: {}ms, Burst: {}ms)",
                name, arrival, burst
            ),
            SimEvent::Arrived { time, name } => write!(f, "{} ms: {} added to runqueue", time, name),
            SimEvent::Started { time, name } => {
                write!(f, "{} ms: {} has started running", time, name)
            }
            SimEvent::Paused { time, name } => write!(f, "{} ms: {} has been paused", time, name),
            SimEvent::Terminated { time, name } => write!(f, "{} ms: {} has terminated", time, name),
            SimEvent::NoProcesses => f.write_str("ERROR: No processes have been entered!"),
            SimEvent::SimulationStarted => f.write_str("******** Simulation Started ********"),
            SimEvent::SimulationFinished => f.write_str("******** Simulation Finished ********"),
            SimEvent::ProcessStats {
                name,
                turnaround,
                waiting,
            } => write!(
                f,
                "{}: Turnaround Time = {}ms, Waiting Time = {}ms",
                name, turnaround, waiting
            ),
            SimEvent::AverageTurnaround { average } => {
                write!(f, "Average Turnaround Time = {}ms", average)
            }
            SimEvent::AverageWaiting { average } => {
                write!(f, "Average Waiting Time = {}ms", average)
            }
        }
    }
}
