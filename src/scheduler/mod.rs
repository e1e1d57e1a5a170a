/*!
 * Round-Robin Scheduler
 * Owns the process set and drives simulation runs to completion
 */

mod state;
mod stats;
pub mod types;

pub use state::{tick, SimulationState};
pub use stats::summarize;
pub use types::{SimulationReport, TimeQuantum};

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::PROCESS_NAME_PREFIX;
use crate::core::types::{ProcessName, Tick};
use crate::monitoring::{EventSink, SimEvent};
use crate::process::ProcessRecord;
use log::info;
use std::fmt::Write;
use tracing::{debug, instrument, warn};

/// Round-robin CPU scheduling simulator
///
/// Every add and every run reports through the injected sink. Runs are
/// synchronous and independent: each one resets all run state, so the same
/// process set can be replayed under different quanta.
///
/// # Examples
///
/// ```
/// use rr_sim::{MemorySink, Scheduler, TimeQuantum};
///
/// let mut scheduler = Scheduler::new(MemorySink::new());
/// scheduler.add_process(0, 4).unwrap();
/// scheduler.add_process(0, 4).unwrap();
///
/// let report = scheduler.run_simulation(TimeQuantum::new(2).unwrap()).unwrap();
/// assert_eq!(report.average_turnaround.to_string(), "7.00");
/// assert_eq!(report.average_waiting.to_string(), "3.00");
/// ```
#[derive(Debug)]
pub struct Scheduler<S: EventSink> {
    state: SimulationState,
    /// Sequence number of the next process name; restarts on `remove_all`
    next_id: usize,
    sink: S,
}

impl<S: EventSink> Scheduler<S> {
    /// Create an empty scheduler writing to `sink`
    pub fn new(sink: S) -> Self {
        Self {
            state: SimulationState::default(),
            next_id: 0,
            sink,
        }
    }

    /// Add a process and report it; returns its generated name
    ///
    /// Burst times below 1ms are rejected and nothing is reported.
    pub fn add_process(&mut self, arrival: Tick, burst: Tick) -> SchedulerResult<ProcessName> {
        let mut name = ProcessName::new();
        // Writing into an in-memory string cannot fail
        let _ = write!(name, "{}{}", PROCESS_NAME_PREFIX, self.next_id);

        let record = ProcessRecord::new(arrival, burst, name.clone())?;
        self.state.processes.push(record);
        self.next_id += 1;

        info!(
            "Process {} added (arrival: {}ms, burst: {}ms)",
            name, arrival, burst
        );
        self.sink.emit(&SimEvent::ProcessAdded {
            name: name.clone(),
            arrival,
            burst,
        });
        Ok(name)
    }

    /// Remove every process; naming starts over at `P0`
    pub fn remove_all(&mut self) {
        let removed = self.state.processes.len();
        self.state.processes.clear();
        self.next_id = 0;
        info!("Removed all {} processes", removed);
    }

    /// Run the simulation to completion with `quantum`
    ///
    /// With no processes only the error line is reported and no tick runs.
    #[instrument(level = "info", skip_all, fields(quantum = quantum.get(), processes = self.state.processes.len()))]
    pub fn run_simulation(&mut self, quantum: TimeQuantum) -> SchedulerResult<SimulationReport> {
        if self.state.processes.is_empty() {
            warn!("Simulation requested with no processes");
            self.sink.emit(&SimEvent::NoProcesses);
            return Err(SchedulerError::EmptyProcessSet);
        }

        self.state.reset(quantum);
        let tick_bound = self.state.tick_bound();
        debug!(tick_bound, "Simulation state reset");

        self.sink.append_line("");
        self.sink.emit(&SimEvent::SimulationStarted);

        while !self.state.is_complete() {
            debug_assert!(
                self.state.current_time <= tick_bound,
                "simulation overran its bound of {} ticks",
                tick_bound
            );
            tick(&mut self.state, &mut self.sink);
        }

        self.sink.emit(&SimEvent::SimulationFinished);
        self.sink.append_line("");

        let report = summarize(&mut self.state, &mut self.sink);
        tracing::info!(
            ticks = report.total_ticks,
            busy = report.busy_ticks,
            context_switches = report.context_switches,
            average_turnaround = %report.average_turnaround,
            average_waiting = %report.average_waiting,
            "Simulation finished"
        );
        Ok(report)
    }

    /// Submitted processes in creation order
    pub fn processes(&self) -> &[ProcessRecord] {
        &self.state.processes
    }

    pub fn len(&self) -> usize {
        self.state.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.processes.is_empty()
    }

    /// Engine state as left by the last run
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: EventSink + Default> Default for Scheduler<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
