/*!
 * Simulation State
 * Engine state and the per-millisecond tick transition
 */

use super::types::TimeQuantum;
use crate::core::types::Tick;
use crate::monitoring::{EventSink, SimEvent};
use crate::process::ProcessRecord;
use std::collections::VecDeque;
use tracing::trace;

/// Everything the tick loop reads and mutates
///
/// The run-queue holds indices into `processes`; the head of the queue is
/// the process holding the CPU.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub(super) processes: Vec<ProcessRecord>,
    pub(super) run_queue: VecDeque<usize>,
    pub(super) quantum: TimeQuantum,
    pub(super) current_time: Tick,
    /// Ticks the current head has run since it last became head
    pub(super) segment: Tick,
    pub(super) terminated: usize,
    pub(super) busy_ticks: Tick,
    pub(super) context_switches: u64,
}

impl SimulationState {
    /// State over an existing process set, ready to run
    pub fn new(processes: Vec<ProcessRecord>, quantum: TimeQuantum) -> Self {
        let mut state = Self {
            processes,
            ..Self::default()
        };
        state.reset(quantum);
        state
    }

    /// Prepare a fresh run: empty queue, zeroed counters, reset records
    pub fn reset(&mut self, quantum: TimeQuantum) {
        self.quantum = quantum;
        self.run_queue.clear();
        self.current_time = 0;
        self.segment = 0;
        self.terminated = 0;
        self.busy_ticks = 0;
        self.context_switches = 0;

        for process in &mut self.processes {
            process.reset();
        }
    }

    /// True once every process has terminated
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.terminated == self.processes.len()
    }

    /// Latest time at which a termination can be observed
    ///
    /// The loop never starts a tick later than this.
    pub fn tick_bound(&self) -> Tick {
        let latest_arrival = self
            .processes
            .iter()
            .map(ProcessRecord::arrival)
            .max()
            .unwrap_or(0);
        let total_burst: Tick = self.processes.iter().map(ProcessRecord::burst).sum();
        latest_arrival + total_burst
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    /// Queued processes, head first
    pub fn run_queue(&self) -> impl Iterator<Item = &ProcessRecord> + '_ {
        self.run_queue.iter().map(move |&index| &self.processes[index])
    }

    /// Process currently holding the CPU
    pub fn head(&self) -> Option<&ProcessRecord> {
        self.run_queue.front().map(|&index| &self.processes[index])
    }

    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }

    pub fn current_time(&self) -> Tick {
        self.current_time
    }

    pub fn segment(&self) -> Tick {
        self.segment
    }

    pub fn terminated(&self) -> usize {
        self.terminated
    }

    /// Ticks in which a process consumed CPU time
    pub fn busy_ticks(&self) -> Tick {
        self.busy_ticks
    }

    pub fn context_switches(&self) -> u64 {
        self.context_switches
    }
}

/// Advance the simulation by one millisecond
///
/// Order matters: arrivals are queued before the termination check so a
/// process arriving at an idle CPU runs in the same tick, and a process
/// finishing exactly at quantum expiry is retired rather than rotated.
pub fn tick(state: &mut SimulationState, sink: &mut dyn EventSink) {
    admit_arrivals(state, sink);
    retire_finished_head(state, sink);
    rotate_on_quantum_expiry(state, sink);
    run_head(state, sink);
    state.current_time += 1;
}

fn admit_arrivals(state: &mut SimulationState, sink: &mut dyn EventSink) {
    let now = state.current_time;

    // Creation order breaks ties between simultaneous arrivals
    for (index, process) in state.processes.iter().enumerate() {
        if process.arrival() == now {
            state.run_queue.push_back(index);
            trace!(time = now, process = %process.name(), "arrived");
            sink.emit(&SimEvent::Arrived {
                time: now,
                name: process.name().clone(),
            });
        }
    }
}

fn retire_finished_head(state: &mut SimulationState, sink: &mut dyn EventSink) {
    let now = state.current_time;
    let Some(&head) = state.run_queue.front() else {
        return;
    };

    let process = &mut state.processes[head];
    if !process.is_finished() {
        return;
    }

    process.mark_completed(now);
    trace!(time = now, process = %process.name(), "terminated");
    sink.emit(&SimEvent::Terminated {
        time: now,
        name: process.name().clone(),
    });

    state.run_queue.pop_front();
    state.terminated += 1;
    state.segment = 0;
}

fn rotate_on_quantum_expiry(state: &mut SimulationState, sink: &mut dyn EventSink) {
    // A lone process keeps the CPU past its quantum
    if state.run_queue.len() < 2 || state.segment != state.quantum.get() {
        return;
    }

    let now = state.current_time;
    if let Some(head) = state.run_queue.pop_front() {
        let process = &state.processes[head];
        trace!(time = now, process = %process.name(), "quantum expired");
        sink.emit(&SimEvent::Paused {
            time: now,
            name: process.name().clone(),
        });
        state.run_queue.push_back(head);
        state.context_switches += 1;
    }
    state.segment = 0;
}

fn run_head(state: &mut SimulationState, sink: &mut dyn EventSink) {
    let now = state.current_time;
    let Some(&head) = state.run_queue.front() else {
        return;
    };

    let process = &mut state.processes[head];
    process.run_one_tick();

    if state.segment == 0 {
        trace!(time = now, process = %process.name(), remaining = process.remaining(), "started");
        sink.emit(&SimEvent::Started {
            time: now,
            name: process.name().clone(),
        });
    }

    state.segment += 1;
    state.busy_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::RecordingSink;

    fn state(specs: &[(Tick, Tick)], quantum: Tick) -> SimulationState {
        let processes = specs
            .iter()
            .enumerate()
            .map(|(i, &(arrival, burst))| {
                ProcessRecord::new(arrival, burst, format!("P{}", i).into()).unwrap()
            })
            .collect();
        SimulationState::new(processes, TimeQuantum::new(quantum).unwrap())
    }

    fn head_name(state: &SimulationState) -> Option<String> {
        state.head().map(|p| p.name().to_string())
    }

    #[test]
    fn test_first_tick_admits_and_starts() {
        let mut s = state(&[(0, 3), (0, 2)], 2);
        let mut sink = RecordingSink::new();

        tick(&mut s, &mut sink);

        assert_eq!(s.current_time(), 1);
        assert_eq!(s.segment(), 1);
        assert_eq!(head_name(&s).as_deref(), Some("P0"));
        assert_eq!(s.processes()[0].remaining(), 2);
        assert_eq!(
            sink.lines(),
            &[
                "0 ms: P0 added to runqueue".to_string(),
                "0 ms: P1 added to runqueue".to_string(),
                "0 ms: P0 has started running".to_string(),
            ]
        );
    }

    #[test]
    fn test_idle_tick_only_advances_time() {
        let mut s = state(&[(3, 1)], 1);
        let mut sink = RecordingSink::new();

        tick(&mut s, &mut sink);

        assert_eq!(s.current_time(), 1);
        assert_eq!(s.busy_ticks(), 0);
        assert!(s.head().is_none());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_quantum_expiry_rotates_head() {
        let mut s = state(&[(0, 4), (0, 4)], 2);
        let mut sink = RecordingSink::new();

        tick(&mut s, &mut sink);
        tick(&mut s, &mut sink);
        sink.take_events();
        tick(&mut s, &mut sink);

        assert_eq!(
            sink.events(),
            &[
                SimEvent::Paused {
                    time: 2,
                    name: "P0".into()
                },
                SimEvent::Started {
                    time: 2,
                    name: "P1".into()
                },
            ]
        );
        let order: Vec<_> = s.run_queue().map(|p| p.name().to_string()).collect();
        assert_eq!(order, ["P1", "P0"]);
        assert_eq!(s.context_switches(), 1);
    }

    #[test]
    fn test_lone_process_is_not_rotated() {
        let mut s = state(&[(0, 5)], 1);
        let mut sink = RecordingSink::new();

        for _ in 0..5 {
            tick(&mut s, &mut sink);
        }

        assert_eq!(s.context_switches(), 0);
        assert_eq!(s.segment(), 5);
        assert!(sink
            .events()
            .iter()
            .all(|e| !matches!(e, SimEvent::Paused { .. })));
    }

    #[test]
    fn test_finish_at_quantum_expiry_retires_instead_of_rotating() {
        let mut s = state(&[(0, 2), (0, 2)], 2);
        let mut sink = RecordingSink::new();

        tick(&mut s, &mut sink);
        tick(&mut s, &mut sink);
        sink.take_events();
        tick(&mut s, &mut sink);

        assert_eq!(
            sink.events(),
            &[
                SimEvent::Terminated {
                    time: 2,
                    name: "P0".into()
                },
                SimEvent::Started {
                    time: 2,
                    name: "P1".into()
                },
            ]
        );
        assert_eq!(s.terminated(), 1);
        assert_eq!(s.processes()[0].completion(), 2);
    }

    #[test]
    fn test_reset_restores_fresh_run() {
        let mut s = state(&[(0, 2), (1, 1)], 1);
        let mut sink = RecordingSink::new();
        while !s.is_complete() {
            tick(&mut s, &mut sink);
        }

        s.reset(TimeQuantum::new(3).unwrap());

        assert_eq!(s.current_time(), 0);
        assert_eq!(s.terminated(), 0);
        assert_eq!(s.busy_ticks(), 0);
        assert_eq!(s.quantum().get(), 3);
        assert!(s.head().is_none());
        assert!(s.processes().iter().all(|p| p.remaining() == p.burst()));
        assert!(s.processes().iter().all(|p| p.completion() == 0));
    }

    #[test]
    fn test_tick_bound() {
        let s = state(&[(0, 4), (10, 2), (3, 1)], 2);
        assert_eq!(s.tick_bound(), 10 + 7);
    }
}
