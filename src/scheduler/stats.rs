/*!
 * Scheduler Statistics
 * Post-run turnaround and waiting time report
 */

use super::state::SimulationState;
use super::types::SimulationReport;
use crate::core::types::{Centi, Tick};
use crate::monitoring::{EventSink, SimEvent};

/// Compute per-process and average statistics, in creation order
///
/// Must only run after every process has terminated.
pub fn summarize(state: &mut SimulationState, sink: &mut dyn EventSink) -> SimulationReport {
    debug_assert!(state.is_complete(), "statistics requested mid-run");

    let mut total_turnaround: Tick = 0;
    let mut total_waiting: Tick = 0;
    let mut processes = Vec::with_capacity(state.processes.len());

    for process in &mut state.processes {
        let stats = process.compute_stats();
        total_turnaround += stats.turnaround;
        total_waiting += stats.waiting;

        sink.emit(&SimEvent::ProcessStats {
            name: stats.name.clone(),
            turnaround: stats.turnaround,
            waiting: stats.waiting,
        });
        processes.push(stats);
    }

    let count = processes.len() as u64;
    let average_turnaround = Centi::from_ratio(total_turnaround, count);
    let average_waiting = Centi::from_ratio(total_waiting, count);

    sink.emit(&SimEvent::AverageTurnaround {
        average: average_turnaround,
    });
    sink.emit(&SimEvent::AverageWaiting {
        average: average_waiting,
    });

    SimulationReport {
        quantum: state.quantum,
        total_ticks: state.current_time,
        busy_ticks: state.busy_ticks,
        context_switches: state.context_switches,
        processes,
        average_turnaround,
        average_waiting,
    }
}
