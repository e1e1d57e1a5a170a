/*!
 * Scheduler Tests
 * End-to-end Round-Robin runs checked against their full event logs
 */

use pretty_assertions::assert_eq;
use rr_sim::{
    EventSink, MemorySink, RecordingSink, Scheduler, SchedulerError, SimEvent, Tick, TimeQuantum,
};

fn quantum(ticks: Tick) -> TimeQuantum {
    TimeQuantum::new(ticks).unwrap()
}

/// Scheduler loaded with `specs`, with the "added" lines discarded
fn loaded(specs: &[(Tick, Tick)]) -> Scheduler<MemorySink> {
    let mut scheduler = Scheduler::new(MemorySink::new());
    for &(arrival, burst) in specs {
        scheduler.add_process(arrival, burst).unwrap();
    }
    scheduler.sink_mut().clear();
    scheduler
}

fn lines(scheduler: &Scheduler<MemorySink>) -> Vec<&str> {
    scheduler.sink().lines().iter().map(String::as_str).collect()
}

#[test]
fn test_two_equal_processes_quantum_two() {
    let mut scheduler = loaded(&[(0, 4), (0, 4)]);

    let report = scheduler.run_simulation(quantum(2)).unwrap();

    assert_eq!(
        lines(&scheduler),
        [
            "",
            "******** Simulation Started ********",
            "0 ms: P0 added to runqueue",
            "0 ms: P1 added to runqueue",
            "0 ms: P0 has started running",
            "2 ms: P0 has been paused",
            "2 ms: P1 has started running",
            "4 ms: P1 has been paused",
            "4 ms: P0 has started running",
            "6 ms: P0 has terminated",
            "6 ms: P1 has started running",
            "8 ms: P1 has terminated",
            "******** Simulation Finished ********",
            "",
            "P0: Turnaround Time = 6ms, Waiting Time = 2ms",
            "P1: Turnaround Time = 8ms, Waiting Time = 4ms",
            "Average Turnaround Time = 7.00ms",
            "Average Waiting Time = 3.00ms",
        ]
    );
    assert_eq!(report.average_turnaround.to_string(), "7.00");
    assert_eq!(report.average_waiting.to_string(), "3.00");
}

#[test]
fn test_single_process_any_quantum() {
    for q in [1, 2, 5, 100] {
        let mut scheduler = loaded(&[(0, 5)]);

        let report = scheduler.run_simulation(quantum(q)).unwrap();

        let p0 = report.process("P0").unwrap();
        assert_eq!(p0.completion, 5, "quantum {}", q);
        assert_eq!(p0.turnaround, 5);
        assert_eq!(p0.waiting, 0);
        assert_eq!(report.context_switches, 0);
        assert!(lines(&scheduler).iter().all(|l| !l.contains("paused")));
    }
}

#[test]
fn test_idle_gap_between_processes() {
    let mut scheduler = loaded(&[(0, 3), (5, 2)]);

    let report = scheduler.run_simulation(quantum(2)).unwrap();

    assert_eq!(
        &lines(&scheduler)[2..8],
        [
            "0 ms: P0 added to runqueue",
            "0 ms: P0 has started running",
            "3 ms: P0 has terminated",
            "5 ms: P1 added to runqueue",
            "5 ms: P1 has started running",
            "7 ms: P1 has terminated",
        ]
    );
    assert_eq!(report.average_turnaround.to_string(), "2.50");
    assert_eq!(report.average_waiting.to_string(), "0.00");
    assert_eq!(report.busy_ticks, 5);
}

#[test]
fn test_arrival_queues_ahead_of_paused_process() {
    let mut scheduler = Scheduler::new(RecordingSink::new());
    scheduler.add_process(0, 3).unwrap();
    scheduler.add_process(2, 1).unwrap();
    scheduler.sink_mut().take_events();

    let report = scheduler.run_simulation(quantum(2)).unwrap();

    let timeline: Vec<SimEvent> = scheduler
        .sink()
        .events()
        .iter()
        .filter(|e| e.time().is_some())
        .cloned()
        .collect();
    assert_eq!(
        timeline,
        vec![
            SimEvent::Arrived { time: 0, name: "P0".into() },
            SimEvent::Started { time: 0, name: "P0".into() },
            SimEvent::Arrived { time: 2, name: "P1".into() },
            SimEvent::Paused { time: 2, name: "P0".into() },
            SimEvent::Started { time: 2, name: "P1".into() },
            SimEvent::Terminated { time: 3, name: "P1".into() },
            SimEvent::Started { time: 3, name: "P0".into() },
            SimEvent::Terminated { time: 4, name: "P0".into() },
        ]
    );
    assert_eq!(report.process("P0").unwrap().waiting, 1);
    assert_eq!(report.process("P1").unwrap().waiting, 0);
}

#[test]
fn test_repeated_runs_are_independent() {
    let mut scheduler = loaded(&[(0, 4), (0, 4), (1, 3)]);

    let first = scheduler.run_simulation(quantum(2)).unwrap();
    let first_log = scheduler.sink().text();

    scheduler.run_simulation(quantum(7)).unwrap();
    scheduler.sink_mut().clear();

    let again = scheduler.run_simulation(quantum(2)).unwrap();

    assert_eq!(again, first);
    assert_eq!(scheduler.sink().text(), first_log);
}

#[test]
fn test_empty_run_emits_only_the_error() {
    let mut scheduler = Scheduler::new(MemorySink::new());

    assert_eq!(
        scheduler.run_simulation(quantum(2)),
        Err(SchedulerError::EmptyProcessSet)
    );
    assert_eq!(lines(&scheduler), ["ERROR: No processes have been entered!"]);
}

#[test]
fn test_remove_all_then_rerun() {
    let mut scheduler = loaded(&[(0, 2)]);
    scheduler.run_simulation(quantum(1)).unwrap();

    scheduler.remove_all();
    scheduler.sink_mut().clear();

    assert!(scheduler.run_simulation(quantum(1)).is_err());
    assert_eq!(scheduler.add_process(0, 1).unwrap(), "P0");
}

#[test]
fn test_uneven_averages_are_rounded() {
    // Completions at 4, 7 and 6; waitings 2, 4 and 4
    let mut scheduler = loaded(&[(0, 2), (0, 3), (0, 2)]);

    let report = scheduler.run_simulation(quantum(1)).unwrap();

    let turnaround: Vec<Tick> = report.processes.iter().map(|p| p.turnaround).collect();
    assert_eq!(turnaround, [4, 7, 6]);
    assert_eq!(report.average_turnaround.to_string(), "5.67");
    assert_eq!(report.average_waiting.to_string(), "3.33");
}
