/*!
 * Process Record
 * One schedulable unit and its per-run timing state
 */

use super::types::{ProcessError, ProcessResult, ProcessStats};
use crate::core::limits::MIN_BURST;
use crate::core::types::{ProcessName, Tick};
use serde::Serialize;

/// A submitted process
///
/// Arrival and burst are fixed at creation. Everything else is run state,
/// reinitialised by [`ProcessRecord::reset`] before every simulation so the
/// same set can be replayed under different quanta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRecord {
    name: ProcessName,
    arrival: Tick,
    burst: Tick,

    remaining: Tick,
    completion: Tick,
    turnaround: Tick,
    waiting: Tick,
}

impl ProcessRecord {
    /// Create a record; burst times below 1ms are rejected
    pub fn new(arrival: Tick, burst: Tick, name: ProcessName) -> ProcessResult<Self> {
        if burst < MIN_BURST {
            return Err(ProcessError::InvalidArgument(
                format!("burst time of {} must be at least {}ms", name, MIN_BURST).into(),
            ));
        }

        let mut record = Self {
            name,
            arrival,
            burst,
            remaining: 0,
            completion: 0,
            turnaround: 0,
            waiting: 0,
        };
        record.reset();
        Ok(record)
    }

    /// Restore the run state to its pre-simulation values
    pub fn reset(&mut self) {
        self.remaining = self.burst;
        self.completion = 0;
        self.turnaround = 0;
        self.waiting = 0;
    }

    /// Derive turnaround and waiting time from the completion time
    ///
    /// Only meaningful once the process has terminated.
    pub fn compute_stats(&mut self) -> ProcessStats {
        debug_assert!(self.is_finished(), "{} has not terminated", self.name);
        debug_assert!(
            self.completion >= self.arrival + self.burst,
            "{} completed at {} before it could have run to completion",
            self.name,
            self.completion
        );

        self.turnaround = self.completion.saturating_sub(self.arrival);
        self.waiting = self.turnaround.saturating_sub(self.burst);

        ProcessStats {
            name: self.name.clone(),
            arrival: self.arrival,
            burst: self.burst,
            completion: self.completion,
            turnaround: self.turnaround,
            waiting: self.waiting,
        }
    }

    /// Consume one millisecond of CPU time
    pub(crate) fn run_one_tick(&mut self) {
        debug_assert!(self.remaining > 0, "{} ran past its burst", self.name);
        self.remaining -= 1;
    }

    pub(crate) fn mark_completed(&mut self, at: Tick) {
        self.completion = at;
    }

    #[inline]
    pub fn name(&self) -> &ProcessName {
        &self.name
    }

    #[inline]
    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    #[inline]
    pub fn burst(&self) -> Tick {
        self.burst
    }

    #[inline]
    pub fn remaining(&self) -> Tick {
        self.remaining
    }

    /// Completion time; 0 until the process has terminated
    #[inline]
    pub fn completion(&self) -> Tick {
        self.completion
    }

    #[inline]
    pub fn turnaround(&self) -> Tick {
        self.turnaround
    }

    #[inline]
    pub fn waiting(&self) -> Tick {
        self.waiting
    }

    /// True once all burst time has been consumed
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(arrival: Tick, burst: Tick) -> ProcessRecord {
        ProcessRecord::new(arrival, burst, "P0".into()).unwrap()
    }

    #[test]
    fn test_new_starts_reset() {
        let p = record(3, 7);
        assert_eq!(p.name(), "P0");
        assert_eq!(p.arrival(), 3);
        assert_eq!(p.burst(), 7);
        assert_eq!(p.remaining(), 7);
        assert_eq!(p.completion(), 0);
        assert_eq!(p.turnaround(), 0);
        assert_eq!(p.waiting(), 0);
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err = ProcessRecord::new(0, 0, "P4".into()).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidArgument(_)));
        assert!(err.to_string().contains("P4"));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut p = record(0, 3);
        p.run_one_tick();
        p.run_one_tick();
        p.mark_completed(9);

        p.reset();
        let once = p.clone();
        p.reset();
        assert_eq!(p, once);
        assert_eq!(p.remaining(), 3);
        assert_eq!(p.completion(), 0);
    }

    #[test]
    fn test_compute_stats() {
        let mut p = record(2, 3);
        for _ in 0..3 {
            p.run_one_tick();
        }
        assert!(p.is_finished());
        p.mark_completed(8);

        let stats = p.compute_stats();
        assert_eq!(stats.turnaround, 6);
        assert_eq!(stats.waiting, 3);
        assert_eq!(p.turnaround(), 6);
        assert_eq!(p.waiting(), 3);
    }

    #[test]
    fn test_reset_clears_stats() {
        let mut p = record(0, 1);
        p.run_one_tick();
        p.mark_completed(4);
        p.compute_stats();
        assert_eq!(p.waiting(), 3);

        p.reset();
        assert_eq!(p.turnaround(), 0);
        assert_eq!(p.waiting(), 0);
    }
}
