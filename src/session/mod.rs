/*!
 * Session
 *
 * Text front end over the scheduler: validates typed values, reports
 * problems as `ERROR:` lines, and dispatches line commands.
 */

mod commands;

pub use commands::{Command, CommandError, HELP_LINES};

use crate::config::SimulatorConfig;
use crate::core::errors::SchedulerError;
use crate::core::types::ProcessName;
use crate::input::{parse_arrival, parse_burst, parse_quantum, InputError};
use crate::monitoring::EventSink;
use crate::scheduler::{Scheduler, SimulationReport, TimeQuantum};
use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

const WELCOME: &str = "Please submit processes to be simulated...";
const REMOVED: &str = "All processes have been removed.";

/// Session errors
///
/// Every variant has already been reported to the sink when returned.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SessionError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Command(#[from] CommandError),
}

/// Session result
pub type SessionResult<T> = Result<T, SessionError>;

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// A simulation completed
    Ran(SimulationReport),
    Quit,
}

/// Interactive simulation session
#[derive(Debug)]
pub struct Session<S: EventSink> {
    scheduler: Scheduler<S>,
    config: SimulatorConfig,
}

impl<S: EventSink> Session<S> {
    /// Start a session and greet the user
    pub fn new(sink: S, config: SimulatorConfig) -> Self {
        let mut scheduler = Scheduler::new(sink);
        scheduler.sink_mut().append_line(WELCOME);
        Self { scheduler, config }
    }

    /// Validate and submit a process
    ///
    /// Arrival is checked first; when it is invalid the burst text is not
    /// looked at.
    pub fn submit_process(&mut self, arrival: &str, burst: &str) -> SessionResult<ProcessName> {
        let arrival = self.report(parse_arrival(arrival))?;
        let burst = self.report(parse_burst(burst))?;
        Ok(self.scheduler.add_process(arrival, burst)?)
    }

    /// Validate the quantum text and run
    pub fn run(&mut self, quantum: &str) -> SessionResult<SimulationReport> {
        let quantum = self.report(parse_quantum(quantum))?;
        self.run_with(quantum)
    }

    /// Run with an already validated quantum
    pub fn run_with(&mut self, quantum: TimeQuantum) -> SessionResult<SimulationReport> {
        Ok(self.scheduler.run_simulation(quantum)?)
    }

    /// Remove all processes and start over with a clean log
    pub fn remove_all(&mut self) {
        self.scheduler.remove_all();
        let sink = self.scheduler.sink_mut();
        sink.clear();
        sink.append_line(REMOVED);
        sink.append_line(WELCOME);
    }

    /// Execute one command line
    ///
    /// Failures are reported to the sink and the session carries on.
    pub fn execute(&mut self, line: &str) -> CommandOutcome {
        match self.dispatch(line) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, line, "Command failed");
                CommandOutcome::Continue
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> SessionResult<CommandOutcome> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(CommandOutcome::Continue),
            Err(e) => {
                let sink = self.scheduler.sink_mut();
                sink.append_line(&format!("ERROR: {}", e));
                if let CommandError::Unknown(_) = e {
                    sink.append_line("Type 'help' for a list of commands.");
                }
                return Err(e.into());
            }
        };

        match command {
            Command::Add { arrival, burst } => {
                self.submit_process(arrival, burst)?;
            }
            Command::Run { quantum: Some(q) } => {
                return self.run(q).map(CommandOutcome::Ran);
            }
            Command::Run { quantum: None } => {
                return self
                    .run_with(self.config.default_quantum)
                    .map(CommandOutcome::Ran);
            }
            Command::Clear => self.remove_all(),
            Command::Help => {
                let sink = self.scheduler.sink_mut();
                for line in HELP_LINES {
                    sink.append_line(line);
                }
            }
            Command::Quit => return Ok(CommandOutcome::Quit),
        }
        Ok(CommandOutcome::Continue)
    }

    fn report<T>(&mut self, result: Result<T, InputError>) -> SessionResult<T> {
        result.map_err(|e| {
            self.scheduler
                .sink_mut()
                .append_line(&format!("ERROR: {}", e));
            SessionError::Input(e)
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler<S> {
        &mut self.scheduler
    }

    pub fn sink(&self) -> &S {
        self.scheduler.sink()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.scheduler.sink_mut()
    }

    pub fn into_sink(self) -> S {
        self.scheduler.into_sink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputField;
    use crate::monitoring::MemorySink;
    use pretty_assertions::assert_eq;

    fn session() -> Session<MemorySink> {
        Session::new(MemorySink::new(), SimulatorConfig::default())
    }

    #[test]
    fn test_new_greets() {
        let s = session();
        assert_eq!(s.sink().lines(), &[WELCOME.to_string()]);
    }

    #[test]
    fn test_invalid_arrival_short_circuits() {
        let mut s = session();

        let err = s.submit_process("-2", "abc").unwrap_err();

        assert_eq!(err, SessionError::Input(InputError::Negative(InputField::Arrival)));
        assert_eq!(
            s.sink().lines().last().map(String::as_str),
            Some("ERROR: Arrival time value cannot be negative!")
        );
        assert_eq!(s.sink().len(), 2);
        assert!(s.scheduler().is_empty());
    }

    #[test]
    fn test_invalid_burst_reported() {
        let mut s = session();
        s.submit_process("1", "0").unwrap_err();
        assert_eq!(
            s.sink().lines().last().map(String::as_str),
            Some("ERROR: Burst time value must be greater than zero!")
        );
    }

    #[test]
    fn test_invalid_quantum_does_not_run() {
        let mut s = session();
        s.submit_process("0", "3").unwrap();

        s.run("zero").unwrap_err();

        assert_eq!(
            s.sink().lines().last().map(String::as_str),
            Some("ERROR: Time quantum must be a number!")
        );
        assert_eq!(s.scheduler().state().current_time(), 0);
    }

    #[test]
    fn test_remove_all_resets_log() {
        let mut s = session();
        s.submit_process("0", "3").unwrap();

        s.remove_all();

        assert_eq!(
            s.sink().lines(),
            &[REMOVED.to_string(), WELCOME.to_string()]
        );
        assert_eq!(s.submit_process("0", "1").unwrap(), "P0");
    }

    #[test]
    fn test_execute_dispatch() {
        let mut s = session();

        assert_eq!(s.execute("add 0 5"), CommandOutcome::Continue);
        match s.execute("run") {
            CommandOutcome::Ran(report) => assert_eq!(report.quantum.get(), 5),
            other => panic!("expected a run, got {:?}", other),
        }
        assert_eq!(s.execute("quit"), CommandOutcome::Quit);
    }

    #[test]
    fn test_execute_unknown_command() {
        let mut s = session();

        assert_eq!(s.execute("fork 3"), CommandOutcome::Continue);

        assert_eq!(
            &s.sink().lines()[1..],
            &[
                "ERROR: Unknown command 'fork'".to_string(),
                "Type 'help' for a list of commands.".to_string(),
            ]
        );
    }

    #[test]
    fn test_execute_empty_run() {
        let mut s = session();
        assert_eq!(s.execute("run 3"), CommandOutcome::Continue);
        assert_eq!(
            s.sink().lines().last().map(String::as_str),
            Some("ERROR: No processes have been entered!")
        );
    }

    #[test]
    fn test_help_lists_commands() {
        let mut s = session();
        s.execute("help");
        assert_eq!(s.sink().len(), 1 + HELP_LINES.len());
    }
}
