/*!
 * Round-Robin Scheduling Simulator
 * Deterministic tick-by-tick simulation of a single CPU under Round-Robin
 */

pub mod config;
pub mod core;
pub mod input;
pub mod monitoring;
pub mod process;
pub mod scenario;
pub mod scheduler;
pub mod session;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{Centi, ProcessName, Tick};
pub use config::SimulatorConfig;
pub use input::{parse_arrival, parse_burst, parse_quantum, InputField, InputResult};
pub use monitoring::{init_tracing, EventSink, MemorySink, RecordingSink, SimEvent, WriterSink};
pub use process::{ProcessRecord, ProcessStats};
pub use scenario::{ProcessSpec, Scenario};
pub use scheduler::{Scheduler, SimulationReport, TimeQuantum};
pub use session::{CommandOutcome, Session, SessionError, SessionResult};
