/*!
 * Monitoring
 * Simulation event log, output sinks, and diagnostic tracing
 */

pub mod events;
mod sink;
mod tracer;

pub use events::{Category, SimEvent};
pub use sink::{EventSink, MemorySink, RecordingSink, WriterSink};
pub use tracer::init_tracing;
