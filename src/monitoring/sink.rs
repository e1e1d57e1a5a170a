/*!
 * Event Sinks
 * Append-only line outputs the simulator writes its log to
 */

use super::events::SimEvent;
use std::io::{self, Write};
use tracing::warn;

/// Append-line capability injected into the scheduler
///
/// Writes are synchronous and never fail from the caller's point of view;
/// sinks backed by fallible I/O keep the first error for later inspection.
pub trait EventSink {
    /// Append one line (without its terminating line break)
    fn append_line(&mut self, line: &str);

    /// Append a typed event, rendered as its log line
    fn emit(&mut self, event: &SimEvent) {
        self.append_line(&event.to_string());
    }

    /// Discard everything written so far, where the sink supports it
    fn clear(&mut self) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn append_line(&mut self, line: &str) {
        (**self).append_line(line);
    }

    fn emit(&mut self, event: &SimEvent) {
        (**self).emit(event);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn append_line(&mut self, line: &str) {
        (**self).append_line(line);
    }

    fn emit(&mut self, event: &SimEvent) {
        (**self).emit(event);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// In-memory text log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whole log, every line terminated by `\n`
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl EventSink for MemorySink {
    fn append_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Keeps both the typed events and the rendered lines
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<SimEvent>,
    lines: MemorySink,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn lines(&self) -> &[String] {
        self.lines.lines()
    }

    /// Drain the recorded events, keeping the text log
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn append_line(&mut self, line: &str) {
        self.lines.append_line(line);
    }

    fn emit(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
        self.lines.append_line(&event.to_string());
    }

    fn clear(&mut self) {
        self.events.clear();
        self.lines.clear();
    }
}

/// Line sink over any [`io::Write`] (stdout, files, buffers)
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// First write error, if any; writes are skipped while an error is pending
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn append_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{}", line) {
            warn!(error = %e, "Event sink write failed; dropping further output");
            self.error = Some(e);
        }
    }
}
