//! Output sinks.
//!
//! The runner publishes one [`ControllerOutput`] per processed input frame.
//! The transport behind a sink (message bus, stdout, test buffer) is not the
//! controller's concern.

use std::io::{self, Write};

use arbiter_common::output::ControllerOutput;

/// Destination for controller outputs.
pub trait OutputSink {
    fn publish(&mut self, output: &ControllerOutput) -> io::Result<()>;
}

/// Keeps every published output. Used by tests and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    outputs: Vec<ControllerOutput>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> &[ControllerOutput] {
        &self.outputs
    }

    pub fn last(&self) -> Option<&ControllerOutput> {
        self.outputs.last()
    }
}

impl OutputSink for RecordingSink {
    fn publish(&mut self, output: &ControllerOutput) -> io::Result<()> {
        self.outputs.push(*output);
        Ok(())
    }
}

/// Writes each output as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for JsonLinesSink<W> {
    fn publish(&mut self, output: &ControllerOutput) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, output)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
