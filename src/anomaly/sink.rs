//! Destinations for assembled anomaly inputs.

use super::AnomalyInput;
use crate::error::SinkError;
use std::io::Write;

/// Accepts one record at a time; format and transport are up to the implementor.
pub trait AnomalySink {
    fn accept(&mut self, input: AnomalyInput) -> Result<(), SinkError>;
}

/// Collects records in memory.
impl AnomalySink for Vec<AnomalyInput> {
    fn accept(&mut self, input: AnomalyInput) -> Result<(), SinkError> {
        self.push(input);
        Ok(())
    }
}

/// One JSON object per line (ndjson).
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AnomalySink for JsonLinesSink<W> {
    fn accept(&mut self, input: AnomalyInput) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, &input)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
