//! Line-delimited JSON framing for wire events
//!
//! One event per line, each a JSON object terminated by `\n`. Blank lines are
//! ignored on input so peers may use them as keep-alives.

use super::{FramingConfig, WireEvent};
use crate::messages::SatelliteMessage;
use crate::{Result, SatelliteError};
use std::io::{BufRead, Read, Write};
use tracing::debug;

/// Reads wire events from a buffered stream
pub struct EventReader<R> {
    reader: R,
    config: FramingConfig,
    buf: Vec<u8>,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            config: FramingConfig::default(),
            buf: Vec::new(),
        }
    }

    pub fn with_config(reader: R, config: FramingConfig) -> Result<Self> {
        config.validate().map_err(SatelliteError::ConfigError)?;
        Ok(Self {
            reader,
            config,
            buf: Vec::new(),
        })
    }

    /// Read the next event, or `None` once the stream is exhausted
    pub fn read_event(&mut self) -> Result<Option<WireEvent>> {
        let max = self.config.max_line_bytes;

        loop {
            self.buf.clear();
            // One byte over the limit is enough to tell an oversized line apart
            let read = (&mut self.reader)
                .take((max as u64).saturating_add(1))
                .read_until(b'\n', &mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }

            if self.buf.len() > max && !self.buf.ends_with(b"\n") {
                let (dropped, ends_with_cr) = self.discard_line()?;
                let size = self.buf.len() + dropped - usize::from(ends_with_cr);
                return Err(SatelliteError::FrameTooLarge { size, max });
            }

            let line = trim_line_ending(&self.buf);
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let event: WireEvent = serde_json::from_slice(line)
                .map_err(|e| SatelliteError::MalformedFrame(e.to_string()))?;
            event.validate()?;

            debug!("Read wire event: {}", event.event_type());
            return Ok(Some(event));
        }
    }

    /// Skip the rest of an oversized line already partly in `buf`
    ///
    /// Returns the bytes dropped before the `\n` and whether the line ended
    /// in `\r\n`.
    fn discard_line(&mut self) -> Result<(usize, bool)> {
        let mut dropped = 0;
        let mut last = self.buf.last().copied();
        loop {
            let chunk = self.reader.fill_buf()?;
            if chunk.is_empty() {
                break;
            }
            if let Some(pos) = chunk.iter().position(|b| *b == b'\n') {
                dropped += pos;
                last = pos.checked_sub(1).map(|i| chunk[i]).or(last);
                self.reader.consume(pos + 1);
                break;
            }
            dropped += chunk.len();
            last = chunk.last().copied();
            let len = chunk.len();
            self.reader.consume(len);
        }
        Ok((dropped, last == Some(b'\r')))
    }

    /// Read until the next satellite message, skipping other protocol events
    pub fn read_message(&mut self) -> Result<Option<SatelliteMessage>> {
        while let Some(event) = self.read_event()? {
            match SatelliteMessage::from_wire_event(&event)? {
                Some(message) => return Ok(Some(message)),
                None => debug!("Skipping non-satellite event: {}", event.event_type()),
            }
        }
        Ok(None)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Writes wire events to a stream, one JSON line each
pub struct EventWriter<W> {
    writer: W,
    config: FramingConfig,
}

impl<W: Write> EventWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            config: FramingConfig::default(),
        }
    }

    pub fn with_config(writer: W, config: FramingConfig) -> Result<Self> {
        config.validate().map_err(SatelliteError::ConfigError)?;
        Ok(Self { writer, config })
    }

    pub fn write_event(&mut self, event: &WireEvent) -> Result<()> {
        event.validate()?;

        let line = serde_json::to_vec(event)
            .map_err(|e| SatelliteError::MalformedFrame(e.to_string()))?;
        if line.len() > self.config.max_line_bytes {
            return Err(SatelliteError::FrameTooLarge {
                size: line.len(),
                max: self.config.max_line_bytes,
            });
        }

        self.writer.write_all(&line)?;
        self.writer.write_all(b"\n")?;
        if self.config.flush_each_event {
            self.writer.flush()?;
        }

        debug!("Wrote wire event: {}", event.event_type());
        Ok(())
    }

    pub fn write_message(&mut self, message: &SatelliteMessage) -> Result<()> {
        self.write_event(&message.to_wire_event())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
