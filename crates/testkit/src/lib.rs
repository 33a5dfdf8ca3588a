#![warn(missing_docs)]
//! Deterministic testing surfaces: tick event streams, golden JSON snapshots
//! and the micro-worldtest harness.

mod micro_worldtest;
mod snapshot;

use anyhow::{Context, Result};
use autoplanter_core::SimTick;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use micro_worldtest::*;
pub use snapshot::*;

/// One notable thing that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Event kind label, e.g. `FlowerPlanted`.
    pub kind: String,
    /// Structured event details.
    pub payload: Value,
}

impl EventRecord {
    /// Build a record from any serializable payload.
    pub fn new<P: Serialize>(tick: SimTick, kind: &str, payload: &P) -> Result<Self> {
        Ok(Self {
            tick,
            kind: kind.to_string(),
            payload: serde_json::to_value(payload)
                .with_context(|| format!("Failed to serialize {kind} payload"))?,
        })
    }
}

/// Destination for [`EventRecord`]s.
pub trait EventSink {
    /// Append an event.
    fn record(&mut self, event: &EventRecord) -> Result<()>;

    /// Push buffered events to their destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create event log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl EventSink for JsonlSink {
    fn record(&mut self, event: &EventRecord) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps events in memory for assertions.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Events in arrival order.
    pub events: Vec<EventRecord>,
}

impl MemorySink {
    /// Events whose kind equals `kind`.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, event: &EventRecord) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Parse a JSONL event log written by [`JsonlSink`].
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event log {}", path.display()))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{}:{}: malformed event", path.display(), i + 1))
        })
        .collect()
}
