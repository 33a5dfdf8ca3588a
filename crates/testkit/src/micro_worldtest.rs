//! Micro-worldtest harness: step a tiny simulation for a fixed number of
//! ticks, snapshot selected state after every step and compare the whole run
//! against a golden JSON file.

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use autoplanter_core::SimTick;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for a micro-worldtest.
#[derive(Debug, Clone)]
pub struct MicroWorldtestConfig {
    /// Name written into the report.
    pub name: String,
    /// Number of steps; the report holds `ticks + 1` frames.
    pub ticks: u64,
    /// Golden JSON file.
    pub snapshot_path: PathBuf,
}

impl MicroWorldtestConfig {
    /// Config named `name` running `ticks` steps against `snapshot_path`.
    pub fn new(name: impl Into<String>, ticks: u64, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            ticks,
            snapshot_path: snapshot_path.into(),
        }
    }
}

/// State captured after a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Full run as written to the golden file.
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestReport<S> {
    /// Test name.
    pub name: String,
    /// One frame per tick, starting at tick 0.
    pub frames: Vec<MicroWorldtestFrame<S>>,
}

/// Run the test and assert (or update) its golden file.
///
/// `step` receives the tick being simulated; the snapshot taken afterwards is
/// labelled with the following tick. The report is returned so callers can
/// make further assertions on it.
pub fn run_micro_worldtest<State, Snapshot, StepFn, SnapFn>(
    config: MicroWorldtestConfig,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Result<MicroWorldtestReport<Snapshot>>
where
    Snapshot: Serialize,
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut tick = SimTick::ZERO;
    let mut frames = vec![MicroWorldtestFrame {
        tick: tick.0,
        snapshot: snapshot(tick, &state),
    }];

    for _ in 0..config.ticks {
        step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(MicroWorldtestFrame {
            tick: tick.0,
            snapshot: snapshot(tick, &state),
        });
    }

    let report = MicroWorldtestReport {
        name: config.name,
        frames,
    };
    assert_json_snapshot(&config.snapshot_path, &report)?;
    Ok(report)
}
