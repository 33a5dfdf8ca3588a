use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptedStep {
    ticks: u32,
    #[serde(default)]
    move_x: f64,
    #[serde(default)]
    move_y: f64,
    #[serde(default)]
    move_z: f64,
    #[serde(default)]
    press_toggle: bool,
    #[serde(default)]
    select_slot: Option<usize>,
    #[serde(default = "present")]
    player_present: bool,
}

fn present() -> bool {
    true
}

/// Input for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub movement: (f64, f64, f64),
    /// Only set on the first tick of a step.
    pub press_toggle: bool,
    /// Only set on the first tick of a step.
    pub select_slot: Option<usize>,
    pub player_present: bool,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    tick_in_step: u32,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input script {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid input script {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            tick_in_step: 0,
        })
    }

    /// Press the toggle, stand still for a tick, then walk +X for 40 ticks.
    pub fn default_walk() -> Self {
        let walk = |ticks, move_x, press_toggle| ScriptedStep {
            ticks,
            move_x,
            move_y: 0.0,
            move_z: 0.0,
            press_toggle,
            select_slot: None,
            player_present: true,
        };
        Self {
            steps: vec![walk(1, 0.0, true), walk(40, 0.25, false)],
            index: 0,
            tick_in_step: 0,
        }
    }

    /// Input for the next tick, or `None` once every step has run.
    pub fn advance(&mut self) -> Option<TickInput> {
        while self.steps.get(self.index)?.ticks <= self.tick_in_step {
            self.index += 1;
            self.tick_in_step = 0;
        }
        let step = &self.steps[self.index];
        let first = self.tick_in_step == 0;
        self.tick_in_step += 1;

        Some(TickInput {
            movement: (step.move_x, step.move_y, step.move_z),
            press_toggle: first && step.press_toggle,
            select_slot: if first { step.select_slot } else { None },
            player_present: step.player_present,
        })
    }

    pub fn is_finished(&self) -> bool {
        let left_in_step = self
            .steps
            .get(self.index)
            .map_or(0, |step| step.ticks.saturating_sub(self.tick_in_step));
        left_in_step == 0 && self.steps.iter().skip(self.index + 1).all(|s| s.ticks == 0)
    }

    /// Total ticks the script lasts.
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.ticks)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_is_rejected() {
        let err = ScriptedInputPlayer::from_json(r#"{"steps": []}"#)
            .err()
            .expect("empty script rejected");
        assert!(err.to_string().contains("no steps"));
    }

    #[test]
    fn steps_run_for_their_tick_count() {
        let mut script = ScriptedInputPlayer::from_json(
            r#"{"steps": [
                {"ticks": 2, "press_toggle": true, "select_slot": 1},
                {"ticks": 0, "move_x": 9.0},
                {"ticks": 1, "move_z": 0.5, "player_present": false}
            ]}"#,
        )
        .expect("script parses");
        assert_eq!(script.total_ticks(), 3);

        let first = script.advance().expect("tick 0");
        assert!(first.press_toggle);
        assert_eq!(first.select_slot, Some(1));
        assert!(first.player_present);

        let second = script.advance().expect("tick 1");
        assert!(!second.press_toggle);
        assert_eq!(second.select_slot, None);
        assert!(!script.is_finished());

        let third = script.advance().expect("tick 2");
        assert_eq!(third.movement, (0.0, 0.0, 0.5));
        assert!(!third.player_present);

        assert!(script.is_finished());
        assert_eq!(script.advance(), None);
        assert_eq!(script.advance(), None);
    }

    #[test]
    fn default_walk_toggles_then_moves() {
        let mut script = ScriptedInputPlayer::default_walk();
        assert_eq!(script.total_ticks(), 41);
        assert!(script.advance().is_some_and(|t| t.press_toggle));
        let walking = script.advance().expect("walking tick");
        assert_eq!(walking.movement, (0.25, 0.0, 0.0));
    }
}
