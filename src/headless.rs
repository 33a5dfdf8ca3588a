use crate::config::PlanterConfig;
use crate::scripted_input::{ScriptedInputPlayer, TickInput};
use anyhow::Result;
use autoplanter_core::SimTick;
use autoplanter_input::InputState;
use autoplanter_planter::{
    render_status, DisplaySink, PlantingPlanner, TickOutcome, ToggleController,
};
use autoplanter_testkit::{EventRecord, EventSink, JsonlSink};
use autoplanter_world::{generate_flat, Player, Sandbox};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct HeadlessConfig {
    pub config: PlanterConfig,
    pub scripted_input: Option<PathBuf>,
    pub max_ticks: Option<u64>,
    pub seed: Option<u64>,
    pub event_log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub planted: u64,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let mut script = match cfg.scripted_input.as_deref() {
        Some(path) => ScriptedInputPlayer::from_path(path)?,
        None => {
            info!("No input script given; using the default walk");
            ScriptedInputPlayer::default_walk()
        }
    };

    let sink: Option<Box<dyn EventSink>> = match cfg.event_log.as_deref() {
        Some(path) => Some(Box::new(JsonlSink::create(path)?)),
        None => None,
    };

    info!(ticks = script.total_ticks(), "Running input script");
    let mut session = HeadlessSession::new(&cfg.config, cfg.seed, sink);
    while cfg.max_ticks.map_or(true, |max| session.tick().0 < max) {
        let Some(input) = script.advance() else {
            break;
        };
        session.step(input)?;
    }
    if !script.is_finished() {
        info!("Stopped at --max-ticks before the script finished");
    }

    let summary = session.finish()?;
    info!(
        ticks = summary.ticks,
        planted = summary.planted,
        "Headless run finished"
    );
    Ok(summary)
}

/// Draws nothing; logs the status line when it appears, changes or disappears.
struct LogDisplay {
    viewport_width: i32,
    glyph_width: i32,
    shown: Option<String>,
}

impl DisplaySink for LogDisplay {
    fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.glyph_width
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u32, _shadow: bool) {
        if self.shown.as_deref() != Some(text) {
            info!(x, y, color = %format!("#{color:06X}"), "HUD: {text}");
            self.shown = Some(text.to_string());
        }
    }
}

/// Owns the sandbox and both planting components and steps them in tick order.
pub struct HeadlessSession {
    sandbox: Sandbox,
    parked_player: Option<Player>,
    input: InputState,
    toggle: ToggleController,
    planner: PlantingPlanner,
    display: LogDisplay,
    sink: Option<Box<dyn EventSink>>,
    tick: SimTick,
    planted: u64,
}

impl HeadlessSession {
    pub fn new(
        config: &PlanterConfig,
        seed: Option<u64>,
        sink: Option<Box<dyn EventSink>>,
    ) -> Self {
        let flat = config.flat_world();
        let sandbox = Sandbox::with_player(generate_flat(&flat), config.player(&flat));

        let settings = config.planner_settings();
        let planner = match seed {
            Some(seed) => PlantingPlanner::seeded(settings, seed),
            None => PlantingPlanner::new(settings),
        };

        Self {
            sandbox,
            parked_player: None,
            input: InputState::new(),
            toggle: ToggleController::new(config.toggle_binding(), config.hud.display_ticks),
            planner,
            display: LogDisplay {
                viewport_width: config.hud.viewport_width,
                glyph_width: config.hud.glyph_width,
                shown: None,
            },
            sink,
            tick: SimTick::ZERO,
            planted: 0,
        }
    }

    pub fn tick(&self) -> SimTick {
        self.tick
    }

    /// Apply one tick of scripted input, then run toggle, planner and HUD.
    pub fn step(&mut self, input: TickInput) -> Result<TickOutcome> {
        self.apply_presence(input.player_present);

        if let Some(slot) = input.select_slot {
            let selected = self
                .sandbox
                .player_mut()
                .is_some_and(|p| p.inventory.select_hotbar(slot));
            if !selected {
                warn!(slot, "Ignoring hotbar selection");
            }
        }

        let (dx, dy, dz) = input.movement;
        self.sandbox.move_player(dx, dy, dz);
        if input.press_toggle {
            self.input.tap(self.toggle.binding().key);
        }

        if self.toggle.on_tick(&mut self.input) > 0 {
            let enabled = self.toggle.is_enabled();
            self.emit("ToggleFlipped", &json!({ "enabled": enabled }))?;
        }

        let outcome = self
            .planner
            .on_tick(&mut self.sandbox, self.toggle.is_enabled());
        if let TickOutcome::Planted { ground, flower } = outcome {
            self.planted += 1;
            let pos = ground.above();
            self.emit(
                "FlowerPlanted",
                &json!({
                    "x": pos.x,
                    "y": pos.y,
                    "z": pos.z,
                    "flower": flower.registry_name(),
                }),
            )?;
        }

        let drawn = render_status(&self.toggle, &mut self.display);
        if !drawn && self.display.shown.take().is_some() {
            debug!("HUD status hidden");
        }

        self.input.end_tick();
        self.tick = self.tick.advance(1);
        Ok(outcome)
    }

    /// Flush the event log and report totals.
    pub fn finish(mut self) -> Result<RunSummary> {
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(RunSummary {
            ticks: self.tick.0,
            planted: self.planted,
        })
    }

    fn apply_presence(&mut self, present: bool) {
        if present {
            if let Some(player) = self.parked_player.take() {
                debug!("Player returned");
                self.sandbox.spawn(player);
            }
        } else if let Some(player) = self.sandbox.despawn() {
            debug!("Player left the world");
            self.parked_player = Some(player);
        }
    }

    fn emit(&mut self, kind: &str, payload: &serde_json::Value) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.record(&EventRecord::new(self.tick, kind, payload)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoplanter_testkit::MemorySink;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<MemorySink>>);

    impl EventSink for SharedSink {
        fn record(&mut self, event: &EventRecord) -> Result<()> {
            self.0.borrow_mut().record(event)
        }
    }

    fn walk(press_toggle: bool, move_x: f64) -> TickInput {
        TickInput {
            movement: (move_x, 0.0, 0.0),
            press_toggle,
            select_slot: None,
            player_present: true,
        }
    }

    fn meadow_config() -> PlanterConfig {
        let mut config = PlanterConfig::default();
        config.world.surface_mix.clear();
        config
    }

    #[test]
    fn toggle_then_walk_plants_and_logs() {
        let events = SharedSink::default();
        let mut session =
            HeadlessSession::new(&meadow_config(), Some(7), Some(Box::new(events.clone())));

        assert_eq!(session.step(walk(true, 0.0)).unwrap(), TickOutcome::Stationary);
        assert!(session.toggle.is_enabled());
        for _ in 0..5 {
            assert!(session.step(walk(false, 0.3)).unwrap().placed());
        }

        let summary = session.finish().unwrap();
        assert_eq!(summary, RunSummary { ticks: 6, planted: 5 });

        let log = events.0.borrow();
        let flips: Vec<_> = log.of_kind("ToggleFlipped").collect();
        assert_eq!(flips.len(), 1);
        assert_eq!(flips[0].tick, SimTick(0));
        assert_eq!(flips[0].payload["enabled"], json!(true));

        let planted: Vec<_> = log.of_kind("FlowerPlanted").collect();
        assert_eq!(planted.len(), 5);
        assert!(planted.iter().all(|e| e.payload["y"] == json!(64)));
        assert!(planted.iter().all(|e| e.payload["flower"] == json!("poppy")));
    }

    #[test]
    fn walking_without_toggle_plants_nothing() {
        let mut session = HeadlessSession::new(&meadow_config(), Some(1), None);
        for _ in 0..10 {
            assert_eq!(session.step(walk(false, 0.5)).unwrap(), TickOutcome::Idle);
        }
        assert_eq!(session.sandbox.placements(), 0);
    }

    #[test]
    fn leaving_the_world_pauses_planting() {
        let mut session = HeadlessSession::new(&meadow_config(), Some(3), None);
        session.step(walk(true, 0.0)).unwrap();
        assert!(session.step(walk(false, 0.5)).unwrap().placed());

        let away = TickInput {
            player_present: false,
            ..walk(false, 0.5)
        };
        assert_eq!(session.step(away).unwrap(), TickOutcome::Idle);
        assert!(session.sandbox.player().is_none());

        // Back in the world: one tick to resample, then planting resumes.
        assert_eq!(session.step(walk(false, 0.5)).unwrap(), TickOutcome::Stationary);
        assert!(session.step(walk(false, 0.5)).unwrap().placed());
    }

    #[test]
    fn status_line_is_logged_once_per_change() {
        let mut session = HeadlessSession::new(&meadow_config(), Some(3), None);
        session.step(walk(true, 0.0)).unwrap();
        assert_eq!(session.display.shown.as_deref(), Some("Auto planting: ON"));
        for _ in 0..100 {
            session.step(walk(false, 0.0)).unwrap();
        }
        assert_eq!(session.display.shown, None);
    }
}
