use anyhow::Result;
use autoplanter_core::{ItemStack, ItemType, Vec3d};
use autoplanter_input::{Key, KeyBinding};
use autoplanter_planter::{
    PlannerSettings, DEFAULT_HUD_DISPLAY_TICKS, DEFAULT_MOVEMENT_EPSILON, MAX_RADIUS,
};
use autoplanter_world::{
    Block, FlatWorldSettings, GameMode, Player, SurfaceWeight, MAX_LAYER_THICKNESS,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/autoplanter.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlanterConfig {
    pub planting: PlantingSection,
    pub hud: HudSection,
    pub controls: ControlsSection,
    pub world: WorldSection,
    pub player: PlayerSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlantingSection {
    /// Half-width of the scanned ring.
    pub radius: i32,
    /// Plant every N moving ticks.
    pub tick_delay: u32,
    pub movement_epsilon: f64,
    /// Inventory slot holding the flowers.
    pub source_slot: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HudSection {
    /// Ticks the status line stays up after a toggle.
    pub display_ticks: u32,
    /// Scaled viewport width used to centre the status line.
    pub viewport_width: i32,
    pub glyph_width: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSection {
    pub toggle_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldSection {
    pub seed: u64,
    pub floor_y: i32,
    pub half_extent: i32,
    /// Bottom-up `[block, thickness]` pairs.
    pub layers: Vec<(String, u32)>,
    /// Weighted `[block, weight]` replacements for the top layer.
    pub surface_mix: Vec<(String, u32)>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerSection {
    /// Spawn X/Z; Y is placed on top of the surface.
    pub spawn_x: f64,
    pub spawn_z: f64,
    pub game_mode: GameMode,
    pub item: String,
    pub count: u8,
}

impl Default for PlantingSection {
    fn default() -> Self {
        let settings = PlannerSettings::default();
        Self {
            radius: settings.radius,
            tick_delay: settings.tick_delay,
            movement_epsilon: DEFAULT_MOVEMENT_EPSILON,
            source_slot: settings.source_slot,
        }
    }
}

impl Default for HudSection {
    fn default() -> Self {
        Self {
            display_ticks: DEFAULT_HUD_DISPLAY_TICKS,
            viewport_width: 427,
            glyph_width: 6,
        }
    }
}

impl Default for ControlsSection {
    fn default() -> Self {
        Self {
            toggle_key: Key::P.name().to_string(),
        }
    }
}

impl Default for WorldSection {
    fn default() -> Self {
        let flat = FlatWorldSettings::default();
        Self {
            seed: flat.seed,
            floor_y: flat.floor_y,
            half_extent: flat.half_extent,
            layers: flat
                .layers
                .iter()
                .map(|(block, thickness)| (block.to_string(), *thickness))
                .collect(),
            surface_mix: vec![
                ("minecraft:grass_block".to_string(), 6),
                ("minecraft:coarse_dirt".to_string(), 1),
                ("minecraft:stone".to_string(), 1),
            ],
        }
    }
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            spawn_x: 0.5,
            spawn_z: 0.5,
            game_mode: GameMode::Survival,
            item: "minecraft:poppy".to_string(),
            count: 64,
        }
    }
}

impl PlanterConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<PlanterConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    PlanterConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                PlanterConfig::default()
            }
        }
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn planner_settings(&self) -> PlannerSettings {
        let defaults = PlannerSettings::default();
        let p = &self.planting;

        let radius = if p.radius <= 0 {
            warn!(radius = p.radius, "planting.radius must be positive; using default");
            defaults.radius
        } else if p.radius > MAX_RADIUS {
            warn!(radius = p.radius, max = MAX_RADIUS, "planting.radius too large; capped");
            MAX_RADIUS
        } else {
            p.radius
        };
        let tick_delay = if p.tick_delay > 0 {
            p.tick_delay
        } else {
            warn!("planting.tick_delay of 0 treated as 1");
            1
        };
        let movement_epsilon = if p.movement_epsilon.is_finite() && p.movement_epsilon >= 0.0 {
            p.movement_epsilon
        } else {
            warn!(
                epsilon = p.movement_epsilon,
                "planting.movement_epsilon invalid; using default"
            );
            defaults.movement_epsilon
        };
        let source_slot = if p.source_slot < autoplanter_world::INVENTORY_SIZE {
            p.source_slot
        } else {
            warn!(slot = p.source_slot, "planting.source_slot out of range; using default");
            defaults.source_slot
        };

        PlannerSettings {
            radius,
            tick_delay,
            movement_epsilon,
            source_slot,
        }
    }

    pub fn toggle_binding(&self) -> KeyBinding {
        let mut binding = KeyBinding::planting_toggle();
        match self.controls.toggle_key.parse::<Key>() {
            Ok(key) => binding.key = key,
            Err(err) => warn!("controls.toggle_key: {err}; using {}", binding.key),
        }
        binding
    }

    pub fn flat_world(&self) -> FlatWorldSettings {
        let defaults = FlatWorldSettings::default();
        let w = &self.world;

        let layers: Vec<(Block, u32)> = w
            .layers
            .iter()
            .filter(|(name, thickness)| {
                let fits = *thickness <= MAX_LAYER_THICKNESS;
                if !fits {
                    warn!(
                        thickness,
                        max = MAX_LAYER_THICKNESS,
                        "world.layers: {name} too thick; entry skipped"
                    );
                }
                fits
            })
            .filter_map(|(name, thickness)| {
                parse_block("world.layers", name).map(|block| (block, *thickness))
            })
            .collect();
        let layers = if layers.is_empty() {
            warn!("world.layers has no usable entries; using default layers");
            defaults.layers
        } else {
            layers
        };

        let surface_mix = w
            .surface_mix
            .iter()
            .filter_map(|(name, weight)| {
                parse_block("world.surface_mix", name).map(|block| SurfaceWeight {
                    block,
                    weight: *weight,
                })
            })
            .collect();

        FlatWorldSettings {
            seed: w.seed,
            floor_y: w.floor_y,
            half_extent: if w.half_extent > 0 {
                w.half_extent
            } else {
                warn!(half_extent = w.half_extent, "world.half_extent must be positive");
                defaults.half_extent
            },
            layers,
            surface_mix,
        }
    }

    /// Player standing on top of the generated surface.
    pub fn player(&self, world: &FlatWorldSettings) -> Player {
        let p = &self.player;
        let spawn = Vec3d::new(p.spawn_x, f64::from(world.surface_y() + 1), p.spawn_z);
        let mut player = Player::new(spawn);
        player.game_mode = p.game_mode;

        match p.item.parse::<ItemType>() {
            Ok(item) if p.count > 0 => {
                let slot = self.planner_settings().source_slot;
                player.inventory.set(slot, Some(ItemStack::new(item, p.count)));
                if slot < autoplanter_world::HOTBAR_SIZE {
                    player.inventory.select_hotbar(slot);
                }
            }
            Ok(_) => {}
            Err(err) => warn!("player.item: {err}; starting with an empty inventory"),
        }
        player
    }
}

fn parse_block(field: &str, name: &str) -> Option<Block> {
    match name.parse::<Block>() {
        Ok(block) => Some(block),
        Err(err) => {
            warn!("{field}: {err}; entry skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoplanter_core::FlowerKind;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("autoplanter_config_{timestamp}/{name}"))
    }

    #[test]
    fn defaults_match_planner_defaults() {
        let cfg = PlanterConfig::default();
        assert_eq!(cfg.planner_settings(), PlannerSettings::default());
        assert_eq!(cfg.toggle_binding(), KeyBinding::planting_toggle());
        assert_eq!(cfg.flat_world().layers, FlatWorldSettings::default().layers);
        assert_eq!(cfg.hud.display_ticks, 100);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = PlanterConfig::default();
        cfg.planting.tick_delay = 4;
        cfg.controls.toggle_key = "G".into();
        cfg.player.game_mode = GameMode::Creative;

        let path = temp_path("autoplanter.toml");
        cfg.save_to_path(&path).expect("config saves");
        let loaded = PlanterConfig::load_from_path(&path);
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.toggle_binding().key, Key::G);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: PlanterConfig = toml::from_str(
            r#"
            [planting]
            radius = 2

            [player]
            item = "minecraft:cornflower"
            "#,
        )
        .expect("partial config parses");
        assert_eq!(cfg.planner_settings().radius, 2);
        assert_eq!(cfg.planner_settings().tick_delay, 1);
        assert_eq!(cfg.hud, HudSection::default());

        let player = cfg.player(&cfg.flat_world());
        assert_eq!(
            player.inventory.get(0).map(|s| s.item),
            Some(ItemType::Flower(FlowerKind::Cornflower))
        );
        assert_eq!(player.position.y, 64.0);
    }

    #[test]
    fn invalid_values_fall_back_per_field() {
        let cfg: PlanterConfig = toml::from_str(
            r#"
            [planting]
            radius = 0
            tick_delay = 0
            source_slot = 99

            [controls]
            toggle_key = "NotAKey"

            [world]
            layers = [["minecraft:bedrock_ish", 1], ["minecraft:dirt", 3]]
            surface_mix = [["minecraft:grass_block", 1], ["minecraft:nope", 5]]
            "#,
        )
        .expect("config parses");

        let settings = cfg.planner_settings();
        assert_eq!(settings.radius, 4);
        assert_eq!(settings.tick_delay, 1);
        assert_eq!(settings.source_slot, 0);
        assert_eq!(cfg.toggle_binding().key, Key::P);

        let world = cfg.flat_world();
        assert_eq!(world.layers, vec![(Block::Dirt, 3)]);
        assert_eq!(world.surface_mix.len(), 1);
    }

    #[test]
    fn radius_is_capped() {
        let cfg: PlanterConfig =
            toml::from_str("[planting]\nradius = 2147483647").expect("config parses");
        assert_eq!(cfg.planner_settings().radius, MAX_RADIUS);

        let cfg: PlanterConfig = toml::from_str("[planting]\nradius = 16").expect("config parses");
        assert_eq!(cfg.planner_settings().radius, 16);
    }

    #[test]
    fn oversized_world_entries_do_not_panic() {
        let cfg: PlanterConfig = toml::from_str(
            r#"
            [world]
            half_extent = 2
            layers = [["minecraft:stone", 4294967295], ["minecraft:dirt", 2]]
            surface_mix = [["minecraft:grass_block", 4294967295], ["minecraft:sand", 4294967295]]
            "#,
        )
        .expect("config parses");

        let world = cfg.flat_world();
        assert_eq!(world.layers, vec![(Block::Dirt, 2)]);
        assert_eq!(world.surface_y(), world.floor_y + 1);
        let generated = autoplanter_world::generate_flat(&world);
        assert_eq!(generated.len(), 25 * 2);
    }

    #[test]
    fn unreadable_file_uses_defaults() {
        let loaded = PlanterConfig::load_from_path(&temp_path("missing.toml"));
        assert_eq!(loaded, PlanterConfig::default());

        let path = temp_path("broken.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "planting = [").unwrap();
        assert_eq!(PlanterConfig::load_from_path(&path), PlanterConfig::default());
    }
}
