//! Flat world generation.
//!
//! Builds a square slab of layers around the origin. The top layer can be
//! mixed per column from a weighted block list so a planting run sees some
//! unsuitable ground; the mix is sampled from a seeded RNG so the same seed
//! always yields the same surface.

use crate::block::Block;
use crate::grid::GridWorld;
use autoplanter_core::{scoped_rng, BlockPos, SimTick};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Domain tag separating the surface stream from other seeded streams.
const SURFACE_DOMAIN: u64 = 0x5355_5246; // "SURF"

/// Thickest single layer the generator accepts from configuration.
pub const MAX_LAYER_THICKNESS: u32 = 384;

/// One block in the weighted surface mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceWeight {
    pub block: Block,
    pub weight: u32,
}

/// Parameters for [`generate_flat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatWorldSettings {
    /// Seed for the surface mix.
    pub seed: u64,
    /// Y of the bottom layer.
    pub floor_y: i32,
    /// Square extends from `-half_extent` to `half_extent` on X and Z.
    pub half_extent: i32,
    /// Layers bottom-up as `(block, thickness)`.
    pub layers: Vec<(Block, u32)>,
    /// Optional per-column replacement of the top layer.
    pub surface_mix: Vec<SurfaceWeight>,
}

impl Default for FlatWorldSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            floor_y: 60,
            half_extent: 32,
            layers: vec![(Block::Stone, 1), (Block::Dirt, 2), (Block::GrassBlock, 1)],
            surface_mix: Vec::new(),
        }
    }
}

impl FlatWorldSettings {
    /// Y of the top (surface) layer.
    pub fn surface_y(&self) -> i32 {
        let thickness = self
            .layers
            .iter()
            .fold(0u32, |acc, (_, t)| acc.saturating_add(*t));
        let thickness = i32::try_from(thickness).unwrap_or(i32::MAX);
        self.floor_y.saturating_add(thickness).saturating_sub(1)
    }
}

/// Generate a flat world.
pub fn generate_flat(settings: &FlatWorldSettings) -> GridWorld {
    let mut world = GridWorld::new();
    let h = settings.half_extent.max(0);

    let mut y = settings.floor_y;
    for (block, thickness) in &settings.layers {
        for _ in 0..*thickness {
            world.fill_layer(y, -h, h, -h, h, *block);
            y = y.saturating_add(1);
        }
    }

    let total_weight = settings
        .surface_mix
        .iter()
        .fold(0u32, |acc, w| acc.saturating_add(w.weight));
    if total_weight > 0 && !settings.layers.is_empty() {
        let surface_y = settings.surface_y();
        let mut rng = scoped_rng(settings.seed, SURFACE_DOMAIN, SimTick::ZERO);
        for x in -h..=h {
            for z in -h..=h {
                let mut roll = rng.gen_range(0..total_weight);
                for entry in &settings.surface_mix {
                    if roll < entry.weight {
                        world.set_block(BlockPos::new(x, surface_y, z), entry.block);
                        break;
                    }
                    roll -= entry.weight;
                }
            }
        }
    }

    world.take_dirty();
    debug!(
        blocks = world.len(),
        half_extent = h,
        surface_y = settings.surface_y(),
        "Generated flat world"
    );
    world
}
