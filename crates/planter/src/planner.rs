//! Picks a spot near the moving player and plants one flower there.
//!
//! Each qualifying tick the planner looks at the ring of ground cells one
//! block below the player's feet, shuffles them and plants at the first cell
//! that passes the placement checks:
//!
//! 1. the cell above the ground is air;
//! 2. the ground is in [`SUITABLE_GROUND`](crate::SUITABLE_GROUND);
//! 3. the flower can survive on top of it;
//! 4. the player still holds the flower in the main hand;
//! 5. the world accepts the interaction.
//!
//! A failed check moves on to the next cell; nothing is retried.

use crate::catalog::{is_suitable_ground, PlantableCatalog};
use crate::movement::{MovementTracker, DEFAULT_MOVEMENT_EPSILON};
use autoplanter_core::{BlockPos, FlowerKind, ItemType};
use autoplanter_world::{
    Block, BlockHit, Hand, InteractionSink, InventoryView, TickSource, WorldView,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything a planting tick reads from or writes to.
pub trait PlantingHost: TickSource + WorldView + InventoryView + InteractionSink {}

impl<T> PlantingHost for T where T: TickSource + WorldView + InventoryView + InteractionSink {}

/// Largest ring half-width the planner will scan.
pub const MAX_RADIUS: i32 = 16;

/// Tunables for [`PlantingPlanner`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Half-width of the square ring scanned around the player, at most [`MAX_RADIUS`].
    pub radius: i32,
    /// Plant on every `tick_delay`-th moving tick (0 behaves like 1).
    pub tick_delay: u32,
    /// Per-axis position delta that counts as movement.
    pub movement_epsilon: f64,
    /// Inventory slot the flower is taken from.
    pub source_slot: usize,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            radius: 4,
            tick_delay: 1,
            movement_epsilon: DEFAULT_MOVEMENT_EPSILON,
            source_slot: 0,
        }
    }
}

/// What a call to [`PlantingPlanner::on_tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Planting disabled, or no player/world.
    Idle,
    /// The player has not moved since the previous tick.
    Stationary,
    /// Moving, but waiting for the throttle delay.
    Throttled,
    /// The source slot is empty or not a cataloged flower.
    NoPlantable,
    /// Every candidate failed a placement check.
    NoCandidate,
    /// A flower was planted on top of `ground`.
    Planted { ground: BlockPos, flower: FlowerKind },
}

impl TickOutcome {
    /// True if this tick placed a flower.
    pub fn placed(self) -> bool {
        matches!(self, TickOutcome::Planted { .. })
    }
}

/// Ground ring around `center`: every `(dx, dz)` in `[-radius, radius]²`
/// except `(0, 0)`, one block below `center`. Row-major order (x outer, z inner).
/// `radius` is clamped to `0..=MAX_RADIUS`.
pub fn candidate_ring(center: BlockPos, radius: i32) -> Vec<BlockPos> {
    let radius = radius.clamp(0, MAX_RADIUS);
    let side = (2 * radius + 1) as usize;
    let mut ring = Vec::with_capacity(side * side - 1);
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            if dx == 0 && dz == 0 {
                continue;
            }
            ring.push(center.offset(dx, -1, dz));
        }
    }
    ring
}

/// A ground cell plus the two blocks needed to judge it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCandidate {
    /// The ground cell a flower would stand on.
    pub ground_pos: BlockPos,
    /// Block at `ground_pos`.
    pub ground: Block,
    /// Block directly above `ground_pos`.
    pub above: Block,
}

impl PlacementCandidate {
    /// Read the blocks at `ground_pos` and directly above it.
    pub fn probe<W: WorldView + ?Sized>(world: &W, ground_pos: BlockPos) -> Self {
        Self {
            ground_pos,
            ground: world.block_at(ground_pos),
            above: world.block_at(ground_pos.above()),
        }
    }

    /// Air above and suitable ground below.
    pub fn is_open_ground<W: WorldView + ?Sized>(&self, world: &W) -> bool {
        world.is_air(self.above) && is_suitable_ground(self.ground)
    }
}

/// Plants flowers around a moving player.
#[derive(Debug)]
pub struct PlantingPlanner<R = StdRng> {
    settings: PlannerSettings,
    catalog: PlantableCatalog,
    movement: MovementTracker,
    tick_counter: u32,
    rng: R,
}

impl PlantingPlanner<StdRng> {
    /// Planner shuffling with an entropy-seeded RNG.
    pub fn new(settings: PlannerSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Planner shuffling with a reproducible RNG.
    pub fn seeded(settings: PlannerSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlantingPlanner<R> {
    /// Planner shuffling with a caller-supplied RNG.
    pub fn with_rng(settings: PlannerSettings, rng: R) -> Self {
        Self {
            settings,
            catalog: PlantableCatalog::default(),
            movement: MovementTracker::new(settings.movement_epsilon),
            tick_counter: 0,
            rng,
        }
    }

    /// Settings this planner was built with.
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Flowers this planner will plant.
    pub fn catalog(&self) -> &PlantableCatalog {
        &self.catalog
    }

    /// Whether the last sampled tick counted as movement.
    pub fn is_moving(&self) -> bool {
        self.movement.is_moving()
    }

    /// Movement state between ticks.
    pub fn movement(&self) -> &MovementTracker {
        &self.movement
    }

    /// Run one tick.
    pub fn on_tick<H: PlantingHost + ?Sized>(
        &mut self,
        host: &mut H,
        enabled: bool,
    ) -> TickOutcome {
        let sample = match host.player_sample() {
            Some(sample) if enabled => sample,
            _ => {
                self.movement.reset();
                return TickOutcome::Idle;
            }
        };

        if !self.movement.update(sample.position) {
            return TickOutcome::Stationary;
        }

        self.tick_counter += 1;
        if self.tick_counter < self.settings.tick_delay.max(1) {
            return TickOutcome::Throttled;
        }
        self.tick_counter = 0;

        let Some(item) = host.item(self.settings.source_slot).map(|stack| stack.item) else {
            return TickOutcome::NoPlantable;
        };
        let Some(flower) = self.catalog.resolve(item) else {
            return TickOutcome::NoPlantable;
        };

        let mut candidates = candidate_ring(sample.block_pos, self.settings.radius);
        candidates.shuffle(&mut self.rng);

        for ground in candidates {
            if try_plant_at(host, ground, item) {
                debug!(pos = %ground.above(), flower = flower.registry_name(), "Planted flower");
                return TickOutcome::Planted { ground, flower };
            }
        }
        TickOutcome::NoCandidate
    }
}

/// Run every placement check for `ground` and, if they pass, place `item` on it.
fn try_plant_at<H: PlantingHost + ?Sized>(host: &mut H, ground: BlockPos, item: ItemType) -> bool {
    let candidate = PlacementCandidate::probe(&*host, ground);
    if !candidate.is_open_ground(&*host) {
        return false;
    }

    let Some(form) = host.placeable_form_of(item) else {
        return false;
    };
    if !host.can_survive(form, ground.above()) {
        return false;
    }

    if host.held_item(Hand::Main).map(|stack| stack.item) != Some(item) {
        return false;
    }

    host.use_item_on(Hand::Main, BlockHit::top_of(ground)).consumes_action()
}
