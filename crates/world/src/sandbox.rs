//! In-memory world + player that implements every collaborator interface.

use crate::block::Block;
use crate::grid::GridWorld;
use crate::inventory::PlayerInventory;
use crate::view::{
    BlockHit, Hand, InteractionResult, InteractionSink, InventoryView, PlayerSample, TickSource,
    WorldView,
};
use autoplanter_core::{BlockPos, ItemStack, Vec3d};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Whether placing blocks consumes items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
}

/// The local player.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3d,
    pub inventory: PlayerInventory,
    pub game_mode: GameMode,
}

impl Player {
    /// Player at `position` with an empty inventory.
    pub fn new(position: Vec3d) -> Self {
        Self {
            position,
            inventory: PlayerInventory::new(),
            game_mode: GameMode::default(),
        }
    }

    /// Block containing the player's feet.
    pub fn block_position(&self) -> BlockPos {
        self.position.block_pos()
    }
}

/// A world with at most one player in it.
#[derive(Debug, Default)]
pub struct Sandbox {
    pub world: GridWorld,
    player: Option<Player>,
    placements: u64,
}

impl Sandbox {
    /// Sandbox with no player (unavailable context).
    pub fn new(world: GridWorld) -> Self {
        Self {
            world,
            player: None,
            placements: 0,
        }
    }

    /// Sandbox with `player` spawned.
    pub fn with_player(world: GridWorld, player: Player) -> Self {
        Self {
            world,
            player: Some(player),
            placements: 0,
        }
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Put a player into the world, returning any previous one.
    pub fn spawn(&mut self, player: Player) -> Option<Player> {
        self.player.replace(player)
    }

    /// Remove the player from the world.
    pub fn despawn(&mut self) -> Option<Player> {
        self.player.take()
    }

    /// Move the player by a delta. No-op without a player.
    pub fn move_player(&mut self, dx: f64, dy: f64, dz: f64) {
        if let Some(player) = self.player.as_mut() {
            player.position = player.position.add(dx, dy, dz);
        }
    }

    /// Blocks placed through [`InteractionSink::use_item_on`] so far.
    pub fn placements(&self) -> u64 {
        self.placements
    }
}

impl TickSource for Sandbox {
    fn player_sample(&self) -> Option<PlayerSample> {
        self.player.as_ref().map(|p| PlayerSample::at(p.position))
    }
}

impl WorldView for Sandbox {
    fn block_at(&self, pos: BlockPos) -> Block {
        self.world.block(pos)
    }

    fn can_survive(&self, form: Block, pos: BlockPos) -> bool {
        self.world.can_survive(form, pos)
    }
}

impl InventoryView for Sandbox {
    fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.player.as_ref()?.inventory.item(slot)
    }

    fn held_item(&self, hand: Hand) -> Option<&ItemStack> {
        self.player.as_ref()?.inventory.held_item(hand)
    }
}

impl InteractionSink for Sandbox {
    fn use_item_on(&mut self, hand: Hand, hit: BlockHit) -> InteractionResult {
        let Some(player) = self.player.as_ref() else {
            return InteractionResult::Pass;
        };
        let Some(stack) = player.inventory.held_item(hand).copied() else {
            return InteractionResult::Pass;
        };
        let Some(form) = self.world.placeable_form_of(stack.item) else {
            return InteractionResult::Pass;
        };

        let target = hit.placement_pos();
        if !self.world.block(target).is_air() || !self.world.can_survive(form, target) {
            return InteractionResult::Fail;
        }

        self.world.set_block(target, form);
        if let Block::TallFlower { kind, .. } = form {
            self.world
                .set_block(target.above(), Block::TallFlower { kind, upper: true });
        }

        if let Some(player) = self.player.as_mut() {
            if player.game_mode == GameMode::Survival {
                player.inventory.shrink(hand, 1);
            }
        }
        self.placements += 1;
        trace!(pos = %target, block = %form, "Placed block");
        InteractionResult::Success
    }
}
