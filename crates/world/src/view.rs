//! Narrow interfaces a tick-driven client sees of the world it runs in.
//!
//! The planter only ever talks to these traits; [`crate::Sandbox`] is the
//! in-memory implementation used by the headless driver and by tests.

use crate::block::Block;
use autoplanter_core::{BlockPos, Face, ItemStack, ItemType, Vec3d};

/// Player position sampled at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSample {
    /// Exact (continuous) position.
    pub position: Vec3d,
    /// Block containing the player's feet.
    pub block_pos: BlockPos,
}

impl PlayerSample {
    /// Sample derived from a continuous position.
    pub fn at(position: Vec3d) -> Self {
        Self {
            position,
            block_pos: position.block_pos(),
        }
    }
}

/// Delivers the per-tick player sample.
pub trait TickSource {
    /// `None` while no player or world is active.
    fn player_sample(&self) -> Option<PlayerSample>;
}

/// Read-only view of the block grid.
pub trait WorldView {
    /// Block at `pos`; unloaded or unset cells read as air.
    fn block_at(&self, pos: BlockPos) -> Block;

    /// Whether `block` counts as empty space.
    fn is_air(&self, block: Block) -> bool {
        block.is_air()
    }

    /// Whether `form` may exist at `pos` given the current neighbours.
    fn can_survive(&self, form: Block, pos: BlockPos) -> bool;

    /// Block placed when using `item` on a block, if it has one.
    fn placeable_form_of(&self, item: ItemType) -> Option<Block> {
        match item {
            ItemType::Flower(kind) => Some(Block::Flower(kind)),
            ItemType::TallFlower(kind) => Some(Block::TallFlower { kind, upper: false }),
            ItemType::Misc(_) => None,
        }
    }
}

/// Which hand an interaction uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Main,
    Off,
}

/// Read-only view of the player's inventory.
pub trait InventoryView {
    /// Stack in inventory slot `slot`, if any.
    fn item(&self, slot: usize) -> Option<&ItemStack>;

    /// Stack currently held in `hand`, if any.
    fn held_item(&self, hand: Hand) -> Option<&ItemStack>;
}

/// Where a "use item on block" interaction is aimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    /// Point on the clicked block.
    pub location: Vec3d,
    /// Face the interaction approaches from.
    pub face: Face,
    /// The clicked block.
    pub block_pos: BlockPos,
}

impl BlockHit {
    /// Hit on the top face of `ground`, aimed at its centre.
    pub fn top_of(ground: BlockPos) -> Self {
        Self {
            location: ground.center(),
            face: Face::Up,
            block_pos: ground,
        }
    }

    /// Cell a placed block would occupy.
    pub fn placement_pos(&self) -> BlockPos {
        self.block_pos.relative(self.face)
    }
}

/// Outcome of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResult {
    /// Something changed in the world.
    Success,
    /// Action consumed without a visible change.
    Consume,
    /// Nothing to do with the held item.
    Pass,
    /// Attempted and rejected.
    Fail,
}

impl InteractionResult {
    /// True when the interaction counts as having acted.
    pub fn consumes_action(self) -> bool {
        matches!(self, InteractionResult::Success | InteractionResult::Consume)
    }
}

/// Mutating side of the world: interactions issued on behalf of the player.
pub trait InteractionSink {
    /// Use the item held in `hand` on the block described by `hit`.
    fn use_item_on(&mut self, hand: Hand, hit: BlockHit) -> InteractionResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoplanter_core::{FlowerKind, MiscItem, TallFlowerKind};

    struct Void;

    impl WorldView for Void {
        fn block_at(&self, _pos: BlockPos) -> Block {
            Block::Air
        }

        fn can_survive(&self, _form: Block, _pos: BlockPos) -> bool {
            false
        }
    }

    #[test]
    fn top_hit_places_above_ground() {
        let hit = BlockHit::top_of(BlockPos::new(3, 63, -2));
        assert_eq!(hit.face, Face::Up);
        assert_eq!(hit.location, Vec3d::new(3.5, 63.5, -1.5));
        assert_eq!(hit.placement_pos(), BlockPos::new(3, 64, -2));
    }

    #[test]
    fn only_success_and_consume_count() {
        assert!(InteractionResult::Success.consumes_action());
        assert!(InteractionResult::Consume.consumes_action());
        assert!(!InteractionResult::Pass.consumes_action());
        assert!(!InteractionResult::Fail.consumes_action());
    }

    #[test]
    fn default_placeable_forms() {
        let world = Void;
        assert_eq!(
            world.placeable_form_of(ItemType::Flower(FlowerKind::Allium)),
            Some(Block::Flower(FlowerKind::Allium))
        );
        assert_eq!(
            world.placeable_form_of(ItemType::TallFlower(TallFlowerKind::Lilac)),
            Some(Block::TallFlower {
                kind: TallFlowerKind::Lilac,
                upper: false
            })
        );
        assert_eq!(world.placeable_form_of(ItemType::Misc(MiscItem::Stick)), None);
        assert!(world.is_air(world.block_at(BlockPos::new(0, 0, 0))));
    }
}
