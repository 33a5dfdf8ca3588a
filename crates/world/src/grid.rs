//! Sparse block storage.

use crate::block::Block;
use crate::view::WorldView;
use autoplanter_core::BlockPos;
use std::collections::{BTreeSet, HashMap};

/// Sparse grid of blocks. Cells never written read as air.
#[derive(Debug, Default, Clone)]
pub struct GridWorld {
    blocks: HashMap<BlockPos, Block>,
    /// Cells changed since the last [`GridWorld::take_dirty`].
    dirty: BTreeSet<BlockPos>,
}

impl GridWorld {
    /// Empty world (all air).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the block at `pos`.
    pub fn block(&self, pos: BlockPos) -> Block {
        self.blocks.get(&pos).copied().unwrap_or_default()
    }

    /// Set a block, returning the previous one.
    pub fn set_block(&mut self, pos: BlockPos, block: Block) -> Block {
        let previous = if block.is_air() {
            self.blocks.remove(&pos)
        } else {
            self.blocks.insert(pos, block)
        }
        .unwrap_or_default();

        if previous != block {
            self.dirty.insert(pos);
        }
        previous
    }

    /// Fill the horizontal square `[min_x, max_x] x [min_z, max_z]` at height `y`.
    pub fn fill_layer(
        &mut self,
        y: i32,
        min_x: i32,
        max_x: i32,
        min_z: i32,
        max_z: i32,
        block: Block,
    ) {
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                self.set_block(BlockPos::new(x, y, z), block);
            }
        }
    }

    /// Number of non-air cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when every cell is air.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Positions holding `block`, in deterministic order.
    pub fn positions_of(&self, block: Block) -> Vec<BlockPos> {
        let mut positions: Vec<BlockPos> = self
            .blocks
            .iter()
            .filter(|(_, b)| **b == block)
            .map(|(pos, _)| *pos)
            .collect();
        positions.sort();
        positions
    }

    /// Take the set of changed cells (clears internal state).
    pub fn take_dirty(&mut self) -> BTreeSet<BlockPos> {
        std::mem::take(&mut self.dirty)
    }
}

impl WorldView for GridWorld {
    fn block_at(&self, pos: BlockPos) -> Block {
        self.block(pos)
    }

    fn can_survive(&self, form: Block, pos: BlockPos) -> bool {
        if !form.can_survive_on(self.block(pos.below())) {
            return false;
        }
        match form {
            // The upper half needs room as well.
            Block::TallFlower { upper: false, .. } => self.block(pos.above()).is_air(),
            _ => true,
        }
    }
}
