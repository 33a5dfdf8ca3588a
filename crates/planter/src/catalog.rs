//! Which items the planter will put down, and where.

use autoplanter_core::{FlowerKind, ItemType};
use autoplanter_world::Block;
use std::collections::BTreeSet;

/// Ground blocks a flower may be planted on.
pub const SUITABLE_GROUND: [Block; 4] = [
    Block::GrassBlock,
    Block::Dirt,
    Block::CoarseDirt,
    Block::Podzol,
];

/// Whether `block` is in [`SUITABLE_GROUND`].
pub fn is_suitable_ground(block: Block) -> bool {
    SUITABLE_GROUND.contains(&block)
}

/// Fixed set of plantable single-tile flowers. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantableCatalog {
    flowers: BTreeSet<FlowerKind>,
}

impl PlantableCatalog {
    /// The thirteen classic single-tile flowers.
    ///
    /// Torchflower is a single-tile flower too but is left out, as are all
    /// two-block-tall flowers.
    pub fn single_tile_flowers() -> Self {
        let flowers = [
            FlowerKind::Dandelion,
            FlowerKind::Poppy,
            FlowerKind::BlueOrchid,
            FlowerKind::Allium,
            FlowerKind::AzureBluet,
            FlowerKind::RedTulip,
            FlowerKind::OrangeTulip,
            FlowerKind::WhiteTulip,
            FlowerKind::PinkTulip,
            FlowerKind::OxeyeDaisy,
            FlowerKind::Cornflower,
            FlowerKind::LilyOfTheValley,
            FlowerKind::WitherRose,
        ];
        Self {
            flowers: flowers.into_iter().collect(),
        }
    }

    /// Whether `item` is a cataloged flower.
    pub fn contains(&self, item: ItemType) -> bool {
        item.as_flower()
            .is_some_and(|kind| self.flowers.contains(&kind))
    }

    /// The flower `item` stands for, if cataloged.
    pub fn resolve(&self, item: ItemType) -> Option<FlowerKind> {
        item.as_flower().filter(|kind| self.flowers.contains(kind))
    }

    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    /// Cataloged flowers in registry order.
    pub fn iter(&self) -> impl Iterator<Item = FlowerKind> + '_ {
        self.flowers.iter().copied()
    }
}

impl Default for PlantableCatalog {
    fn default() -> Self {
        Self::single_tile_flowers()
    }
}
