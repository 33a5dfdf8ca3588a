//! Block kinds and the survival rules for plants.

use autoplanter_core::{FlowerKind, RegistryKey, TallFlowerKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A block occupying one grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    #[default]
    Air,
    Stone,
    GrassBlock,
    Dirt,
    CoarseDirt,
    Podzol,
    RootedDirt,
    Mycelium,
    MossBlock,
    Farmland,
    Sand,
    Gravel,
    Water,
    Netherrack,
    SoulSand,
    SoulSoil,
    Flower(FlowerKind),
    TallFlower { kind: TallFlowerKind, upper: bool },
}

/// Error returned when a block name does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown block {0:?}")]
pub struct UnknownBlock(pub String);

const SIMPLE_BLOCKS: [(Block, &str); 16] = [
    (Block::Air, "air"),
    (Block::Stone, "stone"),
    (Block::GrassBlock, "grass_block"),
    (Block::Dirt, "dirt"),
    (Block::CoarseDirt, "coarse_dirt"),
    (Block::Podzol, "podzol"),
    (Block::RootedDirt, "rooted_dirt"),
    (Block::Mycelium, "mycelium"),
    (Block::MossBlock, "moss_block"),
    (Block::Farmland, "farmland"),
    (Block::Sand, "sand"),
    (Block::Gravel, "gravel"),
    (Block::Water, "water"),
    (Block::Netherrack, "netherrack"),
    (Block::SoulSand, "soul_sand"),
    (Block::SoulSoil, "soul_soil"),
];

impl Block {
    /// Registry path (without namespace). Both halves of a tall flower share a name.
    pub fn registry_name(self) -> &'static str {
        match self {
            Block::Flower(kind) => kind.registry_name(),
            Block::TallFlower { kind, .. } => kind.registry_name(),
            simple => SIMPLE_BLOCKS
                .iter()
                .find(|(block, _)| *block == simple)
                .map(|(_, name)| *name)
                .unwrap_or("air"),
        }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == Block::Air
    }

    /// Blocks in the dirt family; any plant may root in them.
    pub fn supports_plants(self) -> bool {
        matches!(
            self,
            Block::GrassBlock
                | Block::Dirt
                | Block::CoarseDirt
                | Block::Podzol
                | Block::RootedDirt
                | Block::Mycelium
                | Block::MossBlock
                | Block::Farmland
        )
    }

    /// Nether soils that only the wither rose tolerates.
    pub fn is_nether_soil(self) -> bool {
        matches!(self, Block::Netherrack | Block::SoulSand | Block::SoulSoil)
    }

    /// Whether this block, placed on top of `below`, stays in place.
    ///
    /// Non-plant blocks always survive.
    pub fn can_survive_on(self, below: Block) -> bool {
        match self {
            Block::Flower(FlowerKind::WitherRose) => {
                below.supports_plants() || below.is_nether_soil()
            }
            Block::Flower(_) => below.supports_plants(),
            Block::TallFlower { upper: false, .. } => below.supports_plants(),
            Block::TallFlower { kind, upper: true } => {
                below == Block::TallFlower { kind, upper: false }
            }
            _ => true,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minecraft:{}", self.registry_name())
    }
}

impl FromStr for Block {
    type Err = UnknownBlock;

    /// Parses simple blocks and single-tile flowers. Tall flower halves are not
    /// addressable by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownBlock(s.trim().to_string());
        let key = RegistryKey::parse(s).map_err(|_| unknown())?;
        if !key.is_vanilla() {
            return Err(unknown());
        }
        if let Some((block, _)) = SIMPLE_BLOCKS.iter().find(|(_, name)| *name == key.path()) {
            return Ok(*block);
        }
        FlowerKind::from_registry_name(key.path())
            .map(Block::Flower)
            .ok_or_else(unknown)
    }
}
