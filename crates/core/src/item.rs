//! Item system - flowers and the few other items a player can carry.

use crate::registry::RegistryKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum stack size for every item in this workspace.
pub const MAX_STACK_SIZE: u8 = 64;

/// Single-tile flowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlowerKind {
    /// Dandelion
    Dandelion,
    /// Poppy
    Poppy,
    /// Blue orchid
    BlueOrchid,
    /// Allium
    Allium,
    /// Azure bluet
    AzureBluet,
    /// Red tulip
    RedTulip,
    /// Orange tulip
    OrangeTulip,
    /// White tulip
    WhiteTulip,
    /// Pink tulip
    PinkTulip,
    /// Oxeye daisy
    OxeyeDaisy,
    /// Cornflower
    Cornflower,
    /// Lily of the valley
    LilyOfTheValley,
    /// Wither rose (also survives on nether soils)
    WitherRose,
    /// Torchflower
    Torchflower,
}

impl FlowerKind {
    /// Every single-tile flower, in registry order.
    pub const ALL: [FlowerKind; 14] = [
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
        FlowerKind::Torchflower,
    ];

    /// Registry path (without namespace).
    pub fn registry_name(self) -> &'static str {
        match self {
            FlowerKind::Dandelion => "dandelion",
            FlowerKind::Poppy => "poppy",
            FlowerKind::BlueOrchid => "blue_orchid",
            FlowerKind::Allium => "allium",
            FlowerKind::AzureBluet => "azure_bluet",
            FlowerKind::RedTulip => "red_tulip",
            FlowerKind::OrangeTulip => "orange_tulip",
            FlowerKind::WhiteTulip => "white_tulip",
            FlowerKind::PinkTulip => "pink_tulip",
            FlowerKind::OxeyeDaisy => "oxeye_daisy",
            FlowerKind::Cornflower => "cornflower",
            FlowerKind::LilyOfTheValley => "lily_of_the_valley",
            FlowerKind::WitherRose => "wither_rose",
            FlowerKind::Torchflower => "torchflower",
        }
    }

    /// Look up a flower by registry path.
    pub fn from_registry_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.registry_name() == name)
    }
}

/// Two-block-tall flowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TallFlowerKind {
    /// Sunflower
    Sunflower,
    /// Lilac
    Lilac,
    /// Rose bush
    RoseBush,
    /// Peony
    Peony,
}

impl TallFlowerKind {
    /// Every tall flower, in registry order.
    pub const ALL: [TallFlowerKind; 4] = [
        TallFlowerKind::Sunflower,
        TallFlowerKind::Lilac,
        TallFlowerKind::RoseBush,
        TallFlowerKind::Peony,
    ];

    /// Registry path (without namespace).
    pub fn registry_name(self) -> &'static str {
        match self {
            TallFlowerKind::Sunflower => "sunflower",
            TallFlowerKind::Lilac => "lilac",
            TallFlowerKind::RoseBush => "rose_bush",
            TallFlowerKind::Peony => "peony",
        }
    }
}

/// Items with no placeable block form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MiscItem {
    /// Stick
    Stick,
    /// Wheat seeds
    WheatSeeds,
    /// Bone meal
    BoneMeal,
}

impl MiscItem {
    /// Every misc item, in registry order.
    pub const ALL: [MiscItem; 3] = [MiscItem::Stick, MiscItem::WheatSeeds, MiscItem::BoneMeal];

    /// Registry path (without namespace).
    pub fn registry_name(self) -> &'static str {
        match self {
            MiscItem::Stick => "stick",
            MiscItem::WheatSeeds => "wheat_seeds",
            MiscItem::BoneMeal => "bone_meal",
        }
    }
}

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    /// A single-tile flower
    Flower(FlowerKind),
    /// A two-block-tall flower
    TallFlower(TallFlowerKind),
    /// Anything else
    Misc(MiscItem),
}

/// Error returned when an item name does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item {0:?}")]
pub struct UnknownItem(pub String);

impl ItemType {
    /// Registry path (without namespace).
    pub fn registry_name(self) -> &'static str {
        match self {
            ItemType::Flower(kind) => kind.registry_name(),
            ItemType::TallFlower(kind) => kind.registry_name(),
            ItemType::Misc(item) => item.registry_name(),
        }
    }

    /// Namespaced registry key.
    pub fn key(self) -> RegistryKey {
        RegistryKey::vanilla(self.registry_name())
    }

    /// Resolve an item from its registry key.
    pub fn from_key(key: &RegistryKey) -> Option<Self> {
        if !key.is_vanilla() {
            return None;
        }
        let name = key.path();
        if let Some(kind) = FlowerKind::from_registry_name(name) {
            return Some(ItemType::Flower(kind));
        }
        if let Some(kind) = TallFlowerKind::ALL
            .into_iter()
            .find(|kind| kind.registry_name() == name)
        {
            return Some(ItemType::TallFlower(kind));
        }
        MiscItem::ALL
            .into_iter()
            .find(|item| item.registry_name() == name)
            .map(ItemType::Misc)
    }

    /// The flower this item is, if it is a single-tile flower.
    pub fn as_flower(self) -> Option<FlowerKind> {
        match self {
            ItemType::Flower(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ItemType {
    type Err = UnknownItem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegistryKey::parse(s)
            .ok()
            .and_then(|key| Self::from_key(&key))
            .ok_or_else(|| UnknownItem(s.trim().to_string()))
    }
}

/// A stack of identical items occupying one inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type.
    pub item: ItemType,
    /// Number of items (1..=64 while the stack is in an inventory).
    pub count: u8,
}

impl ItemStack {
    /// Create a new stack, clamping `count` to the stack limit.
    pub fn new(item: ItemType, count: u8) -> Self {
        Self {
            item,
            count: count.min(MAX_STACK_SIZE),
        }
    }

    /// True when no items remain.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove up to `amount` items, returning the amount actually removed.
    pub fn shrink(&mut self, amount: u8) -> u8 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Add up to `amount` items, returning the amount that didn't fit.
    pub fn grow(&mut self, amount: u8) -> u8 {
        let space = MAX_STACK_SIZE.saturating_sub(self.count);
        let added = amount.min(space);
        self.count += added;
        amount - added
    }
}
