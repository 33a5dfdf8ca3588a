//! Player inventory: 36 slots, a selectable hotbar and an off-hand slot.

use crate::view::{Hand, InventoryView};
use autoplanter_core::{ItemStack, ItemType};

/// Number of slots in player inventory.
pub const INVENTORY_SIZE: usize = 36;

/// Slots `0..HOTBAR_SIZE` form the hotbar.
pub const HOTBAR_SIZE: usize = 9;

/// Player inventory with a selected hotbar slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInventory {
    slots: [Option<ItemStack>; INVENTORY_SIZE],
    offhand: Option<ItemStack>,
    selected: usize,
}

impl PlayerInventory {
    /// Create a new empty inventory with hotbar slot 0 selected.
    pub fn new() -> Self {
        Self {
            slots: [None; INVENTORY_SIZE],
            offhand: None,
            selected: 0,
        }
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Set an item stack in a slot. Empty stacks clear the slot.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        let Some(target) = self.slots.get_mut(slot) else {
            return false;
        };
        *target = stack.filter(|s| !s.is_empty());
        true
    }

    /// Set the off-hand stack.
    pub fn set_offhand(&mut self, stack: Option<ItemStack>) {
        self.offhand = stack.filter(|s| !s.is_empty());
    }

    /// Currently selected hotbar slot.
    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    /// Select a hotbar slot. Out-of-range slots are ignored.
    pub fn select_hotbar(&mut self, slot: usize) -> bool {
        if slot >= HOTBAR_SIZE {
            return false;
        }
        self.selected = slot;
        true
    }

    /// Remove `amount` items from the stack in `hand`, clearing it when empty.
    /// Returns the amount actually removed.
    pub fn shrink(&mut self, hand: Hand, amount: u8) -> u8 {
        let slot = match hand {
            Hand::Main => &mut self.slots[self.selected],
            Hand::Off => &mut self.offhand,
        };
        let Some(stack) = slot else {
            return 0;
        };
        let removed = stack.shrink(amount);
        if stack.is_empty() {
            *slot = None;
        }
        removed
    }

    /// Count the total number of a specific item in the inventory slots.
    pub fn count_item(&self, item: ItemType) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item == item)
            .map(|stack| stack.count as u32)
            .sum()
    }

    /// Check if the inventory is completely empty.
    pub fn is_empty(&self) -> bool {
        self.offhand.is_none() && self.slots.iter().all(|slot| slot.is_none())
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryView for PlayerInventory {
    fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.get(slot)
    }

    fn held_item(&self, hand: Hand) -> Option<&ItemStack> {
        match hand {
            Hand::Main => self.slots[self.selected].as_ref(),
            Hand::Off => self.offhand.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoplanter_core::{FlowerKind, MiscItem};

    fn poppies(count: u8) -> ItemStack {
        ItemStack::new(ItemType::Flower(FlowerKind::Poppy), count)
    }

    #[test]
    fn main_hand_follows_selected_slot() {
        let mut inv = PlayerInventory::new();
        inv.set(0, Some(poppies(3)));
        inv.set(4, Some(ItemStack::new(ItemType::Misc(MiscItem::Stick), 1)));

        assert_eq!(inv.held_item(Hand::Main), Some(&poppies(3)));
        assert!(inv.select_hotbar(4));
        assert_eq!(
            inv.held_item(Hand::Main).map(|s| s.item),
            Some(ItemType::Misc(MiscItem::Stick))
        );
        assert!(!inv.select_hotbar(HOTBAR_SIZE));
        assert_eq!(inv.selected_slot(), 4);
    }

    #[test]
    fn shrink_clears_empty_stacks() {
        let mut inv = PlayerInventory::new();
        inv.set(0, Some(poppies(2)));
        assert_eq!(inv.shrink(Hand::Main, 1), 1);
        assert_eq!(inv.item(0).map(|s| s.count), Some(1));
        assert_eq!(inv.shrink(Hand::Main, 1), 1);
        assert_eq!(inv.item(0), None);
        assert_eq!(inv.shrink(Hand::Main, 1), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn out_of_range_slots_are_rejected() {
        let mut inv = PlayerInventory::new();
        assert!(!inv.set(INVENTORY_SIZE, Some(poppies(1))));
        assert_eq!(inv.get(INVENTORY_SIZE), None);
        assert!(inv.set(35, Some(poppies(5))));
        assert_eq!(inv.count_item(ItemType::Flower(FlowerKind::Poppy)), 5);
    }

    #[test]
    fn offhand_is_separate_from_slots() {
        let mut inv = PlayerInventory::new();
        inv.set_offhand(Some(poppies(1)));
        assert!(inv.held_item(Hand::Main).is_none());
        assert_eq!(inv.held_item(Hand::Off), Some(&poppies(1)));
        assert_eq!(inv.count_item(ItemType::Flower(FlowerKind::Poppy)), 0);
    }
}
