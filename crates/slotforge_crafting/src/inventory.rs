//! # Inventory
//!
//! A fixed number of item stacks, sized at creation. Counting helpers feed
//! the matching pool; `snapshot`/`restore` give crafting its rollback.

use slotforge_core::ResourceAccountingFacade;

use crate::error::{CraftingError, CraftingResult};
use crate::registry::{ItemId, ItemRegistry};

/// A stack of items in an inventory slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemStack {
    /// The item type ID, or 0 for an empty slot.
    pub item_id: ItemId,
    /// Number of items in this stack.
    pub count: u32,
}

impl ItemStack {
    /// Creates an empty item stack.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            item_id: 0,
            count: 0,
        }
    }

    /// Creates a new item stack.
    #[inline]
    #[must_use]
    pub const fn new(item_id: ItemId, count: u32) -> Self {
        Self { item_id, count }
    }

    /// Returns true if this slot is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0 || self.item_id == 0
    }

    /// Clears this slot.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

/// Default number of inventory slots.
pub const DEFAULT_INVENTORY_SLOTS: usize = 36;

/// A fixed-capacity inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<ItemStack>,
}

impl Inventory {
    /// Creates an empty inventory with `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![ItemStack::empty(); capacity],
        }
    }

    /// Returns the total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of non-empty slots.
    #[must_use]
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Gets the stack at `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)
    }

    /// Iterates over non-empty stacks.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().filter(|s| !s.is_empty())
    }

    /// Counts the total number of a specific item across all slots.
    #[must_use]
    pub fn count_item(&self, item_id: ItemId) -> u32 {
        self.stacks()
            .filter(|s| s.item_id == item_id)
            .fold(0u32, |acc, s| acc.saturating_add(s.count))
    }

    /// Adds items, topping up existing stacks before using empty slots.
    ///
    /// Nothing is added unless everything fits.
    ///
    /// # Errors
    ///
    /// Returns `InventoryFull` if there's no space.
    pub fn add(&mut self, item_id: ItemId, count: u32, max_stack: u32) -> CraftingResult<()> {
        if count == 0 {
            return Ok(());
        }
        if item_id == 0 || max_stack == 0 {
            return Err(CraftingError::InvalidConfig(format!(
                "cannot add item {item_id} with max stack {max_stack}"
            )));
        }

        let room: u64 = self
            .slots
            .iter()
            .map(|s| {
                if s.is_empty() {
                    u64::from(max_stack)
                } else if s.item_id == item_id {
                    u64::from(max_stack.saturating_sub(s.count))
                } else {
                    0
                }
            })
            .sum();
        if room < u64::from(count) {
            return Err(CraftingError::InventoryFull {
                capacity: self.capacity(),
                amount: count,
            });
        }

        let mut remaining = count;
        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if !slot.is_empty() && slot.item_id == item_id && slot.count < max_stack {
                let can_add = (max_stack - slot.count).min(remaining);
                slot.count += can_add;
                remaining -= can_add;
            }
        }
        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if slot.is_empty() {
                let add_count = remaining.min(max_stack);
                *slot = ItemStack::new(item_id, add_count);
                remaining -= add_count;
            }
        }

        Ok(())
    }

    /// Removes items, draining the first matching stacks first.
    ///
    /// # Errors
    ///
    /// Returns `MissingItems` if not enough items; the inventory is unchanged.
    pub fn remove(&mut self, item_id: ItemId, count: u32) -> CraftingResult<()> {
        let available = self.count_item(item_id);
        if available < count {
            return Err(CraftingError::MissingItems {
                item_id,
                required: count,
                available,
            });
        }

        let mut remaining = count;
        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if !slot.is_empty() && slot.item_id == item_id {
                let remove_count = slot.count.min(remaining);
                slot.count -= remove_count;
                remaining -= remove_count;
                if slot.count == 0 {
                    slot.clear();
                }
            }
        }

        Ok(())
    }

    /// Accounts every stack into `pool`, each contributing at most its item's
    /// max stack size.
    pub fn account_into(&self, pool: &mut ResourceAccountingFacade<ItemId>, registry: &ItemRegistry) {
        for stack in self.stacks() {
            pool.account_entry(
                stack.item_id,
                i64::from(stack.count),
                i64::from(registry.max_stack(stack.item_id)),
            );
        }
    }

    /// Creates a snapshot of the inventory for rollback.
    #[must_use]
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            slots: self.slots.clone(),
        }
    }

    /// Restores inventory from a snapshot (rollback).
    pub fn restore(&mut self, snapshot: &InventorySnapshot) {
        self.slots.clone_from(&snapshot.slots);
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INVENTORY_SLOTS)
    }
}

/// Snapshot of inventory state for transactional rollback.
#[derive(Clone, Debug)]
pub struct InventorySnapshot {
    slots: Vec<ItemStack>,
}
