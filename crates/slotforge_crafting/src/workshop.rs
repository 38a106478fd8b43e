//! # Workshop - Shared Crafting Service
//!
//! The matching core is single-threaded. The workshop is the one place that
//! shares it: per-entity inventories sit behind a `RwLock`, so every craft
//! runs with its inventory exclusively locked from the first probe of the
//! batch search to the final commit.
//!
//! ```text
//! give() ──────────┐
//!                  ▼
//!        inventories.write() ──> Crafter::craft ──> events.lock().push()
//!                  ▲
//! craft_max() ─────┘
//! ```

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

use crate::config::CraftingConfig;
use crate::crafting::{CraftResult, Crafter};
use crate::error::{CraftingError, CraftingResult};
use crate::inventory::Inventory;
use crate::recipe::RecipeId;
use crate::registry::ItemId;

/// Entity that owns an inventory.
pub type EntityId = u64;

/// Events emitted by the workshop for other systems (UI, audit, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CraftEvent {
    /// A craft committed.
    Crafted {
        /// Entity that crafted.
        entity: EntityId,
        /// The recipe crafted.
        recipe_id: RecipeId,
        /// Number of crafts.
        batch: u32,
        /// Item used per ingredient slot.
        consumed: Vec<ItemId>,
    },
    /// A craft was refused; the inventory is unchanged.
    Rejected {
        /// Entity that tried to craft.
        entity: EntityId,
        /// The recipe attempted.
        recipe_id: RecipeId,
        /// Why it was refused.
        reason: CraftingError,
    },
}

/// Thread-safe crafting over many inventories.
pub struct Workshop {
    crafter: Crafter,
    inventories: RwLock<HashMap<EntityId, Inventory>>,
    events: Mutex<Vec<CraftEvent>>,
}

impl Workshop {
    /// Creates a workshop around a crafter.
    #[must_use]
    pub fn new(crafter: Crafter) -> Self {
        Self {
            crafter,
            inventories: RwLock::new(HashMap::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Validates `config` and creates a workshop from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn from_config(config: &CraftingConfig) -> CraftingResult<Self> {
        Ok(Self::new(Crafter::from_config(config)?))
    }

    /// The underlying crafter.
    #[must_use]
    pub fn crafter(&self) -> &Crafter {
        &self.crafter
    }

    /// Adds items to an entity's inventory, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for unregistered items, `InventoryFull` if they
    /// do not fit.
    pub fn give(&self, entity: EntityId, item_id: ItemId, count: u32) -> CraftingResult<()> {
        let registry = self.crafter.registry();
        if !registry.contains(item_id) {
            return Err(CraftingError::ItemNotFound(item_id));
        }
        let mut inventories = self.inventories.write();
        let inventory = inventories
            .entry(entity)
            .or_insert_with(|| Inventory::with_capacity(self.crafter.limits().inventory_slots));
        inventory.add(item_id, count, registry.max_stack(item_id))
    }

    /// Gets a copy of an entity's inventory.
    #[must_use]
    pub fn inventory(&self, entity: EntityId) -> Option<Inventory> {
        self.inventories.read().get(&entity).cloned()
    }

    /// Gets item count for a specific item.
    #[must_use]
    pub fn item_count(&self, entity: EntityId, item_id: ItemId) -> u32 {
        self.inventories
            .read()
            .get(&entity)
            .map_or(0, |inv| inv.count_item(item_id))
    }

    /// Largest batch the entity can craft right now; 0 for unknown entities.
    ///
    /// # Errors
    ///
    /// Returns `RecipeNotFound` for unknown recipes.
    pub fn max_crafts(&self, entity: EntityId, recipe_id: RecipeId) -> CraftingResult<u32> {
        let inventories = self.inventories.read();
        match inventories.get(&entity) {
            Some(inventory) => self.crafter.max_crafts(inventory, recipe_id),
            None => self.crafter.max_crafts(&Inventory::with_capacity(0), recipe_id),
        }
    }

    /// Crafts `batch` of `recipe_id` for `entity`.
    ///
    /// # Errors
    ///
    /// Same as [`Crafter::craft`]; failures are also recorded as
    /// [`CraftEvent::Rejected`].
    pub fn craft(&self, entity: EntityId, recipe_id: RecipeId, batch: u32) -> CraftingResult<CraftResult> {
        self.run(entity, recipe_id, |crafter, inventory| {
            crafter.craft(inventory, recipe_id, batch)
        })
    }

    /// Crafts as many of `recipe_id` as `entity` can afford.
    ///
    /// # Errors
    ///
    /// Same as [`Crafter::craft_max`]; failures are also recorded as
    /// [`CraftEvent::Rejected`].
    pub fn craft_max(&self, entity: EntityId, recipe_id: RecipeId) -> CraftingResult<CraftResult> {
        self.run(entity, recipe_id, |crafter, inventory| {
            crafter.craft_max(inventory, recipe_id)
        })
    }

    fn run<F>(&self, entity: EntityId, recipe_id: RecipeId, op: F) -> CraftingResult<CraftResult>
    where
        F: FnOnce(&Crafter, &mut Inventory) -> CraftingResult<CraftResult>,
    {
        let result = {
            let mut inventories = self.inventories.write();
            match inventories.get_mut(&entity) {
                Some(inventory) => op(&self.crafter, inventory),
                // Unknown entities craft from nothing and keep no inventory.
                None => op(&self.crafter, &mut Inventory::with_capacity(0)),
            }
        };

        let event = match &result {
            Ok(done) => CraftEvent::Crafted {
                entity,
                recipe_id,
                batch: done.batch,
                consumed: done.consumed.clone(),
            },
            Err(reason) => CraftEvent::Rejected {
                entity,
                recipe_id,
                reason: reason.clone(),
            },
        };
        self.events.lock().push(event);
        result
    }

    /// Drains all pending craft events.
    pub fn drain_events(&self) -> Vec<CraftEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Peeks at pending event count.
    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.lock().len()
    }
}
