//! # Crafting - Batch Crafting on the Matching Engine
//!
//! **Transactional "craft N" and "craft as many as possible".**
//!
//! 1. **Capped accounting**: every inventory stack is accounted into a
//!    throwaway pool, contributing at most its item's max stack size
//! 2. **Matching**: the recipe's ingredient slots go to the engine as one
//!    request; alternatives are routed so every slot is covered
//! 3. **Transactional**: inputs removed and outputs added together, or the
//!    inventory snapshot is restored
//!
//! ## Example
//!
//! ```rust,ignore
//! let crafter = Crafter::from_config(&CraftingConfig::load("data/recipes.toml")?)?;
//!
//! // How many torches can this inventory make?
//! let n = crafter.max_crafts(&inventory, TORCH_RECIPE)?;
//!
//! // Make them all, atomically.
//! let result = crafter.craft_max(&mut inventory, TORCH_RECIPE)?;
//! ```

use slotforge_core::ResourceAccountingFacade;

use crate::config::{CraftingConfig, CraftingLimits};
use crate::error::{CraftingError, CraftingResult};
use crate::inventory::Inventory;
use crate::recipe::{RecipeBook, RecipeId, RecipeOutput, ResolvedRecipe};
use crate::registry::{ItemId, ItemRegistry};

/// Result of a successful craft operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CraftResult {
    /// The recipe that was crafted.
    pub recipe_id: RecipeId,
    /// Number of crafts performed.
    pub batch: u32,
    /// Item used by each ingredient slot, in slot order; each slot consumed `batch` of it.
    pub consumed: Vec<ItemId>,
    /// Items produced: `batch * output.quantity` of the output item.
    pub produced: RecipeOutput,
}

/// Crafts recipes against inventories.
#[derive(Clone, Debug)]
pub struct Crafter {
    registry: ItemRegistry,
    book: RecipeBook,
    limits: CraftingLimits,
}

impl Crafter {
    /// Creates a crafter from a built registry and recipe book.
    #[must_use]
    pub fn new(registry: ItemRegistry, book: RecipeBook, limits: CraftingLimits) -> Self {
        Self {
            registry,
            book,
            limits,
        }
    }

    /// Validates `config` and builds a crafter from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn from_config(config: &CraftingConfig) -> CraftingResult<Self> {
        let (registry, book) = config.build()?;
        Ok(Self::new(registry, book, config.limits))
    }

    /// The item registry.
    #[must_use]
    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// The recipe book.
    #[must_use]
    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    /// The configured limits.
    #[must_use]
    pub fn limits(&self) -> &CraftingLimits {
        &self.limits
    }

    fn recipe(&self, recipe_id: RecipeId) -> CraftingResult<&ResolvedRecipe> {
        self.book
            .get(recipe_id)
            .ok_or(CraftingError::RecipeNotFound(recipe_id))
    }

    fn pool(&self, inventory: &Inventory) -> ResourceAccountingFacade<ItemId> {
        let mut pool = ResourceAccountingFacade::new();
        inventory.account_into(&mut pool, &self.registry);
        pool
    }

    /// Most crafts one request may produce: the batch limit, and no more
    /// outputs than fit in one output stack.
    fn batch_cap(&self, output: RecipeOutput) -> u32 {
        let per_stack = self.registry.max_stack(output.item_id) / output.quantity.max(1);
        self.limits.max_batch.min(per_stack.max(1))
    }

    /// Largest batch of `recipe_id` the inventory can craft right now.
    ///
    /// # Errors
    ///
    /// Returns `RecipeNotFound` for unknown recipes.
    pub fn max_crafts(&self, inventory: &Inventory, recipe_id: RecipeId) -> CraftingResult<u32> {
        let resolved = self.recipe(recipe_id)?;
        let cap = self.batch_cap(resolved.recipe().output);
        let best = self
            .pool(inventory)
            .largest_satisfiable_batch(resolved.slots(), i64::from(cap));
        Ok(u32::try_from(best).unwrap_or(cap))
    }

    /// True if the inventory can craft `batch` of `recipe_id` at once.
    ///
    /// # Errors
    ///
    /// Returns `RecipeNotFound` for unknown recipes.
    pub fn can_craft(&self, inventory: &Inventory, recipe_id: RecipeId, batch: u32) -> CraftingResult<bool> {
        let resolved = self.recipe(recipe_id)?;
        Ok(self
            .pool(inventory)
            .can_satisfy(resolved.slots(), i64::from(batch)))
    }

    /// Performs a transactional craft of `batch` repetitions.
    ///
    /// **ATOMIC**: either every ingredient slot gives up `batch` items and the
    /// outputs are added, or the inventory is left untouched.
    ///
    /// # Errors
    ///
    /// - `RecipeNotFound` if the recipe doesn't exist
    /// - `InsufficientMaterials` if the slots cannot all be filled
    /// - `InventoryFull` if the outputs do not fit
    pub fn craft(
        &self,
        inventory: &mut Inventory,
        recipe_id: RecipeId,
        batch: u32,
    ) -> CraftingResult<CraftResult> {
        let resolved = self.recipe(recipe_id)?;
        let output = resolved.recipe().output;
        if batch == 0 {
            return Ok(CraftResult {
                recipe_id,
                batch: 0,
                consumed: Vec::new(),
                produced: RecipeOutput::new(output.item_id, 0),
            });
        }

        let consumed = self
            .pool(inventory)
            .consume(resolved.slots(), i64::from(batch))
            .ok_or(CraftingError::InsufficientMaterials { recipe_id, batch })?;

        let produced_count = output
            .quantity
            .checked_mul(batch)
            .ok_or_else(|| CraftingError::InvalidConfig(format!("batch {batch} overflows output count")))?;

        let snapshot = inventory.snapshot();
        if let Err(e) = self.apply(inventory, &consumed, batch, output.item_id, produced_count) {
            inventory.restore(&snapshot);
            tracing::warn!("craft of recipe {} x{} rolled back: {}", recipe_id, batch, e);
            return Err(e);
        }

        tracing::info!(
            "crafted recipe {} x{}: {} of item {}",
            recipe_id,
            batch,
            produced_count,
            output.item_id
        );
        Ok(CraftResult {
            recipe_id,
            batch,
            consumed,
            produced: RecipeOutput::new(output.item_id, produced_count),
        })
    }

    fn apply(
        &self,
        inventory: &mut Inventory,
        consumed: &[ItemId],
        batch: u32,
        output_item: ItemId,
        produced_count: u32,
    ) -> CraftingResult<()> {
        for &item_id in consumed {
            inventory.remove(item_id, batch)?;
        }
        inventory.add(output_item, produced_count, self.registry.max_stack(output_item))
    }

    /// Crafts as many of `recipe_id` as the inventory allows.
    ///
    /// # Errors
    ///
    /// - `RecipeNotFound` if the recipe doesn't exist
    /// - `InsufficientMaterials` if not even one craft fits
    /// - `InventoryFull` if the outputs do not fit
    pub fn craft_max(&self, inventory: &mut Inventory, recipe_id: RecipeId) -> CraftingResult<CraftResult> {
        let batch = self.max_crafts(inventory, recipe_id)?;
        if batch == 0 {
            return Err(CraftingError::InsufficientMaterials { recipe_id, batch: 1 });
        }
        self.craft(inventory, recipe_id, batch)
    }
}
