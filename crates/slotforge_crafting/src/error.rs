//! # Crafting Error Types
//!
//! All errors that can occur in the crafting front-end.

use thiserror::Error;

use crate::recipe::RecipeId;
use crate::registry::ItemId;

/// Errors that can occur while loading recipes or crafting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CraftingError {
    /// The inventory cannot fill every ingredient slot at the requested batch.
    #[error("insufficient materials for recipe {recipe_id} at batch {batch}")]
    InsufficientMaterials {
        /// The recipe that was attempted.
        recipe_id: RecipeId,
        /// The batch size requested.
        batch: u32,
    },

    /// Tried to remove more of an item than the inventory holds.
    #[error("missing items: need {required} of item {item_id}, have {available}")]
    MissingItems {
        /// The item that was missing.
        item_id: ItemId,
        /// The amount required.
        required: u32,
        /// The amount available.
        available: u32,
    },

    /// Recipe not found in the recipe book.
    #[error("recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    /// Item not found in the registry.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// Inventory is full, cannot add more items.
    #[error("inventory full: capacity {capacity}, tried to add {amount}")]
    InventoryFull {
        /// Number of slots.
        capacity: usize,
        /// Amount that did not fit.
        amount: u32,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file is not valid TOML for the expected schema.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
}

/// Result type for crafting operations.
pub type CraftingResult<T> = Result<T, CraftingError>;
