//! # Slotforge Crafting
//!
//! Recipe crafting built on the `slotforge_core` matching engine.
//!
//! ## Design Principles
//!
//! 1. **Alternatives are routed, not guessed** - ingredient slots that accept
//!    several items are matched as one request, so an early slot never
//!    starves a later one
//! 2. **Transactional crafting** - all inputs consumed and outputs added, or
//!    nothing happens
//! 3. **External configuration** - items, recipes and limits in TOML files
//!
//! ## Example
//!
//! ```rust,ignore
//! use slotforge_crafting::{CraftingConfig, Workshop};
//!
//! let workshop = Workshop::from_config(&CraftingConfig::load("data/recipes.toml")?)?;
//! workshop.give(player, OAK_LOG, 12)?;
//! let crafted = workshop.craft_max(player, PLANKS_RECIPE)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod crafting;
pub mod error;
pub mod inventory;
pub mod recipe;
pub mod registry;
pub mod workshop;

pub use config::{CraftingConfig, CraftingLimits};
pub use crafting::{CraftResult, Crafter};
pub use error::{CraftingError, CraftingResult};
pub use inventory::{Inventory, InventorySnapshot, ItemStack, DEFAULT_INVENTORY_SLOTS};
pub use recipe::{Ingredient, IngredientSlot, Recipe, RecipeBook, RecipeId, RecipeOutput, ResolvedRecipe};
pub use registry::{ItemDef, ItemId, ItemRegistry};
pub use workshop::{CraftEvent, EntityId, Workshop};
