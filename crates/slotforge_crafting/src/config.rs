//! # Crafting Configuration
//!
//! Items, recipes and limits are balance data: they live in a TOML file that
//! is loaded once at startup.
//!
//! ```toml
//! [limits]
//! max_batch = 64
//! default_max_stack = 64
//! inventory_slots = 36
//!
//! [[items]]
//! id = 1
//! name = "Oak Planks"
//! tags = ["planks"]
//!
//! [[recipes]]
//! id = 1
//! name = "Sticks"
//! ingredients = ["#planks", "#planks"]
//! output = { item_id = 2, quantity = 4 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CraftingError, CraftingResult};
use crate::inventory::DEFAULT_INVENTORY_SLOTS;
use crate::recipe::{Recipe, RecipeBook};
use crate::registry::{ItemDef, ItemRegistry};

/// Global crafting limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftingLimits {
    /// Hard cap on how many crafts one request may batch.
    pub max_batch: u32,
    /// Stack size for items that do not declare one.
    pub default_max_stack: u32,
    /// Slots in a freshly created inventory.
    pub inventory_slots: usize,
}

impl Default for CraftingLimits {
    fn default() -> Self {
        Self {
            max_batch: 64,
            default_max_stack: 64,
            inventory_slots: DEFAULT_INVENTORY_SLOTS,
        }
    }
}

/// The full crafting configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingConfig {
    /// Global limits.
    #[serde(default)]
    pub limits: CraftingLimits,
    /// Item definitions.
    #[serde(default)]
    pub items: Vec<ItemDef>,
    /// Recipe definitions.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl CraftingConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the text does not match the schema.
    pub fn from_toml_str(text: &str) -> CraftingResult<Self> {
        toml::from_str(text).map_err(|e| CraftingError::ConfigParse(e.to_string()))
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `ConfigParse` if it is invalid.
    pub fn load(path: impl AsRef<Path>) -> CraftingResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CraftingError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Validates the configuration and builds the registry and recipe book.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for zero limits, bad items, or bad recipes.
    pub fn build(&self) -> CraftingResult<(ItemRegistry, RecipeBook)> {
        if self.limits.max_batch == 0 {
            return Err(CraftingError::InvalidConfig("limits.max_batch must be positive".to_string()));
        }
        if self.limits.default_max_stack == 0 {
            return Err(CraftingError::InvalidConfig(
                "limits.default_max_stack must be positive".to_string(),
            ));
        }

        let mut registry = ItemRegistry::new(self.limits.default_max_stack);
        for item in &self.items {
            registry.register(item.clone())?;
        }

        let mut book = RecipeBook::new();
        for recipe in &self.recipes {
            book.add_recipe(recipe.clone(), &registry)?;
        }

        tracing::info!(
            "crafting config loaded: {} items, {} recipes",
            registry.len(),
            book.len()
        );
        Ok((registry, book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Ingredient;

    const SAMPLE: &str = r##"
[limits]
max_batch = 16

[[items]]
id = 1
name = "Oak Planks"
tags = ["planks"]

[[items]]
id = 2
name = "Stick"

[[items]]
id = 3
name = "Torch"
max_stack = 32

[[recipes]]
id = 1
name = "Sticks"
ingredients = ["#planks", "#planks"]
output = { item_id = 2, quantity = 4 }

[[recipes]]
id = 2
name = "Torch"
ingredients = [2, [1, 2]]
output = { item_id = 3, quantity = 4 }
"##;

    #[test]
    fn test_parse_sample() {
        let config = CraftingConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.limits.max_batch, 16);
        assert_eq!(config.limits.default_max_stack, 64);
        assert_eq!(config.items.len(), 3);
        assert_eq!(config.items[2].max_stack, Some(32));
        assert_eq!(
            config.recipes[1].ingredients,
            vec![Ingredient::Item(2), Ingredient::AnyOf(vec![1, 2])]
        );
        assert_eq!(config.recipes[0].ingredients[0], Ingredient::Tag("#planks".to_string()));

        let (registry, book) = config.build().unwrap();
        assert_eq!(registry.max_stack(3), 32);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_parse_error() {
        let result = CraftingConfig::from_toml_str("[limits]\nmax_batch = \"lots\"");
        assert!(matches!(result, Err(CraftingError::ConfigParse(_))));
    }

    #[test]
    fn test_build_rejects_unknown_tag() {
        let text = r##"
[[items]]
id = 1
name = "Stone"

[[recipes]]
id = 1
name = "Bad"
ingredients = ["#planks"]
output = { item_id = 1, quantity = 1 }
"##;
        let config = CraftingConfig::from_toml_str(text).unwrap();
        assert!(matches!(config.build(), Err(CraftingError::InvalidConfig(_))));
    }

    #[test]
    fn test_build_rejects_zero_limits() {
        let mut config = CraftingConfig::default();
        config.limits.max_batch = 0;
        assert!(config.build().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = CraftingConfig::load("/definitely/not/here/recipes.toml");
        assert!(matches!(result, Err(CraftingError::Io { .. })));
    }
}
