//! # Recipes
//!
//! A recipe is a list of ingredient slots and one output. Each ingredient
//! resolves against the item registry into a matching slot, so the crafter can
//! hand the whole list to the matching engine as one request.
//!
//! ## Ingredient forms (TOML)
//!
//! ```toml
//! ingredients = [
//!     3,          # exactly item 3
//!     [10, 11],   # item 10 or item 11
//!     "#planks",  # any item tagged "planks"
//! ]
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotforge_core::AnyOf;

use crate::error::{CraftingError, CraftingResult};
use crate::registry::{ItemId, ItemRegistry};

/// Unique identifier for a recipe.
pub type RecipeId = u32;

/// A matching slot over item ids.
pub type IngredientSlot = AnyOf<ItemId>;

/// One ingredient slot of a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    /// Exactly one item type.
    Item(ItemId),
    /// Any of the listed item types.
    AnyOf(Vec<ItemId>),
    /// Any item carrying the tag, written `"#tag"`.
    Tag(String),
}

impl Ingredient {
    /// Resolves this ingredient into the set of item types it accepts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for unknown items or tags, a tag missing its
    /// `#` prefix, or an empty alternative list.
    pub fn resolve(&self, registry: &ItemRegistry) -> CraftingResult<IngredientSlot> {
        let accepted: Vec<ItemId> = match self {
            Self::Item(id) => vec![*id],
            Self::AnyOf(ids) => {
                if ids.is_empty() {
                    return Err(CraftingError::InvalidConfig(
                        "Ingredient alternative list is empty".to_string(),
                    ));
                }
                ids.clone()
            }
            Self::Tag(raw) => {
                let tag = raw.strip_prefix('#').ok_or_else(|| {
                    CraftingError::InvalidConfig(format!("Tag ingredient '{raw}' must start with '#'"))
                })?;
                if !registry.has_tag(tag) {
                    return Err(CraftingError::InvalidConfig(format!("Unknown tag '{tag}'")));
                }
                registry.items_with_tag(tag).to_vec()
            }
        };

        if let Some(&unknown) = accepted.iter().find(|&&id| !registry.contains(id)) {
            return Err(CraftingError::InvalidConfig(format!(
                "Ingredient references unknown item {unknown}"
            )));
        }
        Ok(AnyOf::new(accepted))
    }
}

/// Output item and quantity produced per craft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeOutput {
    /// The item ID.
    pub item_id: ItemId,
    /// Quantity produced per craft.
    pub quantity: u32,
}

impl RecipeOutput {
    /// Creates a new recipe output.
    #[inline]
    #[must_use]
    pub const fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// A crafting recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier.
    pub id: RecipeId,
    /// Human-readable name.
    pub name: String,
    /// One entry per ingredient slot; each craft consumes one item per slot.
    pub ingredients: Vec<Ingredient>,
    /// What one craft produces.
    pub output: RecipeOutput,
}

impl Recipe {
    /// Creates a new recipe.
    #[must_use]
    pub fn new(
        id: RecipeId,
        name: impl Into<String>,
        ingredients: Vec<Ingredient>,
        output: RecipeOutput,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            ingredients,
            output,
        }
    }
}

/// A recipe together with its resolved ingredient slots.
#[derive(Clone, Debug)]
pub struct ResolvedRecipe {
    recipe: Recipe,
    slots: Vec<IngredientSlot>,
}

impl ResolvedRecipe {
    /// The recipe definition.
    #[must_use]
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// The matching request for one craft: one slot per ingredient.
    #[must_use]
    pub fn slots(&self) -> &[IngredientSlot] {
        &self.slots
    }
}

/// All known recipes, resolved against an item registry.
#[derive(Clone, Debug, Default)]
pub struct RecipeBook {
    recipes: HashMap<RecipeId, ResolvedRecipe>,
}

impl RecipeBook {
    /// Creates an empty recipe book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and adds a recipe.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the id already exists, the recipe has no
    /// ingredients, the output is unknown or has quantity 0, or any
    /// ingredient fails to resolve.
    pub fn add_recipe(&mut self, recipe: Recipe, registry: &ItemRegistry) -> CraftingResult<()> {
        if self.recipes.contains_key(&recipe.id) {
            return Err(CraftingError::InvalidConfig(format!(
                "Recipe ID {} already exists",
                recipe.id
            )));
        }
        if recipe.ingredients.is_empty() {
            return Err(CraftingError::InvalidConfig(format!(
                "Recipe {} must have at least one ingredient",
                recipe.id
            )));
        }
        if recipe.output.quantity == 0 {
            return Err(CraftingError::InvalidConfig(format!(
                "Recipe {} produces nothing",
                recipe.id
            )));
        }
        if !registry.contains(recipe.output.item_id) {
            return Err(CraftingError::InvalidConfig(format!(
                "Recipe {} outputs unknown item {}",
                recipe.id, recipe.output.item_id
            )));
        }

        let slots = recipe
            .ingredients
            .iter()
            .map(|ingredient| ingredient.resolve(registry))
            .collect::<CraftingResult<Vec<_>>>()?;

        self.recipes
            .insert(recipe.id, ResolvedRecipe { recipe, slots });
        Ok(())
    }

    /// Gets a recipe by ID.
    #[must_use]
    pub fn get(&self, id: RecipeId) -> Option<&ResolvedRecipe> {
        self.recipes.get(&id)
    }

    /// Returns all recipes.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedRecipe> {
        self.recipes.values()
    }

    /// Returns the number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// True if the book holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ItemDef;
    use slotforge_core::Slot;

    const OAK_PLANKS: ItemId = 1;
    const BIRCH_PLANKS: ItemId = 2;
    const STICK: ItemId = 3;
    const CHEST: ItemId = 4;

    fn registry() -> ItemRegistry {
        let mut registry = ItemRegistry::new(64);
        registry
            .register(ItemDef::new(OAK_PLANKS, "Oak Planks").with_tag("planks"))
            .unwrap();
        registry
            .register(ItemDef::new(BIRCH_PLANKS, "Birch Planks").with_tag("planks"))
            .unwrap();
        registry.register(ItemDef::new(STICK, "Stick")).unwrap();
        registry.register(ItemDef::new(CHEST, "Chest")).unwrap();
        registry
    }

    #[test]
    fn test_resolve_forms() {
        let registry = registry();

        let tag = Ingredient::Tag("#planks".to_string()).resolve(&registry).unwrap();
        assert!(tag.accepts(&OAK_PLANKS) && tag.accepts(&BIRCH_PLANKS));
        assert!(!tag.accepts(&STICK));

        let any = Ingredient::AnyOf(vec![STICK, CHEST]).resolve(&registry).unwrap();
        assert_eq!(any.accepted(), &[STICK, CHEST]);

        let item = Ingredient::Item(STICK).resolve(&registry).unwrap();
        assert_eq!(item.accepted(), &[STICK]);
    }

    #[test]
    fn test_resolve_errors() {
        let registry = registry();
        for bad in [
            Ingredient::Item(99),
            Ingredient::AnyOf(vec![]),
            Ingredient::AnyOf(vec![STICK, 99]),
            Ingredient::Tag("planks".to_string()),
            Ingredient::Tag("#logs".to_string()),
        ] {
            assert!(
                matches!(bad.resolve(&registry), Err(CraftingError::InvalidConfig(_))),
                "{bad:?} should not resolve"
            );
        }
    }

    #[test]
    fn test_add_recipe_validation() {
        let registry = registry();
        let mut book = RecipeBook::new();
        let chest = Recipe::new(
            1,
            "Chest",
            vec![Ingredient::Tag("#planks".to_string()); 8],
            RecipeOutput::new(CHEST, 1),
        );
        book.add_recipe(chest.clone(), &registry).unwrap();
        assert_eq!(book.get(1).unwrap().slots().len(), 8);

        assert!(book.add_recipe(chest, &registry).is_err());
        assert!(book
            .add_recipe(Recipe::new(2, "Nothing", vec![], RecipeOutput::new(CHEST, 1)), &registry)
            .is_err());
        assert!(book
            .add_recipe(
                Recipe::new(3, "Void", vec![Ingredient::Item(STICK)], RecipeOutput::new(CHEST, 0)),
                &registry
            )
            .is_err());
        assert!(book
            .add_recipe(
                Recipe::new(4, "Mystery", vec![Ingredient::Item(STICK)], RecipeOutput::new(77, 1)),
                &registry
            )
            .is_err());
        assert_eq!(book.len(), 1);
    }
}
