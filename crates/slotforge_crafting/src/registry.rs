//! # Item Registry
//!
//! Item definitions: maximum stack sizes and tags used by recipe ingredients.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CraftingError, CraftingResult};

/// Unique identifier for an item type. `0` marks an empty inventory slot.
pub type ItemId = u32;

/// An item definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Unique identifier.
    pub id: ItemId,
    /// Human-readable name.
    pub name: String,
    /// Maximum stack size; the registry default applies when absent.
    #[serde(default)]
    pub max_stack: Option<u32>,
    /// Tags this item carries (`"planks"`, `"logs"`, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ItemDef {
    /// Creates an untagged item with the default stack size.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            max_stack: None,
            tags: Vec::new(),
        }
    }

    /// Sets the maximum stack size.
    #[must_use]
    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = Some(max_stack);
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Registry of all known items.
#[derive(Clone, Debug)]
pub struct ItemRegistry {
    items: HashMap<ItemId, ItemDef>,
    /// Tag name -> items carrying it, in registration order.
    tags: HashMap<String, Vec<ItemId>>,
    default_max_stack: u32,
}

impl ItemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(default_max_stack: u32) -> Self {
        Self {
            items: HashMap::new(),
            tags: HashMap::new(),
            default_max_stack,
        }
    }

    /// Registers an item.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for id 0, a duplicate id, or a zero max stack.
    pub fn register(&mut self, item: ItemDef) -> CraftingResult<()> {
        if item.id == 0 {
            return Err(CraftingError::InvalidConfig(format!(
                "Item '{}' uses reserved id 0",
                item.name
            )));
        }
        if self.items.contains_key(&item.id) {
            return Err(CraftingError::InvalidConfig(format!(
                "Item ID {} already exists",
                item.id
            )));
        }
        if item.max_stack == Some(0) {
            return Err(CraftingError::InvalidConfig(format!(
                "Item {} has a max stack of 0",
                item.id
            )));
        }

        for tag in &item.tags {
            self.tags.entry(tag.clone()).or_default().push(item.id);
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    /// Gets an item by ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemDef> {
        self.items.get(&id)
    }

    /// True if the item is registered.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Maximum stack size for an item, falling back to the registry default.
    #[must_use]
    pub fn max_stack(&self, id: ItemId) -> u32 {
        self.items
            .get(&id)
            .and_then(|item| item.max_stack)
            .unwrap_or(self.default_max_stack)
    }

    /// Items carrying `tag`, in registration order. Empty for unknown tags.
    #[must_use]
    pub fn items_with_tag(&self, tag: &str) -> &[ItemId] {
        self.tags.get(tag).map_or(&[][..], Vec::as_slice)
    }

    /// True if some item carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Returns the number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no item is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
