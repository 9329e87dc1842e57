use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of the shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// Shopping list in insertion order. Identical items are never merged.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item under a freshly generated id.
    pub fn add_item(&mut self, count: Option<f64>, unit: &str, ingredient: &str) -> ShoppingItem {
        let item = ShoppingItem {
            id: Uuid::new_v4(),
            count,
            unit: unit.to_string(),
            ingredient: ingredient.to_string(),
        };
        self.items.push(item.clone());
        item
    }

    /// Remove the item with `id`. Returns false if there was none.
    pub fn delete_item(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Set the count of the item with `id`. Returns false if there was none.
    pub fn update_count(&mut self, id: Uuid, count: f64) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.count = Some(count);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
