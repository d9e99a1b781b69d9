//! # Inventory
//!
//! Bounded, append-only store of collected keys.

use crate::{ClassId, Tile};
use serde::{Deserialize, Serialize};

/// Ordered sequence of collected keys with a fixed slot count.
///
/// # Examples
///
/// ```
/// use level_mover::{ClassId, Inventory, Rect, Tile, TileKind};
///
/// let mut inventory = Inventory::new(1);
/// let key = Tile::new(TileKind::Key { class: ClassId(2) }, Rect::tile(0, 0, 60), 'g');
/// assert!(inventory.add(key.clone()));
/// assert!(!inventory.add(key));
/// assert!(inventory.has_class(ClassId(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    capacity: usize,
    items: Vec<Tile>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a key. Returns false, leaving the inventory untouched, when
    /// every slot is taken.
    pub fn add(&mut self, key: Tile) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(key);
        true
    }

    /// Whether any held key matches the class.
    pub fn has_class(&self, class: ClassId) -> bool {
        self.find_class(class).is_some()
    }

    /// First held key of the class.
    pub fn find_class(&self, class: ClassId) -> Option<&Tile> {
        self.items.iter().find(|item| item.class() == Some(class))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Held keys in pickup order.
    pub fn items(&self) -> &[Tile] {
        &self.items
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(crate::config::INVENTORY_SLOTS)
    }
}
