use std::collections::hash_map::{self, Entry};
use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

/// The stored quantity and unit price of one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Units currently held.
    pub quantity: u64,
    /// Unit price, as last set by `add_item`.
    pub price: f64,
}

impl ItemRecord {
    /// Returns the value of this record: quantity times unit price.
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

impl fmt::Display for ItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.2}", self.quantity, self.price)
    }
}

/// An in-memory inventory of named items.
///
/// Each name maps to exactly one `ItemRecord`. A record is created by the
/// first `add_item` for its name and deleted as soon as `remove_item`
/// takes away everything it holds.
#[derive(Debug, Default, Clone)]
pub struct InventoryTracker {
    items: HashMap<String, ItemRecord>,
}

impl InventoryTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `name` at unit price `price`.
    ///
    /// If the item is already tracked its quantity is increased and its
    /// price replaced by `price`.
    pub fn add_item(&mut self, name: impl Into<String>, quantity: u64, price: f64) {
        match self.items.entry(name.into()) {
            Entry::Occupied(mut e) => {
                let record = e.get_mut();
                record.quantity = record.quantity.saturating_add(quantity);
                record.price = price;
                debug!("Updated {}: {}", e.key(), e.get());
            }
            Entry::Vacant(e) => {
                debug!("Added {}: {} @ {:.2}", e.key(), quantity, price);
                e.insert(ItemRecord { quantity, price });
            }
        }
    }

    /// Removes `quantity` units of `name`.
    ///
    /// Returns `false` if the item is not tracked. When the removal takes
    /// the quantity to zero or below, the item is dropped entirely.
    pub fn remove_item(&mut self, name: &str, quantity: u64) -> bool {
        let Some(record) = self.items.get_mut(name) else {
            debug!("Remove of untracked item {}", name);
            return false;
        };

        if quantity >= record.quantity {
            self.items.remove(name);
            debug!("Removed {} entirely", name);
        } else {
            record.quantity -= quantity;
            debug!("Removed {} of {}, {} left", quantity, name, record.quantity);
        }
        true
    }

    /// Returns the total value of the inventory.
    pub fn total(&self) -> f64 {
        // Fold from positive zero so an empty inventory never reports -0.0.
        self.items
            .values()
            .fold(0.0, |total, record| total + record.value())
    }

    /// Returns the name of the item with the highest unit price, or `None`
    /// if no items are tracked.
    ///
    /// Items sharing the highest price resolve to the alphabetically first
    /// name.
    pub fn most_expensive(&self) -> Option<&str> {
        self.items
            .iter()
            .max_by(|(a_name, a), (b_name, b)| {
                a.price
                    .total_cmp(&b.price)
                    .then_with(|| b_name.cmp(a_name))
            })
            .map(|(name, _)| name.as_str())
    }

    /// Returns the names of all items with a quantity at or below
    /// `threshold`, sorted alphabetically.
    pub fn low_stock(&self, threshold: u64) -> Vec<String> {
        let mut names: Vec<String> = self
            .items
            .iter()
            .filter(|(_, record)| record.quantity <= threshold)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Returns the record for `name`, if tracked.
    pub fn get(&self, name: &str) -> Option<&ItemRecord> {
        self.items.get(name)
    }

    /// Returns the number of tracked items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are tracked.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over tracked items in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.items.iter(),
        }
    }
}

/// Iterator over `(name, record)` pairs of an `InventoryTracker`.
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, ItemRecord>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a ItemRecord);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, record)| (name.as_str(), record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a InventoryTracker {
    type Item = (&'a str, &'a ItemRecord);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
