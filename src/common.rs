use serde::{Deserialize, Serialize};

/// A single operation to run against an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Add units of an item, replacing its unit price.
    Add {
        /// The item name.
        name: String,
        /// Units to add.
        quantity: u64,
        /// The new unit price.
        price: f64,
    },
    /// Remove units of an item.
    Remove {
        /// The item name.
        name: String,
        /// Units to remove.
        quantity: u64,
    },
    /// Get the total inventory value.
    Total,
    /// Get the name of the item with the highest unit price.
    MostExpensive,
    /// List items at or below a quantity threshold.
    LowStock {
        /// Inclusive quantity threshold. A negative threshold matches
        /// nothing.
        threshold: i64,
    },
}

/// The result of a `Request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// The item was added.
    Added,
    /// Whether the item was tracked when removal was requested.
    Removed(bool),
    /// Total inventory value.
    Total(f64),
    /// Most expensive item, or `None` for an empty inventory.
    MostExpensive(Option<String>),
    /// Alphabetically sorted low-stock item names.
    LowStock(Vec<String>),
}
