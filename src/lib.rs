#![deny(missing_docs)]

//! An in-memory inventory tracker.
//!
//! This library tracks named items with a quantity and a unit price,
//! and answers total-value, most-expensive and low-stock queries.
//! A `Session` drives a tracker from a stream of JSON requests.

mod common;
mod error;
mod session;
mod tracker;

pub use common::{Request, Response};
pub use error::{InventoryError, Result};
pub use session::Session;
pub use tracker::{InventoryTracker, ItemRecord, Iter};
