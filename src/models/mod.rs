//! Data models for the Smart Price Tracker.
//!
//! Field names match the persisted JSON document exactly, so the store file
//! is interchangeable with the one the dashboard always used.

mod datastore;
mod history;
mod product;
mod stats;

pub use datastore::*;
pub use history::*;
pub use product::*;
pub use stats::*;
