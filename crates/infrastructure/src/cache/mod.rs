//! Cache implementations
//!
//! - `MokaSelectionStore`: short-lived pending stop selections with TTL

mod moka_selection_store;

pub use moka_selection_store::{MokaSelectionStore, SelectionStoreConfig};
