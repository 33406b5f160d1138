//! This module provides reusable test utilities:
//! - Temporary on-disk datastores
//! - Row builders for the tracked tables
//! - Helpers to run a listener on an ephemeral port

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod test_data;
pub mod test_datastore;
pub mod test_listener;

// Re-export commonly used items
pub use test_data::*;
pub use test_datastore::TestDatastore;
pub use test_listener::TestListener;
