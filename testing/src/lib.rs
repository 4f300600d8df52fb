//! # Courtside Testing
//!
//! Ergonomic testing utilities for reducers: a fluent Given-When-Then API
//! plus assertion helpers for effect lists.


pub use reducer_test::{ReducerTest, assertions};
