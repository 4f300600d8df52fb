//! # Courtside Core
//!
//! Core traits and types for the Courtside reservation workflow.
//!
//! This crate provides the fundamental abstractions for building the
//! event-driven booking front-end using the Reducer pattern:
//!
//! - **State**: Domain state for a feature (catalog, availability, per-court panels)
//! - **Action**: All possible inputs to a reducer (user intents and async completions)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! All mutation happens synchronously inside the reducer; suspension only
//! occurs at effect boundaries (network calls and the debounce timer). The
//! only cross-suspension discipline required of reducers is the monotonic
//! sequence-token pattern for discarding superseded completions.

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::SmallVec;

pub mod effect;
pub mod environment;
pub mod reducer;
