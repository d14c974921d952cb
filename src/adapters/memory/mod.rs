//! In-memory adapters for development and tests.
//!
//! - `InMemoryScoreStore` - Append-only score records and completed sessions

mod in_memory_score_store;

pub use in_memory_score_store::InMemoryScoreStore;
