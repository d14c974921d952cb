//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` - Score records and memberships in PostgreSQL
//! - `memory` - In-memory score store for tests and local runs
//! - `membership` - Stub access checker
//! - `http` - Axum routes for the insights API

pub mod http;
pub mod membership;
pub mod memory;
pub mod postgres;

pub use membership::StubAccessChecker;
pub use memory::InMemoryScoreStore;
pub use postgres::{PostgresAccessChecker, PostgresScoreRecordReader};
