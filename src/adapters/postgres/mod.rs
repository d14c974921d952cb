//! PostgreSQL adapters - Database implementations for reader ports.
//!
//! - `PostgresScoreRecordReader` - Scored responses and completed sessions
//! - `PostgresAccessChecker` - Membership-based access to full insights

mod access_checker_impl;
mod score_record_reader;

pub use access_checker_impl::PostgresAccessChecker;
pub use score_record_reader::PostgresScoreRecordReader;
