//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ScoreRecordReader` - Scored responses and session counts
//! - `AccessChecker` - Membership-based access to full insights

mod access_checker;
mod score_record_reader;

pub use access_checker::{
    full_insights_access, AccessChecker, AccessDeniedReason, AccessResult, FULL_INSIGHTS_FEATURE,
};
pub use score_record_reader::ScoreRecordReader;
