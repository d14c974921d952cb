//! Membership adapters - implementations of membership-related ports.
//!
//! - `StubAccessChecker` - Development/testing stub with a fixed tier

mod stub_access_checker;

pub use stub_access_checker::StubAccessChecker;
