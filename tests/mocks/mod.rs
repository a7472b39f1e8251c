//! Centralized mocks and fixtures for testing
//!
//! Reusable mock adapters, oracles, and request fixtures shared across
//! integration test files.

pub mod adapters;
pub mod entities;
pub mod oracles;

#[allow(unused_imports)]
pub use adapters::MockAdapter;
#[allow(unused_imports)]
pub use oracles::FixedPriceOracle;
