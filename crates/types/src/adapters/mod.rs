//! Adapter contract shared by all provider implementations

pub mod errors;
pub mod traits;

pub use errors::{AdapterError, AdapterResult};
pub use traits::ProviderAdapter;
