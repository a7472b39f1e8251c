//! Swapquote Types
//!
//! Shared models and traits for the swap quote aggregation engine.
//! This crate contains all domain models organized by business entity.

pub mod adapters;
pub mod models;
pub mod pricing;
pub mod providers;
pub mod quotes;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use quotes::{
	Quote, QuoteRequest, QuoteValidationError, QuoteValidationResult, RouteStep, StepKind,
};

pub use providers::{ProviderCategory, ProviderDescriptor};

pub use adapters::{AdapterError, AdapterResult, ProviderAdapter};

pub use pricing::PriceOracle;

// Re-export shared domain models
pub use models::{
	amount::{format_display_amount, from_smallest_unit, to_smallest_unit},
	Chain, ChainKind, Token,
};
