//! Swapquote Configuration
//!
//! Configuration management for the swap quote aggregation engine.

pub mod loader;
pub mod settings;

pub use loader::load_config;
pub use settings::{
	LogFormat, LoggingSettings, PricingSettings, ProviderSettings, Settings, TimeoutSettings,
};
