//! Swap Quote Aggregator Library
//!
//! Aggregates swap quotes across same-chain exchanges, cross-chain bridges,
//! and centralized-exchange rate sources, ranking the results by output
//! amount and always carrying an oracle-based fallback estimate.

use std::sync::Arc;
use tracing::info;

// Core domain types - the most commonly used types
pub use swapquote_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	format_display_amount,
	from_smallest_unit,
	to_smallest_unit,
	AdapterError,
	AdapterResult,
	Chain,
	ChainKind,
	PriceOracle,
	// Adapter trait
	ProviderAdapter,
	ProviderCategory,
	ProviderDescriptor,
	// Primary domain entities
	Quote,
	QuoteRequest,
	// Error types
	QuoteValidationError,
	RouteStep,
	StepKind,
	Token,
};

// Service layer
pub use swapquote_service::{
	AggregationStats, AggregatorService, HttpPriceOracle, PriceCache, ProviderCatalog,
};

// Adapters
pub use swapquote_adapters::{
	AdapterRegistry, BridgeAdapter, CexRateAdapter, ExchangeAdapter, FallbackEstimator,
	FALLBACK_PROVIDER_ID,
};

// Config
pub use swapquote_config::{load_config, Settings};

// Module aliases for direct access to each layer
pub mod models {
	pub use swapquote_types::*;
}

pub mod config {
	pub use swapquote_config::*;
}

pub mod adapters {
	pub use swapquote_adapters::*;
}

pub mod service {
	pub use swapquote_service::*;
}

// Re-export external dependencies for downstream integration code
pub use async_trait;

/// Builder pattern for configuring the aggregator
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	registry: Option<AdapterRegistry>,
	extra_adapters: Vec<Box<dyn ProviderAdapter>>,
	price_oracle: Option<Arc<dyn PriceOracle>>,
	fallback: Option<Box<dyn ProviderAdapter>>,
}

impl Default for AggregatorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AggregatorBuilder {
	pub fn new() -> Self {
		Self {
			settings: None,
			registry: None,
			extra_adapters: Vec::new(),
			price_oracle: None,
			fallback: None,
		}
	}

	/// Create a builder seeded from configuration
	pub fn from_config(settings: Settings) -> Self {
		Self::new().with_settings(settings)
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Use a pre-built adapter registry instead of constructing one from
	/// provider settings
	pub fn with_registry(mut self, registry: AdapterRegistry) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Register a custom adapter (uses the adapter's own descriptor ID)
	pub fn with_adapter(mut self, adapter: Box<dyn ProviderAdapter>) -> Self {
		self.extra_adapters.push(adapter);
		self
	}

	/// Override the price oracle used by rate adapters and the fallback
	pub fn with_price_oracle(mut self, oracle: Arc<dyn PriceOracle>) -> Self {
		self.price_oracle = Some(oracle);
		self
	}

	/// Override the fallback estimator
	pub fn with_fallback(mut self, fallback: Box<dyn ProviderAdapter>) -> Self {
		self.fallback = Some(fallback);
		self
	}

	/// Assemble the aggregation service
	///
	/// Fails on configuration errors: providers without endpoints, or a
	/// catalog entry with no matching adapter.
	pub fn build(self) -> Result<AggregatorService, Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();

		let oracle: Arc<dyn PriceOracle> = match self.price_oracle {
			Some(oracle) => oracle,
			None => Arc::new(HttpPriceOracle::from_settings(&settings.pricing)),
		};

		let mut registry = match self.registry {
			Some(registry) => registry,
			None => AdapterRegistry::from_settings(&settings, Arc::clone(&oracle))?,
		};
		for adapter in self.extra_adapters {
			registry.register(adapter);
		}

		let mut descriptors: Vec<ProviderDescriptor> = registry
			.get_all()
			.values()
			.map(|adapter| adapter.descriptor().clone())
			.collect();
		descriptors.sort_by(|a, b| a.id.cmp(&b.id));
		let catalog = ProviderCatalog::new(descriptors);

		let fallback = match self.fallback {
			Some(fallback) => fallback,
			None => Box::new(FallbackEstimator::new(Arc::clone(&oracle))),
		};

		let service = AggregatorService::new(
			catalog,
			Arc::new(registry),
			fallback,
			settings.timeouts.per_provider_ms,
		);
		service.validate_providers()?;

		info!(
			"Aggregator initialized with {} provider(s)",
			service.stats().total_providers
		);

		Ok(service)
	}
}

/// Initialize tracing with configuration-based settings
///
/// Respects `RUST_LOG` when set, falling back to the configured level.
pub fn init_tracing_from_settings(settings: &Settings) {
	use swapquote_config::settings::LogFormat;

	let log_level = &settings.logging.level;
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	match settings.logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
	}

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		settings.logging.level, settings.logging.format, settings.logging.structured
	);
}

/// Load environment, configuration, and tracing in one call
///
/// Convenience for binaries: reads `.env` if present, loads the config
/// file with defaults, and installs the tracing subscriber.
pub fn bootstrap() -> Settings {
	dotenvy::dotenv().ok();
	let settings = load_config().unwrap_or_default();
	init_tracing_from_settings(&settings);
	settings
}
