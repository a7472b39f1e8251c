//! Swapquote Adapters
//!
//! Provider-specific adapters for the swap quote aggregation engine. Each
//! adapter binds one upstream pricing source's wire contract; the registry
//! is the closed, tagged set through which the orchestrator reaches them.

pub mod bridge_adapter;
pub mod cex_rate_adapter;
pub mod client_cache;
pub mod exchange_adapter;
pub mod fallback;

pub use bridge_adapter::BridgeAdapter;
pub use cex_rate_adapter::CexRateAdapter;
pub use client_cache::{ClientCache, ClientConfig};
pub use exchange_adapter::ExchangeAdapter;
pub use fallback::{FallbackEstimator, FALLBACK_PROVIDER_ID};
pub use swapquote_types::{AdapterError, AdapterResult, ProviderAdapter};

use std::collections::HashMap;
use std::sync::Arc;

use swapquote_config::Settings;
use swapquote_types::{PriceOracle, ProviderCategory, ProviderDescriptor};

/// Registry of provider adapters keyed by provider ID
///
/// Provider behavior is dispatched through this closed set of registered
/// implementations; there is no runtime reflection.
#[derive(Debug, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<String, Box<dyn ProviderAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self {
			adapters: HashMap::new(),
		}
	}

	/// Build adapters for every enabled provider in the settings
	///
	/// Routing categories (exchange, bridge) become HTTP adapters against
	/// the configured endpoint; the CEX category becomes a rate-only
	/// adapter over the price oracle.
	pub fn from_settings(
		settings: &Settings,
		oracle: Arc<dyn PriceOracle>,
	) -> AdapterResult<Self> {
		let mut registry = Self::new();

		for provider in settings.enabled_providers().values() {
			let descriptor = ProviderDescriptor::from(provider);
			let headers: Vec<(String, String)> = provider
				.headers
				.clone()
				.map(|h| h.into_iter().collect())
				.unwrap_or_default();

			let adapter: Box<dyn ProviderAdapter> = match provider.category {
				ProviderCategory::SameChainExchange => {
					let endpoint = Self::require_endpoint(provider.endpoint.as_deref(), &descriptor)?;
					Box::new(
						ExchangeAdapter::new(descriptor, endpoint, settings.timeouts.request_ms)
							.with_headers(headers),
					)
				},
				ProviderCategory::Bridge => {
					let endpoint = Self::require_endpoint(provider.endpoint.as_deref(), &descriptor)?;
					Box::new(
						BridgeAdapter::new(descriptor, endpoint, settings.timeouts.request_ms)
							.with_headers(headers),
					)
				},
				ProviderCategory::Cex => Box::new(CexRateAdapter::new(
					descriptor,
					Arc::clone(&oracle),
					provider.fee_bps.unwrap_or(0),
					provider.estimated_time_seconds.unwrap_or(600),
				)),
			};

			registry.register(adapter);
		}

		Ok(registry)
	}

	fn require_endpoint(
		endpoint: Option<&str>,
		descriptor: &ProviderDescriptor,
	) -> AdapterResult<String> {
		endpoint
			.map(str::to_string)
			.ok_or_else(|| AdapterError::ConfigError {
				reason: format!("provider '{}' has no endpoint configured", descriptor.id),
			})
	}

	/// Register an adapter under its own provider ID
	pub fn register(&mut self, adapter: Box<dyn ProviderAdapter>) {
		self.adapters.insert(adapter.id().to_string(), adapter);
	}

	pub fn get(&self, id: &str) -> Option<&dyn ProviderAdapter> {
		self.adapters.get(id).map(Box::as_ref)
	}

	pub fn get_all(&self) -> &HashMap<String, Box<dyn ProviderAdapter>> {
		&self.adapters
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}
