//! Provider catalog and applicability filtering
//!
//! The catalog holds the immutable set of configured providers; the
//! applicability filter selects, per request, which of them are allowed to
//! quote. Filtering is pure and synchronous; no I/O happens here.

use tracing::debug;

use swapquote_config::Settings;
use swapquote_types::{ProviderCategory, ProviderDescriptor, QuoteRequest};

/// Static registry of configured providers
///
/// Loaded once at startup; iteration preserves registration order so the
/// fan-out launch order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
	providers: Vec<ProviderDescriptor>,
}

impl ProviderCatalog {
	pub fn new(providers: Vec<ProviderDescriptor>) -> Self {
		Self { providers }
	}

	/// Build the catalog from configuration, sorted by provider ID for a
	/// stable launch order independent of map iteration
	pub fn from_settings(settings: &Settings) -> Self {
		let mut providers: Vec<ProviderDescriptor> =
			settings.providers.values().map(ProviderDescriptor::from).collect();
		providers.sort_by(|a, b| a.id.cmp(&b.id));
		Self::new(providers)
	}

	pub fn all(&self) -> &[ProviderDescriptor] {
		&self.providers
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	/// Select the providers eligible to quote this request
	///
	/// Rules, evaluated per provider:
	/// 1. disabled providers are never eligible;
	/// 2. same-chain exchanges are eligible for same-chain requests on a
	///    supported chain, and never for cross-chain requests;
	/// 3. bridges and CEX sources must support both the source and the
	///    destination chain (for a same-chain request this degenerates to
	///    supporting one chain).
	pub fn applicable_providers(&self, request: &QuoteRequest) -> Vec<&ProviderDescriptor> {
		let is_cross_chain = request.is_cross_chain();
		let input_chain = request.input_chain.id;
		let output_chain = request.output_chain.id;

		let applicable: Vec<&ProviderDescriptor> = self
			.providers
			.iter()
			.filter(|provider| {
				if !provider.enabled {
					return false;
				}
				match provider.category {
					ProviderCategory::SameChainExchange => {
						!is_cross_chain && provider.supports_chain(input_chain)
					},
					ProviderCategory::Bridge | ProviderCategory::Cex => {
						provider.supports_chain(input_chain) && provider.supports_chain(output_chain)
					},
				}
			})
			.collect();

		debug!(
			"{} of {} providers applicable for {} -> {} (cross-chain: {})",
			applicable.len(),
			self.providers.len(),
			input_chain,
			output_chain,
			is_cross_chain
		);

		applicable
	}
}
