//! Provider catalog entries

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category of an external pricing source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderCategory {
	/// Same-chain exchange aggregator; routes swaps within one chain only
	SameChainExchange,
	/// Cross-chain bridge aggregator
	Bridge,
	/// Centralized-exchange rate source (rate-only, no routing API)
	Cex,
}

/// Static catalog entry describing one provider
///
/// Descriptors are configuration data loaded once at process start; the
/// engine never mutates them at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderDescriptor {
	/// Unique provider identifier (e.g., "dexroute", "omnibridge")
	pub id: String,
	/// Human-readable name
	pub name: String,
	/// Provider category, drives applicability filtering
	pub category: ProviderCategory,
	/// Chain IDs this provider can quote on
	pub supported_chain_ids: HashSet<u64>,
	/// Disabled providers are never queried
	pub enabled: bool,
}

impl ProviderDescriptor {
	pub fn new(
		id: String,
		name: String,
		category: ProviderCategory,
		supported_chain_ids: HashSet<u64>,
	) -> Self {
		Self {
			id,
			name,
			category,
			supported_chain_ids,
			enabled: true,
		}
	}

	pub fn supports_chain(&self, chain_id: u64) -> bool {
		self.supported_chain_ids.contains(&chain_id)
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}
}
