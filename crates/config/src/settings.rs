//! Configuration settings structures

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use swapquote_types::{ProviderCategory, ProviderDescriptor};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub providers: HashMap<String, ProviderSettings>,
	pub timeouts: TimeoutSettings,
	pub pricing: PricingSettings,
	pub logging: LoggingSettings,
}

/// Individual provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
	pub provider_id: String,
	pub category: ProviderCategory,
	/// Base URL for routing providers; unused by rate-only providers
	pub endpoint: Option<String>,
	pub supported_chain_ids: Vec<u64>,
	pub enabled: bool,
	/// Optional descriptive name
	pub name: Option<String>,
	/// Fee rate in basis points, for rate-only CEX-shaped providers
	pub fee_bps: Option<u32>,
	/// Reported completion estimate, for rate-only CEX-shaped providers
	pub estimated_time_seconds: Option<u64>,
	/// Custom HTTP headers for requests
	pub headers: Option<HashMap<String, String>>,
}

/// Convert from settings ProviderSettings to a catalog descriptor
impl From<&ProviderSettings> for ProviderDescriptor {
	fn from(settings: &ProviderSettings) -> Self {
		let mut descriptor = ProviderDescriptor::new(
			settings.provider_id.clone(),
			settings
				.name
				.clone()
				.unwrap_or_else(|| settings.provider_id.clone()),
			settings.category,
			HashSet::from_iter(settings.supported_chain_ids.iter().copied()),
		);
		descriptor.enabled = settings.enabled;
		descriptor
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Per-provider fetch timeout in milliseconds
	pub per_provider_ms: u64,
	/// Request timeout for HTTP clients
	pub request_ms: u64,
}

/// Price oracle configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PricingSettings {
	/// Spot price endpoint base URL
	pub endpoint: String,
	/// How long a cached spot price stays fresh
	pub cache_ttl_secs: u64,
	/// HTTP timeout for price lookups
	pub request_ms: u64,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			providers: HashMap::new(),
			timeouts: TimeoutSettings {
				per_provider_ms: 15_000,
				request_ms: 10_000,
			},
			pricing: PricingSettings {
				endpoint: "https://prices.swapquote.io/v1".to_string(),
				cache_ttl_secs: 30,
				request_ms: 5_000,
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

impl Settings {
	/// Get enabled providers only
	pub fn enabled_providers(&self) -> HashMap<String, ProviderSettings> {
		self.providers
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}
}
