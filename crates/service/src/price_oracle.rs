//! HTTP price oracle with an injected TTL cache
//!
//! The cache is an explicitly owned component passed into the oracle, not
//! ambient module-level state; adapters see only the [`PriceOracle`] trait.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use swapquote_config::PricingSettings;
use swapquote_types::{PriceOracle, Token};

/// Cached spot price with its fetch timestamp
#[derive(Debug, Clone, Copy)]
struct CachedPrice {
	price_usd: f64,
	fetched_at: Instant,
}

/// TTL cache for spot prices, keyed by (chain, token address)
///
/// Expired entries are evicted on read; a `cleanup_expired` sweep exists
/// for owners that want to bound memory between reads.
#[derive(Debug, Clone)]
pub struct PriceCache {
	entries: Arc<DashMap<(u64, String), CachedPrice>>,
	ttl: Duration,
}

impl PriceCache {
	pub fn new(ttl: Duration) -> Self {
		Self {
			entries: Arc::new(DashMap::new()),
			ttl,
		}
	}

	pub fn get(&self, chain_id: u64, address: &str) -> Option<f64> {
		let key = (chain_id, address.to_lowercase());
		self.entries.remove_if(&key, |_, cached| {
			cached.fetched_at.elapsed() > self.ttl
		});
		self.entries.get(&key).map(|cached| cached.price_usd)
	}

	pub fn insert(&self, chain_id: u64, address: &str, price_usd: f64) {
		self.entries.insert(
			(chain_id, address.to_lowercase()),
			CachedPrice {
				price_usd,
				fetched_at: Instant::now(),
			},
		);
	}

	/// Evict every expired entry, returning how many were removed
	pub fn cleanup_expired(&self) -> usize {
		let before = self.entries.len();
		self.entries
			.retain(|_, cached| cached.fetched_at.elapsed() <= self.ttl);
		before - self.entries.len()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Spot price endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpotPriceResponse {
	price_usd: f64,
}

/// Price oracle backed by an HTTP spot-price endpoint
#[derive(Debug)]
pub struct HttpPriceOracle {
	endpoint: String,
	client: reqwest::Client,
	cache: PriceCache,
}

impl HttpPriceOracle {
	/// Create an oracle from pricing settings with a cache it owns
	pub fn from_settings(settings: &PricingSettings) -> Self {
		let cache = PriceCache::new(Duration::from_secs(settings.cache_ttl_secs));
		Self::new(settings.endpoint.clone(), settings.request_ms, cache)
	}

	/// Create an oracle with an injected cache
	pub fn new(endpoint: String, request_timeout_ms: u64, cache: PriceCache) -> Self {
		let client = reqwest::Client::builder()
			.timeout(Duration::from_millis(request_timeout_ms))
			.build()
			.unwrap_or_default();

		Self {
			endpoint,
			client,
			cache,
		}
	}

	async fn fetch_price(&self, chain_id: u64, token: &Token) -> Option<f64> {
		let url = format!("{}/spot", self.endpoint);
		let chain = chain_id.to_string();
		// Native assets are priced by symbol, contracts by address
		let lookup = if token.is_native() {
			token.symbol.as_str()
		} else {
			token.address.as_str()
		};

		let response = self
			.client
			.get(&url)
			.query(&[("chainId", chain.as_str()), ("token", lookup)])
			.send()
			.await;

		let response = match response {
			Ok(r) if r.status().is_success() => r,
			Ok(r) => {
				warn!(
					"Price endpoint returned status {} for {} on chain {}",
					r.status(),
					token.symbol,
					chain_id
				);
				return None;
			},
			Err(e) => {
				warn!(
					"Price lookup failed for {} on chain {}: {}",
					token.symbol, chain_id, e
				);
				return None;
			},
		};

		match response.json::<SpotPriceResponse>().await {
			Ok(body) if body.price_usd.is_finite() && body.price_usd > 0.0 => Some(body.price_usd),
			Ok(body) => {
				warn!(
					"Price endpoint returned unusable price {} for {} on chain {}",
					body.price_usd, token.symbol, chain_id
				);
				None
			},
			Err(e) => {
				warn!(
					"Failed to parse price response for {} on chain {}: {}",
					token.symbol, chain_id, e
				);
				None
			},
		}
	}
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
	async fn spot_price_usd(&self, chain_id: u64, token: &Token) -> Option<f64> {
		if let Some(price) = self.cache.get(chain_id, &token.address) {
			debug!(
				"Price cache hit for {} on chain {}: {}",
				token.symbol, chain_id, price
			);
			return Some(price);
		}

		let price = self.fetch_price(chain_id, token).await?;
		self.cache.insert(chain_id, &token.address, price);
		Some(price)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cache_hit_and_miss() {
		let cache = PriceCache::new(Duration::from_secs(60));
		assert_eq!(cache.get(1, "0xabc"), None);

		cache.insert(1, "0xabc", 1.0);
		assert_eq!(cache.get(1, "0xabc"), Some(1.0));
		assert_eq!(cache.get(56, "0xabc"), None);
	}

	#[test]
	fn test_cache_key_is_case_insensitive() {
		let cache = PriceCache::new(Duration::from_secs(60));
		cache.insert(1, "0xABCDEF", 2.5);
		assert_eq!(cache.get(1, "0xabcdef"), Some(2.5));
	}

	#[test]
	fn test_cache_expires_on_read() {
		let cache = PriceCache::new(Duration::from_millis(0));
		cache.insert(1, "0xabc", 1.0);

		// Zero TTL means the entry is already stale
		std::thread::sleep(Duration::from_millis(5));
		assert_eq!(cache.get(1, "0xabc"), None);
		assert!(cache.is_empty());
	}

	#[test]
	fn test_cleanup_expired() {
		let cache = PriceCache::new(Duration::from_millis(0));
		cache.insert(1, "0xabc", 1.0);
		cache.insert(1, "0xdef", 2.0);

		std::thread::sleep(Duration::from_millis(5));
		assert_eq!(cache.cleanup_expired(), 2);
		assert!(cache.is_empty());
	}
}
