//! HTTP client cache for optimized connection management
//!
//! Provides per-provider client instances with connection pooling and
//! keep-alive optimization.

use dashmap::DashMap;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use swapquote_types::{AdapterError, AdapterResult};
use tracing::{debug, warn};

/// Configuration for creating optimized HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Base endpoint for the provider
	pub base_url: String,
	/// Provider identifier for cache differentiation
	pub provider_id: String,
	/// HTTP request timeout
	pub request_timeout_ms: u64,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
	/// Additional headers (for API keys, etc.)
	pub headers: Vec<(String, String)>,
}

impl ClientConfig {
	pub fn new(provider_id: &str, base_url: &str, request_timeout_ms: u64) -> Self {
		Self {
			base_url: base_url.to_string(),
			provider_id: provider_id.to_string(),
			request_timeout_ms,
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
			headers: vec![
				("User-Agent".to_string(), "Swapquote-Aggregator/1.0".to_string()),
				("Accept".to_string(), "application/json".to_string()),
			],
		}
	}

	pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
		self.headers.extend(headers);
		self
	}
}

/// Cached client with creation timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache for HTTP clients keyed per provider configuration,
/// with TTL-based recycling
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a new client cache with default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	/// Create a new client cache with custom TTL
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create an optimized client for the given configuration
	pub fn get_client(&self, config: &ClientConfig) -> AdapterResult<Arc<Client>> {
		// Atomic check and potential removal of an expired client
		self.clients.remove_if(config, |_, cached| {
			let is_expired = cached.is_expired(self.ttl);
			if is_expired {
				warn!(
					"Client cache expired for {} (age: {:?}), will create new client",
					config.base_url,
					cached.created_at.elapsed()
				);
			}
			is_expired
		});

		if let Some(cached_ref) = self.clients.get(config) {
			let cached = cached_ref.value();
			debug!(
				"Reusing cached client for {} (age: {:?})",
				config.base_url,
				cached.created_at.elapsed()
			);
			return Ok(cached.client.clone());
		}

		debug!("Creating new optimized client for {}", config.base_url);
		let client = self.create_optimized_client(config)?;
		let cached = CachedClient::new(client);
		let client_arc = cached.client.clone();

		// Entry API keeps concurrent creation races atomic
		use dashmap::mapref::entry::Entry;

		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => {
				debug!(
					"Another thread created client for {}, using existing",
					config.base_url
				);
				Ok(entry.get().client.clone())
			},
			Entry::Vacant(entry) => {
				entry.insert(cached);
				Ok(client_arc)
			},
		}
	}

	/// Create an optimized HTTP client for the given configuration
	fn create_optimized_client(&self, config: &ClientConfig) -> AdapterResult<Client> {
		let mut builder = ClientBuilder::new()
			.timeout(Duration::from_millis(config.request_timeout_ms))
			.pool_max_idle_per_host(config.max_idle_per_host)
			.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
			.tcp_keepalive(Duration::from_secs(60));

		let mut header_map = reqwest::header::HeaderMap::new();
		for (key, value) in &config.headers {
			if let (Ok(header_name), Ok(header_value)) = (
				reqwest::header::HeaderName::from_bytes(key.as_bytes()),
				reqwest::header::HeaderValue::from_str(value),
			) {
				header_map.insert(header_name, header_value);
			}
		}
		builder = builder.default_headers(header_map);

		builder.build().map_err(AdapterError::HttpError)
	}

	/// Remove all expired clients from the cache
	pub fn cleanup_expired(&self) -> usize {
		let mut removed_count = 0;

		self.clients.retain(|config, cached| {
			let is_expired = cached.is_expired(self.ttl);
			if is_expired {
				removed_count += 1;
				debug!(
					"Removed expired client for {} (age: {:?})",
					config.base_url,
					cached.created_at.elapsed()
				);
			}
			!is_expired
		});

		removed_count
	}

	/// Clear the cache (useful for testing)
	pub fn clear(&self) {
		self.clients.clear();
	}

	/// Get the configured TTL duration
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Convenience constructor for adapter implementations, sharing the
	/// process-wide cache
	pub fn for_adapter() -> Self {
		global_client_cache().clone()
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

lazy_static::lazy_static! {
	static ref GLOBAL_CLIENT_CACHE: ClientCache = ClientCache::new();
}

/// Get the global client cache instance
pub fn global_client_cache() -> &'static ClientCache {
	&GLOBAL_CLIENT_CACHE
}
