//! Core aggregation service logic
//!
//! Fans a validated request out to every applicable provider adapter plus
//! the fallback estimator, bounds each fetch with its own timeout, then
//! ranks whatever came back.

use futures::stream::{FuturesUnordered, StreamExt};
use std::cmp::Ordering;
use std::sync::Arc;
use swapquote_adapters::AdapterRegistry;
use swapquote_types::{
	ProviderAdapter, Quote, QuoteRequest, QuoteValidationError,
};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::catalog::ProviderCatalog;

/// Service aggregating quotes from multiple providers
///
/// Stateless per request: the only data held across requests is the
/// immutable catalog and registry, so one instance serves unrelated
/// requests concurrently without interference.
pub struct AggregatorService {
	catalog: ProviderCatalog,
	registry: Arc<AdapterRegistry>,
	fallback: Box<dyn ProviderAdapter>,
	per_provider_timeout_ms: u64,
}

impl AggregatorService {
	pub fn new(
		catalog: ProviderCatalog,
		registry: Arc<AdapterRegistry>,
		fallback: Box<dyn ProviderAdapter>,
		per_provider_timeout_ms: u64,
	) -> Self {
		Self {
			catalog,
			registry,
			fallback,
			per_provider_timeout_ms,
		}
	}

	/// Validate that every catalog provider has a matching adapter
	pub fn validate_providers(&self) -> Result<(), String> {
		for provider in self.catalog.all() {
			if provider.enabled && self.registry.get(&provider.id).is_none() {
				return Err(format!(
					"Provider '{}' has no registered adapter",
					provider.id
				));
			}
		}
		Ok(())
	}

	/// Fetch, rank, and flag quotes for one request
	///
	/// The only error raised is request validation; provider failures are
	/// contained here and an all-providers-down request yields an empty
	/// list, which callers render as "no route available".
	pub async fn get_quotes(
		&self,
		request: &QuoteRequest,
	) -> Result<Vec<Quote>, QuoteValidationError> {
		request.validate()?;

		let applicable = self.catalog.applicable_providers(request);
		info!(
			"Fetching quotes from {} applicable providers (of {}) plus fallback",
			applicable.len(),
			self.catalog.len()
		);

		// Adapter futures are driven inside this future rather than spawned,
		// so dropping the aggregation cancels every in-flight provider call.
		let mut fetches = FuturesUnordered::new();
		for provider in &applicable {
			match self.registry.get(&provider.id) {
				Some(adapter) => fetches.push(self.fetch_one(adapter, request)),
				None => warn!("No adapter registered for provider {}", provider.id),
			}
		}
		// The fallback estimator joins every fan-out regardless of filtering
		fetches.push(self.fetch_one(self.fallback.as_ref(), request));

		// Collect in completion order; each inner race has its own timeout,
		// so one hung provider delays nothing beyond its own slot.
		let mut quotes = Vec::new();
		while let Some(result) = fetches.next().await {
			if let Some(quote) = result {
				quotes.push(quote);
			}
		}

		Ok(Self::rank(quotes))
	}

	/// Convenience wrapper returning only the top-ranked quote
	pub async fn get_best_quote(
		&self,
		request: &QuoteRequest,
	) -> Result<Option<Quote>, QuoteValidationError> {
		let mut quotes = self.get_quotes(request).await?;
		if quotes.is_empty() {
			Ok(None)
		} else {
			Ok(Some(quotes.remove(0)))
		}
	}

	/// Run one adapter fetch under the per-provider timeout, downgrading
	/// every failure mode to absence
	async fn fetch_one(
		&self,
		adapter: &dyn ProviderAdapter,
		request: &QuoteRequest,
	) -> Option<Quote> {
		let provider_id = adapter.id().to_string();
		debug!("Starting quote fetch from provider {}", provider_id);

		let per_provider = Duration::from_millis(self.per_provider_timeout_ms);
		match timeout(per_provider, adapter.fetch_quote(request)).await {
			Ok(Ok(quote)) => {
				info!(
					"Provider {} quoted {} {} for {} {}",
					provider_id,
					quote.output_amount,
					request.output_token.symbol,
					quote.input_amount,
					request.input_token.symbol
				);
				Some(quote)
			},
			Ok(Err(e)) => {
				warn!("Provider {} returned error: {}", provider_id, e);
				None
			},
			Err(_) => {
				warn!(
					"Provider {} timed out after {}ms",
					provider_id, self.per_provider_timeout_ms
				);
				None
			},
		}
	}

	/// Rank collected quotes descending by output amount
	///
	/// Output amount of the requested asset is the sole ranking key. The
	/// sort is stable, so quotes with equal outputs keep their completion
	/// order: first resolved wins the lower index. Exactly the top quote
	/// gets the best-rate flag.
	fn rank(mut quotes: Vec<Quote>) -> Vec<Quote> {
		quotes.retain(|quote| {
			let usable = quote.output_amount_value() > 0.0;
			if !usable {
				warn!(
					"Discarding quote from {} with non-positive output '{}'",
					quote.provider_id, quote.output_amount
				);
			}
			usable
		});

		quotes.sort_by(|a, b| {
			b.output_amount_value()
				.partial_cmp(&a.output_amount_value())
				.unwrap_or(Ordering::Equal)
		});

		if let Some(best) = quotes.first_mut() {
			best.is_best_rate = true;
		}

		quotes
	}

	/// Get aggregation statistics
	pub fn stats(&self) -> AggregationStats {
		AggregationStats {
			total_providers: self.catalog.len(),
			registered_adapters: self.registry.len(),
			per_provider_timeout_ms: self.per_provider_timeout_ms,
		}
	}
}

/// Aggregation service statistics
#[derive(Debug, Clone)]
pub struct AggregationStats {
	pub total_providers: usize,
	pub registered_adapters: usize,
	pub per_provider_timeout_ms: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use std::collections::HashSet;
	use swapquote_types::{
		AdapterError, AdapterResult, Chain, ProviderCategory, ProviderDescriptor, Token,
	};

	/// Configurable in-process adapter: fixed output, optional delay,
	/// optional failure
	#[derive(Debug)]
	struct StubAdapter {
		descriptor: ProviderDescriptor,
		output_amount: Option<String>,
		delay_ms: u64,
	}

	impl StubAdapter {
		fn quoting(id: &str, category: ProviderCategory, output_amount: &str) -> Self {
			Self {
				descriptor: ProviderDescriptor::new(
					id.to_string(),
					id.to_string(),
					category,
					HashSet::from([1, 56]),
				),
				output_amount: Some(output_amount.to_string()),
				delay_ms: 0,
			}
		}

		fn failing(id: &str, category: ProviderCategory) -> Self {
			Self {
				descriptor: ProviderDescriptor::new(
					id.to_string(),
					id.to_string(),
					category,
					HashSet::from([1, 56]),
				),
				output_amount: None,
				delay_ms: 0,
			}
		}

		fn with_delay(mut self, delay_ms: u64) -> Self {
			self.delay_ms = delay_ms;
			self
		}
	}

	#[async_trait]
	impl ProviderAdapter for StubAdapter {
		fn descriptor(&self) -> &ProviderDescriptor {
			&self.descriptor
		}

		async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
			if self.delay_ms > 0 {
				tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
			}
			match &self.output_amount {
				Some(amount) => Ok(Quote::new(
					self.descriptor.id.clone(),
					request.input_amount.clone(),
					amount.clone(),
					amount.clone(),
					1.0,
				)),
				None => Err(AdapterError::InvalidResponse {
					reason: "stubbed failure".to_string(),
				}),
			}
		}
	}

	fn service_with(
		adapters: Vec<StubAdapter>,
		fallback: StubAdapter,
		timeout_ms: u64,
	) -> AggregatorService {
		let catalog =
			ProviderCatalog::new(adapters.iter().map(|a| a.descriptor.clone()).collect());
		let mut registry = AdapterRegistry::new();
		for adapter in adapters {
			registry.register(Box::new(adapter));
		}
		AggregatorService::new(catalog, Arc::new(registry), Box::new(fallback), timeout_ms)
	}

	fn request() -> QuoteRequest {
		QuoteRequest::new(
			Token::usdc_ethereum(),
			Token::bnb(),
			Chain::ethereum(),
			Chain::bsc(),
			"100".to_string(),
		)
	}

	#[tokio::test]
	async fn test_ranking_descending_with_single_best_flag() {
		let service = service_with(
			vec![
				StubAdapter::quoting("low", ProviderCategory::Bridge, "0.29"),
				StubAdapter::quoting("high", ProviderCategory::Bridge, "0.31"),
				StubAdapter::quoting("mid", ProviderCategory::Cex, "0.305"),
			],
			StubAdapter::failing("price-estimate", ProviderCategory::Cex),
			1_000,
		);

		let quotes = service.get_quotes(&request()).await.unwrap();

		let ids: Vec<&str> = quotes.iter().map(|q| q.provider_id.as_str()).collect();
		assert_eq!(ids, vec!["high", "mid", "low"]);
		assert!(quotes[0].is_best_rate);
		assert_eq!(quotes.iter().filter(|q| q.is_best_rate).count(), 1);
	}

	#[tokio::test]
	async fn test_tie_break_keeps_completion_order() {
		// Equal outputs: the slower provider resolves second and must rank
		// second, regardless of IDs or launch order.
		let service = service_with(
			vec![
				StubAdapter::quoting("slow-equal", ProviderCategory::Bridge, "0.31")
					.with_delay(80),
				StubAdapter::quoting("fast-equal", ProviderCategory::Bridge, "0.31"),
			],
			StubAdapter::failing("price-estimate", ProviderCategory::Cex),
			1_000,
		);

		let quotes = service.get_quotes(&request()).await.unwrap();

		assert_eq!(quotes.len(), 2);
		assert_eq!(quotes[0].provider_id, "fast-equal");
		assert_eq!(quotes[1].provider_id, "slow-equal");
		assert!(quotes[0].is_best_rate);
		assert!(!quotes[1].is_best_rate);
	}

	#[tokio::test]
	async fn test_hung_provider_is_dropped_without_stalling_batch() {
		let service = service_with(
			vec![
				StubAdapter::quoting("hung", ProviderCategory::Bridge, "9.99").with_delay(60_000),
				StubAdapter::quoting("alive", ProviderCategory::Bridge, "0.31"),
			],
			StubAdapter::failing("price-estimate", ProviderCategory::Cex),
			150,
		);

		let started = std::time::Instant::now();
		let quotes = service.get_quotes(&request()).await.unwrap();
		let elapsed = started.elapsed();

		assert_eq!(quotes.len(), 1);
		assert_eq!(quotes[0].provider_id, "alive");
		// One per-provider timeout plus a small constant, not timeout x N
		assert!(elapsed < Duration::from_millis(600), "took {:?}", elapsed);
	}

	#[tokio::test]
	async fn test_total_miss_yields_empty_list_not_error() {
		let service = service_with(
			vec![
				StubAdapter::failing("a", ProviderCategory::Bridge),
				StubAdapter::failing("b", ProviderCategory::Cex),
			],
			StubAdapter::failing("price-estimate", ProviderCategory::Cex),
			200,
		);

		let quotes = service.get_quotes(&request()).await.unwrap();
		assert!(quotes.is_empty());

		let best = service.get_best_quote(&request()).await.unwrap();
		assert!(best.is_none());
	}

	#[tokio::test]
	async fn test_fallback_included_even_when_nothing_applicable() {
		let service = service_with(
			vec![],
			StubAdapter::quoting("price-estimate", ProviderCategory::Cex, "0.30"),
			200,
		);

		let quotes = service.get_quotes(&request()).await.unwrap();
		assert_eq!(quotes.len(), 1);
		assert_eq!(quotes[0].provider_id, "price-estimate");
		assert!(quotes[0].is_best_rate);
	}

	#[tokio::test]
	async fn test_invalid_request_rejected_before_fan_out() {
		// The hung adapter would stall for a minute if it were ever invoked
		let service = service_with(
			vec![StubAdapter::quoting("hung", ProviderCategory::Bridge, "1").with_delay(60_000)],
			StubAdapter::failing("price-estimate", ProviderCategory::Cex),
			60_000,
		);

		let mut bad_request = request();
		bad_request.input_amount = "0".to_string();

		let started = std::time::Instant::now();
		let result = service.get_quotes(&bad_request).await;
		assert!(result.is_err());
		assert!(started.elapsed() < Duration::from_millis(100));
	}

	#[test]
	fn test_validate_providers_catches_missing_adapter() {
		let catalog = ProviderCatalog::new(vec![ProviderDescriptor::new(
			"ghost".to_string(),
			"ghost".to_string(),
			ProviderCategory::Bridge,
			HashSet::from([1]),
		)]);
		let service = AggregatorService::new(
			catalog,
			Arc::new(AdapterRegistry::new()),
			Box::new(StubAdapter::failing("price-estimate", ProviderCategory::Cex)),
			1_000,
		);

		assert!(service.validate_providers().is_err());
	}
}
