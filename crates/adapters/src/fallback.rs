//! Fallback price estimator
//!
//! A provider-shaped adapter that never depends on a routing service: the
//! output amount is derived purely from the two tokens' independent spot
//! prices. The orchestrator includes it in every fan-out regardless of
//! applicability filtering, so a request can still produce an estimate
//! when every live provider fails.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use swapquote_types::{
	format_display_amount, AdapterError, AdapterResult, PriceOracle, ProviderAdapter,
	ProviderCategory, ProviderDescriptor, Quote, QuoteRequest,
};

/// Provider ID reported by fallback estimates
pub const FALLBACK_PROVIDER_ID: &str = "price-estimate";

/// Adapter producing spot-price-derived estimates
#[derive(Debug)]
pub struct FallbackEstimator {
	descriptor: ProviderDescriptor,
	oracle: Arc<dyn PriceOracle>,
}

impl FallbackEstimator {
	pub fn new(oracle: Arc<dyn PriceOracle>) -> Self {
		Self {
			descriptor: ProviderDescriptor::new(
				FALLBACK_PROVIDER_ID.to_string(),
				"Price Estimate".to_string(),
				ProviderCategory::Cex,
				HashSet::new(),
			),
			oracle,
		}
	}
}

#[async_trait]
impl ProviderAdapter for FallbackEstimator {
	fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		debug!(
			"Fallback estimator pricing {} {} -> {}",
			request.input_amount, request.input_token.symbol, request.output_token.symbol
		);

		let input_price = self
			.oracle
			.spot_price_usd(request.input_chain.id, &request.input_token)
			.await
			.ok_or_else(|| AdapterError::PriceUnavailable {
				symbol: request.input_token.symbol.clone(),
				chain_id: request.input_chain.id,
			})?;
		let output_price = self
			.oracle
			.spot_price_usd(request.output_chain.id, &request.output_token)
			.await
			.ok_or_else(|| AdapterError::PriceUnavailable {
				symbol: request.output_token.symbol.clone(),
				chain_id: request.output_chain.id,
			})?;

		let input_value: f64 = request.input_amount.parse().unwrap_or(0.0);
		let output_value = input_value * input_price / output_price;
		if !output_value.is_finite() || output_value <= 0.0 {
			return Err(AdapterError::InvalidResponse {
				reason: format!(
					"spot estimate produced unusable amount {} (prices {} / {})",
					output_value, input_price, output_price
				),
			});
		}

		// No route: an estimate is not an executable offer
		Ok(Quote::new(
			self.descriptor.id.clone(),
			request.input_amount.clone(),
			output_value.to_string(),
			format_display_amount(output_value),
			output_value / input_value,
		)
		.estimated())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use swapquote_types::{Chain, Token};

	#[derive(Debug, Default)]
	struct FixedPriceOracle {
		prices: HashMap<(u64, String), f64>,
	}

	impl FixedPriceOracle {
		fn with_price(mut self, chain_id: u64, symbol: &str, price: f64) -> Self {
			self.prices.insert((chain_id, symbol.to_string()), price);
			self
		}
	}

	#[async_trait]
	impl PriceOracle for FixedPriceOracle {
		async fn spot_price_usd(&self, chain_id: u64, token: &Token) -> Option<f64> {
			self.prices.get(&(chain_id, token.symbol.clone())).copied()
		}
	}

	fn usdc_to_bnb_request() -> QuoteRequest {
		QuoteRequest::new(
			Token::usdc_ethereum(),
			Token::bnb(),
			Chain::ethereum(),
			Chain::bsc(),
			"100".to_string(),
		)
	}

	#[tokio::test]
	async fn test_estimate_from_spot_prices() {
		let oracle = FixedPriceOracle::default()
			.with_price(1, "USDC", 1.0)
			.with_price(56, "BNB", 325.0);
		let estimator = FallbackEstimator::new(Arc::new(oracle));

		let quote = estimator.fetch_quote(&usdc_to_bnb_request()).await.unwrap();
		let output: f64 = quote.output_amount.parse().unwrap();

		assert!((output - 100.0 / 325.0).abs() < 1e-12);
		assert!(quote.is_estimated);
		assert_eq!(quote.provider_id, FALLBACK_PROVIDER_ID);
		assert!(quote.route.is_empty());
	}

	#[tokio::test]
	async fn test_missing_either_price_fails() {
		let only_input = FixedPriceOracle::default().with_price(1, "USDC", 1.0);
		let estimator = FallbackEstimator::new(Arc::new(only_input));
		assert!(estimator.fetch_quote(&usdc_to_bnb_request()).await.is_err());

		let only_output = FixedPriceOracle::default().with_price(56, "BNB", 325.0);
		let estimator = FallbackEstimator::new(Arc::new(only_output));
		assert!(estimator.fetch_quote(&usdc_to_bnb_request()).await.is_err());
	}
}
