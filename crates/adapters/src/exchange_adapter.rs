//! Same-chain exchange aggregator adapter ("dexroute" wire shape)
//!
//! Queries a DEX routing aggregator over HTTP for swaps where source and
//! destination chain are the same. This adapter uses the shared client
//! cache for connection pooling and keep-alive.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use swapquote_types::{
	format_display_amount, from_smallest_unit, to_smallest_unit, AdapterError, AdapterResult,
	ProviderAdapter, ProviderDescriptor, Quote, QuoteRequest, RouteStep, StepKind,
};

use crate::client_cache::{ClientCache, ClientConfig};

// ================================
// DEXROUTE API MODELS
// ================================

/// Dexroute quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexRouteQuoteResponse {
	/// Output amount in the output token's smallest units
	pub out_amount: String,
	/// Price impact percentage for the routed trade
	pub price_impact_pct: Option<f64>,
	/// Estimated gas cost in USD
	pub estimated_gas_usd: Option<f64>,
	/// Swap legs of the selected route
	#[serde(default)]
	pub route: Vec<DexRouteLeg>,
}

/// One swap leg of a dexroute route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexRouteLeg {
	/// Protocol executing the leg (e.g. "UniswapV3")
	pub protocol: String,
	pub token_in_symbol: String,
	pub token_out_symbol: String,
}

/// Client strategy for the exchange adapter
#[derive(Debug)]
enum ClientStrategy {
	/// Use the shared client cache for connection pooling and reuse
	Cached(ClientCache),
	/// Create clients on-demand with no caching
	OnDemand,
}

/// Adapter for same-chain DEX aggregator quotes
#[derive(Debug)]
pub struct ExchangeAdapter {
	descriptor: ProviderDescriptor,
	endpoint: String,
	request_timeout_ms: u64,
	extra_headers: Vec<(String, String)>,
	client_strategy: ClientStrategy,
}

impl ExchangeAdapter {
	/// Create a new exchange adapter backed by the shared client cache
	pub fn new(descriptor: ProviderDescriptor, endpoint: String, request_timeout_ms: u64) -> Self {
		Self {
			descriptor,
			endpoint,
			request_timeout_ms,
			extra_headers: Vec::new(),
			client_strategy: ClientStrategy::Cached(ClientCache::for_adapter()),
		}
	}

	/// Create an exchange adapter without client caching
	pub fn without_cache(
		descriptor: ProviderDescriptor,
		endpoint: String,
		request_timeout_ms: u64,
	) -> Self {
		Self {
			descriptor,
			endpoint,
			request_timeout_ms,
			extra_headers: Vec::new(),
			client_strategy: ClientStrategy::OnDemand,
		}
	}

	pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
		self.extra_headers = headers;
		self
	}

	fn client_config(&self) -> ClientConfig {
		ClientConfig::new(&self.descriptor.id, &self.endpoint, self.request_timeout_ms)
			.with_headers(self.extra_headers.clone())
	}

	fn get_client(&self) -> AdapterResult<Arc<reqwest::Client>> {
		match &self.client_strategy {
			ClientStrategy::Cached(cache) => cache.get_client(&self.client_config()),
			ClientStrategy::OnDemand => {
				let client = reqwest::Client::builder()
					.timeout(std::time::Duration::from_millis(self.request_timeout_ms))
					.build()
					.map_err(AdapterError::HttpError)?;
				Ok(Arc::new(client))
			},
		}
	}

	/// Convert a dexroute response into the canonical quote shape
	fn convert_response(
		&self,
		response: DexRouteQuoteResponse,
		request: &QuoteRequest,
	) -> AdapterResult<Quote> {
		let output_amount = from_smallest_unit(&response.out_amount, request.output_token.decimals);
		let output_value: f64 = output_amount.parse().unwrap_or(0.0);
		if output_value <= 0.0 {
			return Err(AdapterError::InvalidResponse {
				reason: format!("non-positive output amount '{}'", response.out_amount),
			});
		}

		let input_value: f64 = request.input_amount.parse().unwrap_or(0.0);
		let exchange_rate = output_value / input_value;

		let route = response
			.route
			.into_iter()
			.map(|leg| {
				RouteStep::new(StepKind::Swap, leg.protocol)
					.with_tokens(leg.token_in_symbol, leg.token_out_symbol)
					.with_chains(request.input_chain.id, request.input_chain.id)
			})
			.collect();

		let mut quote = Quote::new(
			self.descriptor.id.clone(),
			request.input_amount.clone(),
			output_amount,
			format_display_amount(output_value),
			exchange_rate,
		)
		.with_route(route);

		// Only fields the provider actually reported are populated
		if let Some(impact) = response.price_impact_pct {
			quote = quote.with_price_impact(impact.max(0.0));
		}
		if let Some(gas_usd) = response.estimated_gas_usd {
			quote = quote.with_estimated_gas_usd(gas_usd);
		}

		Ok(quote)
	}
}

#[async_trait]
impl ProviderAdapter for ExchangeAdapter {
	fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		debug!(
			"Exchange adapter {} quoting {} {} -> {} on chain {}",
			self.descriptor.id,
			request.input_amount,
			request.input_token.symbol,
			request.output_token.symbol,
			request.input_chain.id
		);

		// Same-chain exchanges cannot bridge; the applicability filter keeps
		// cross-chain requests away, the adapter still refuses them.
		if request.is_cross_chain() {
			return Err(AdapterError::ChainNotSupported {
				chain_id: request.output_chain.id,
				provider_id: self.descriptor.id.clone(),
			});
		}

		let amount_units = to_smallest_unit(&request.input_amount, request.input_token.decimals);
		if amount_units == "0" {
			return Err(AdapterError::InvalidResponse {
				reason: format!(
					"input amount '{}' truncates to zero at {} decimals",
					request.input_amount, request.input_token.decimals
				),
			});
		}

		let client = self.get_client()?;
		let quote_url = format!("{}/quote", self.endpoint);
		let chain_id = request.input_chain.id.to_string();
		let slippage = request.slippage_bps.to_string();

		let mut params = vec![
			("chainId", chain_id.as_str()),
			("tokenIn", request.input_token.address.as_str()),
			("tokenOut", request.output_token.address.as_str()),
			("amountIn", amount_units.as_str()),
			("slippageBps", slippage.as_str()),
		];
		if let Some(user) = &request.user_address {
			params.push(("userAddress", user.as_str()));
		}

		let response = client
			.get(&quote_url)
			.query(&params)
			.send()
			.await
			.map_err(AdapterError::HttpError)?;

		if !response.status().is_success() {
			return Err(AdapterError::HttpStatusError {
				status_code: response.status().as_u16(),
				reason: format!("dexroute quote endpoint {}", quote_url),
			});
		}

		let dexroute_quote: DexRouteQuoteResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("failed to parse dexroute quote response: {}", e),
				})?;

		self.convert_response(dexroute_quote, request)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;
	use swapquote_types::{Chain, ProviderCategory, Token};

	fn test_adapter() -> ExchangeAdapter {
		let descriptor = ProviderDescriptor::new(
			"dexroute".to_string(),
			"DexRoute".to_string(),
			ProviderCategory::SameChainExchange,
			HashSet::from([1]),
		);
		ExchangeAdapter::without_cache(
			descriptor,
			"https://api.dexroute.example/v1".to_string(),
			5_000,
		)
	}

	fn same_chain_request() -> QuoteRequest {
		QuoteRequest::new(
			Token::usdc_ethereum(),
			Token::usdt_ethereum(),
			Chain::ethereum(),
			Chain::ethereum(),
			"100".to_string(),
		)
	}

	#[test]
	fn test_convert_response_populates_reported_fields() {
		let adapter = test_adapter();
		let response = DexRouteQuoteResponse {
			out_amount: "99500000".to_string(), // 99.5 USDT at 6 decimals
			price_impact_pct: Some(0.05),
			estimated_gas_usd: Some(3.2),
			route: vec![DexRouteLeg {
				protocol: "UniswapV3".to_string(),
				token_in_symbol: "USDC".to_string(),
				token_out_symbol: "USDT".to_string(),
			}],
		};

		let quote = adapter.convert_response(response, &same_chain_request()).unwrap();

		assert_eq!(quote.provider_id, "dexroute");
		assert_eq!(quote.output_amount, "99.5");
		assert_eq!(quote.exchange_rate, 0.995);
		assert_eq!(quote.price_impact_percent, Some(0.05));
		assert_eq!(quote.estimated_gas_usd, Some(3.2));
		assert_eq!(quote.route.len(), 1);
		assert_eq!(quote.route[0].kind, StepKind::Swap);
		assert!(!quote.is_estimated);
	}

	#[test]
	fn test_convert_response_omits_unreported_fields() {
		let adapter = test_adapter();
		let response = DexRouteQuoteResponse {
			out_amount: "99500000".to_string(),
			price_impact_pct: None,
			estimated_gas_usd: None,
			route: vec![],
		};

		let quote = adapter.convert_response(response, &same_chain_request()).unwrap();

		assert!(quote.price_impact_percent.is_none());
		assert!(quote.estimated_gas_usd.is_none());
		assert!(quote.estimated_time_seconds.is_none());
	}

	#[test]
	fn test_convert_response_rejects_zero_output() {
		let adapter = test_adapter();
		let response = DexRouteQuoteResponse {
			out_amount: "0".to_string(),
			price_impact_pct: None,
			estimated_gas_usd: None,
			route: vec![],
		};

		assert!(adapter.convert_response(response, &same_chain_request()).is_err());
	}

	#[tokio::test]
	async fn test_cross_chain_request_refused() {
		let adapter = test_adapter();
		let request = QuoteRequest::new(
			Token::usdc_ethereum(),
			Token::bnb(),
			Chain::ethereum(),
			Chain::bsc(),
			"100".to_string(),
		);

		let result = adapter.fetch_quote(&request).await;
		assert!(matches!(
			result,
			Err(AdapterError::ChainNotSupported { chain_id: 56, .. })
		));
	}
}
