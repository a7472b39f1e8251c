//! Cross-chain bridge aggregator adapter ("omnibridge" wire shape)
//!
//! Queries a bridge routing aggregator over HTTP. The bridge names chains
//! by its own slugs and cannot accept a native-asset sentinel, so this
//! adapter substitutes the chain's wrapped-asset address where needed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use swapquote_types::{
	format_display_amount, from_smallest_unit, to_smallest_unit, AdapterError, AdapterResult,
	Chain, ChainKind, ProviderAdapter, ProviderDescriptor, Quote, QuoteRequest, RouteStep,
	StepKind,
};

use crate::client_cache::{ClientCache, ClientConfig};

// ================================
// OMNIBRIDGE API MODELS
// ================================

/// Omnibridge route quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmniBridgeQuoteResponse {
	/// Destination amount in the output token's smallest units
	pub dest_amount: String,
	/// Estimated fill time in seconds
	pub estimated_time_sec: Option<u64>,
	/// Relay fee charged by the bridge, in USD
	pub relay_fee_usd: Option<f64>,
	/// Price impact of any on-route swaps
	pub price_impact_pct: Option<f64>,
	/// Hops of the selected route
	#[serde(default)]
	pub steps: Vec<OmniBridgeStep>,
}

/// One hop of an omnibridge route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmniBridgeStep {
	/// "swap" or "bridge"
	pub step_type: String,
	/// Protocol executing the hop
	pub tool: String,
	pub from_chain_id: u64,
	pub to_chain_id: u64,
	pub from_token_symbol: Option<String>,
	pub to_token_symbol: Option<String>,
}

/// Map a chain to omnibridge's internal chain slug
fn bridge_chain_slug(chain: &Chain) -> String {
	match chain.kind {
		ChainKind::Evm => format!("evm-{}", chain.id),
		ChainKind::Solana => "solana".to_string(),
		ChainKind::Bitcoin => "bitcoin".to_string(),
		ChainKind::Tron => "tron".to_string(),
	}
}

/// Wrapped-native address per chain; omnibridge rejects the zero-address
/// sentinel and wants the wrapped asset instead
fn wrapped_native_address(chain_id: u64) -> Option<&'static str> {
	match chain_id {
		// WETH
		1 => Some("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
		// WBNB
		56 => Some("0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"),
		// WMATIC
		137 => Some("0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"),
		// WETH on Base
		8453 => Some("0x4200000000000000000000000000000000000006"),
		_ => None,
	}
}

/// Client strategy for the bridge adapter
#[derive(Debug)]
enum ClientStrategy {
	Cached(ClientCache),
	OnDemand,
}

/// Adapter for cross-chain bridge aggregator quotes
#[derive(Debug)]
pub struct BridgeAdapter {
	descriptor: ProviderDescriptor,
	endpoint: String,
	request_timeout_ms: u64,
	extra_headers: Vec<(String, String)>,
	client_strategy: ClientStrategy,
}

impl BridgeAdapter {
	/// Create a new bridge adapter backed by the shared client cache
	pub fn new(descriptor: ProviderDescriptor, endpoint: String, request_timeout_ms: u64) -> Self {
		Self {
			descriptor,
			endpoint,
			request_timeout_ms,
			extra_headers: Vec::new(),
			client_strategy: ClientStrategy::Cached(ClientCache::for_adapter()),
		}
	}

	/// Create a bridge adapter without client caching
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

	fn get_client(&self) -> AdapterResult<Arc<reqwest::Client>> {
		match &self.client_strategy {
			ClientStrategy::Cached(cache) => {
				let config =
					ClientConfig::new(&self.descriptor.id, &self.endpoint, self.request_timeout_ms)
						.with_headers(self.extra_headers.clone());
				cache.get_client(&config)
			},
			ClientStrategy::OnDemand => {
				let client = reqwest::Client::builder()
					.timeout(std::time::Duration::from_millis(self.request_timeout_ms))
					.build()
					.map_err(AdapterError::HttpError)?;
				Ok(Arc::new(client))
			},
		}
	}

	/// Token address in the form omnibridge accepts
	fn upstream_address(token: &swapquote_types::Token) -> AdapterResult<String> {
		if !token.is_native() {
			return Ok(token.address.clone());
		}
		wrapped_native_address(token.chain_id)
			.map(str::to_string)
			.ok_or_else(|| AdapterError::ConfigError {
				reason: format!(
					"no wrapped-native address known for chain {}",
					token.chain_id
				),
			})
	}

	/// Convert an omnibridge response into the canonical quote shape
	fn convert_response(
		&self,
		response: OmniBridgeQuoteResponse,
		request: &QuoteRequest,
	) -> AdapterResult<Quote> {
		let output_amount = from_smallest_unit(&response.dest_amount, request.output_token.decimals);
		let output_value: f64 = output_amount.parse().unwrap_or(0.0);
		if output_value <= 0.0 {
			return Err(AdapterError::InvalidResponse {
				reason: format!("non-positive destination amount '{}'", response.dest_amount),
			});
		}

		let input_value: f64 = request.input_amount.parse().unwrap_or(0.0);
		let exchange_rate = output_value / input_value;

		let route = response
			.steps
			.into_iter()
			.map(|step| {
				let kind = if step.step_type == "bridge" {
					StepKind::Bridge
				} else {
					StepKind::Swap
				};
				let mut route_step = RouteStep::new(kind, step.tool)
					.with_chains(step.from_chain_id, step.to_chain_id);
				if let (Some(from), Some(to)) = (step.from_token_symbol, step.to_token_symbol) {
					route_step = route_step.with_tokens(from, to);
				}
				route_step
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

		if let Some(seconds) = response.estimated_time_sec {
			quote = quote.with_estimated_time(seconds);
		}
		if let Some(fee_usd) = response.relay_fee_usd {
			quote = quote.with_estimated_gas_usd(fee_usd);
		}
		if let Some(impact) = response.price_impact_pct {
			quote = quote.with_price_impact(impact.max(0.0));
		}

		Ok(quote)
	}
}

#[async_trait]
impl ProviderAdapter for BridgeAdapter {
	fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		debug!(
			"Bridge adapter {} quoting {} {} ({}) -> {} ({})",
			self.descriptor.id,
			request.input_amount,
			request.input_token.symbol,
			request.input_chain.id,
			request.output_token.symbol,
			request.output_chain.id
		);

		let amount_units = to_smallest_unit(&request.input_amount, request.input_token.decimals);
		if amount_units == "0" {
			return Err(AdapterError::InvalidResponse {
				reason: format!(
					"input amount '{}' truncates to zero at {} decimals",
					request.input_amount, request.input_token.decimals
				),
			});
		}

		let from_token = Self::upstream_address(&request.input_token)?;
		let to_token = Self::upstream_address(&request.output_token)?;
		let from_chain = bridge_chain_slug(&request.input_chain);
		let to_chain = bridge_chain_slug(&request.output_chain);

		let client = self.get_client()?;
		let quote_url = format!("{}/route", self.endpoint);
		let slippage = request.slippage_bps.to_string();

		let mut params = vec![
			("fromChain", from_chain.as_str()),
			("toChain", to_chain.as_str()),
			("fromToken", from_token.as_str()),
			("toToken", to_token.as_str()),
			("amount", amount_units.as_str()),
			("slippageBps", slippage.as_str()),
		];
		if let Some(user) = &request.user_address {
			params.push(("recipient", user.as_str()));
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
				reason: format!("omnibridge route endpoint {}", quote_url),
			});
		}

		let bridge_quote: OmniBridgeQuoteResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("failed to parse omnibridge route response: {}", e),
				})?;

		self.convert_response(bridge_quote, request)
	}
}
