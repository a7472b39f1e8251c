//! Rate-only centralized-exchange adapter
//!
//! CEX rate sources have no routing API: a quote is computed purely from
//! two independent spot prices minus a fixed provider fee rate. Several
//! providers share this degenerate shape, differing only in fee rate and
//! reported time estimate.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use swapquote_types::{
	format_display_amount, AdapterError, AdapterResult, PriceOracle, ProviderAdapter,
	ProviderDescriptor, Quote, QuoteRequest, RouteStep, StepKind,
};

/// Adapter for centralized-exchange rate quotes
#[derive(Debug)]
pub struct CexRateAdapter {
	descriptor: ProviderDescriptor,
	oracle: Arc<dyn PriceOracle>,
	/// Fee fraction deducted from the converted amount (e.g. 0.001 = 10 bps)
	fee_rate: f64,
	/// Fixed completion estimate this venue reports
	estimated_time_seconds: u64,
}

impl CexRateAdapter {
	pub fn new(
		descriptor: ProviderDescriptor,
		oracle: Arc<dyn PriceOracle>,
		fee_bps: u32,
		estimated_time_seconds: u64,
	) -> Self {
		Self {
			descriptor,
			oracle,
			fee_rate: f64::from(fee_bps) / 10_000.0,
			estimated_time_seconds,
		}
	}
}

#[async_trait]
impl ProviderAdapter for CexRateAdapter {
	fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		debug!(
			"CEX rate adapter {} quoting {} {} -> {}",
			self.descriptor.id,
			request.input_amount,
			request.input_token.symbol,
			request.output_token.symbol
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
		let gross = input_value * input_price / output_price;
		let net = gross * (1.0 - self.fee_rate);
		if !net.is_finite() || net <= 0.0 {
			return Err(AdapterError::InvalidResponse {
				reason: format!(
					"rate conversion produced unusable amount {} (prices {} / {})",
					net, input_price, output_price
				),
			});
		}

		let route = vec![RouteStep::new(StepKind::Cex, self.descriptor.name.clone())
			.with_tokens(
				request.input_token.symbol.clone(),
				request.output_token.symbol.clone(),
			)
			.with_chains(request.input_chain.id, request.output_chain.id)];

		Ok(Quote::new(
			self.descriptor.id.clone(),
			request.input_amount.clone(),
			net.to_string(),
			format_display_amount(net),
			net / input_value,
		)
		.with_estimated_time(self.estimated_time_seconds)
		.with_route(route))
	}
}
