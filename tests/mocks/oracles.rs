//! Price oracle mocks
//!
//! A fixed-table oracle so rate-based adapters and the fallback estimator
//! run without network access.

#![allow(dead_code)]

use std::collections::HashMap;

use swapquote_aggregator::async_trait::async_trait;
use swapquote_aggregator::{PriceOracle, Token};

/// Oracle returning prices from a fixed table keyed by chain and symbol
#[derive(Debug, Default)]
pub struct FixedPriceOracle {
	prices: HashMap<(u64, String), f64>,
}

impl FixedPriceOracle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_price(mut self, chain_id: u64, symbol: &str, price_usd: f64) -> Self {
		self.prices
			.insert((chain_id, symbol.to_uppercase()), price_usd);
		self
	}

	/// USDC on Ethereum at $1.00, BNB on BSC at $320
	pub fn usdc_bnb() -> Self {
		Self::new()
			.with_price(1, "USDC", 1.0)
			.with_price(56, "BNB", 320.0)
	}
}

#[async_trait]
impl PriceOracle for FixedPriceOracle {
	async fn spot_price_usd(&self, chain_id: u64, token: &Token) -> Option<f64> {
		self.prices
			.get(&(chain_id, token.symbol.to_uppercase()))
			.copied()
	}
}
