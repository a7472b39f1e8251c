//! Price oracle collaborator interface

use async_trait::async_trait;
use std::fmt::Debug;

use crate::models::Token;

/// Independent spot-price lookup, specified only at this boundary.
///
/// Used by rate-only CEX adapters and the fallback estimator; routing
/// providers never depend on it. Unavailability is `None`, never an error:
/// a missing price simply means the dependent adapter cannot quote.
#[async_trait]
pub trait PriceOracle: Send + Sync + Debug {
	/// Current USD spot price for a token, if known
	async fn spot_price_usd(&self, chain_id: u64, token: &Token) -> Option<f64>;
}
