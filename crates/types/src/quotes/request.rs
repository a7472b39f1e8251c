//! Quote request model and validation

use serde::{Deserialize, Serialize};

use crate::models::{Chain, Token};

use super::{QuoteValidationError, QuoteValidationResult};

/// Default slippage tolerance in basis points (1%)
pub const DEFAULT_SLIPPAGE_BPS: u32 = 100;

/// Maximum accepted slippage tolerance in basis points (50%)
pub const MAX_SLIPPAGE_BPS: u32 = 5_000;

fn default_slippage_bps() -> u32 {
	DEFAULT_SLIPPAGE_BPS
}

/// A request to convert an amount of one token into another, possibly
/// across chains
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
	pub input_token: Token,
	pub output_token: Token,
	pub input_chain: Chain,
	pub output_chain: Chain,
	/// Input amount as a human-readable decimal string
	pub input_amount: String,
	/// Recipient/spender address, when a provider wants one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_address: Option<String>,
	/// Slippage tolerance in basis points
	#[serde(default = "default_slippage_bps")]
	pub slippage_bps: u32,
}

impl QuoteRequest {
	pub fn new(
		input_token: Token,
		output_token: Token,
		input_chain: Chain,
		output_chain: Chain,
		input_amount: String,
	) -> Self {
		Self {
			input_token,
			output_token,
			input_chain,
			output_chain,
			input_amount,
			user_address: None,
			slippage_bps: DEFAULT_SLIPPAGE_BPS,
		}
	}

	pub fn with_user_address(mut self, address: String) -> Self {
		self.user_address = Some(address);
		self
	}

	pub fn with_slippage_bps(mut self, bps: u32) -> Self {
		self.slippage_bps = bps;
		self
	}

	/// Whether source and destination chains differ
	pub fn is_cross_chain(&self) -> bool {
		self.input_chain.id != self.output_chain.id
	}

	/// Validate the request before any provider is contacted
	///
	/// Applied validations:
	/// - input amount must parse to a strictly positive decimal
	/// - each token's declared chain must match the request's chain
	/// - slippage must stay within the accepted range
	pub fn validate(&self) -> QuoteValidationResult<()> {
		if self.input_amount.trim().is_empty() {
			return Err(QuoteValidationError::MissingRequiredField {
				field: "inputAmount".to_string(),
			});
		}

		let parsed: f64 = self.input_amount.trim().parse().map_err(|_| {
			QuoteValidationError::InvalidAmount {
				amount: self.input_amount.clone(),
				reason: "not a decimal number".to_string(),
			}
		})?;
		if !parsed.is_finite() || parsed <= 0.0 {
			return Err(QuoteValidationError::InvalidAmount {
				amount: self.input_amount.clone(),
				reason: "must be strictly positive".to_string(),
			});
		}

		if self.input_token.chain_id != self.input_chain.id {
			return Err(QuoteValidationError::ChainMismatch {
				symbol: self.input_token.symbol.clone(),
				token_chain_id: self.input_token.chain_id,
				request_chain_id: self.input_chain.id,
			});
		}
		if self.output_token.chain_id != self.output_chain.id {
			return Err(QuoteValidationError::ChainMismatch {
				symbol: self.output_token.symbol.clone(),
				token_chain_id: self.output_token.chain_id,
				request_chain_id: self.output_chain.id,
			});
		}

		if self.slippage_bps > MAX_SLIPPAGE_BPS {
			return Err(QuoteValidationError::InvalidSlippage {
				bps: self.slippage_bps,
				max: MAX_SLIPPAGE_BPS,
			});
		}

		Ok(())
	}
}
