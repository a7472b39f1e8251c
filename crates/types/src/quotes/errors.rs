//! Error types for quote request validation

use thiserror::Error;

/// Validation errors for quote requests
///
/// These are the only errors the aggregation entry point raises; they are
/// surfaced synchronously before any provider is contacted.
#[derive(Error, Debug)]
pub enum QuoteValidationError {
	#[error("Invalid amount: {amount} - {reason}")]
	InvalidAmount { amount: String, reason: String },

	#[error("Token {symbol} declares chain {token_chain_id} but request uses chain {request_chain_id}")]
	ChainMismatch {
		symbol: String,
		token_chain_id: u64,
		request_chain_id: u64,
	},

	#[error("Invalid slippage tolerance: {bps} bps (maximum {max} bps)")]
	InvalidSlippage { bps: u32, max: u32 },

	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },
}

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;
