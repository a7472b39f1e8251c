//! Error types for provider adapter operations

use thiserror::Error;

/// Adapter operation errors
///
/// None of these ever reach the public entry point: the orchestrator is the
/// recovery boundary that downgrades them to "no quote" for the provider.
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Chain not supported: {chain_id} by provider {provider_id}")]
	ChainNotSupported { chain_id: u64, provider_id: String },

	#[error("Spot price unavailable for {symbol} on chain {chain_id}")]
	PriceUnavailable { symbol: String, chain_id: u64 },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
