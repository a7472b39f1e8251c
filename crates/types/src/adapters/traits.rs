//! Core adapter trait for provider implementations

use async_trait::async_trait;
use std::fmt::Debug;

use super::AdapterResult;
use crate::providers::ProviderDescriptor;
use crate::quotes::{Quote, QuoteRequest};

/// Core trait for provider adapter implementations
///
/// One adapter exists per provider; each translates the canonical request
/// into that provider's query protocol and maps the response (or failure)
/// back into the canonical [`Quote`] shape. Custom providers are added by
/// implementing this trait and registering the adapter by ID.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
	/// Catalog descriptor for this adapter's provider
	fn descriptor(&self) -> &ProviderDescriptor;

	/// Provider ID (for registration and applicability matching)
	fn id(&self) -> &str {
		&self.descriptor().id
	}

	/// Fetch a quote for the given request
	///
	/// Errors describe why the provider produced no usable quote; the
	/// orchestrator logs and discards them. An adapter must return an error
	/// rather than a quote with a zero or negative output amount.
	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote>;

	/// Human-readable provider name
	fn name(&self) -> &str {
		&self.descriptor().name
	}
}
