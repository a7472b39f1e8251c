//! Mock adapters for integration testing
//!
//! Simple, working mock adapters usable across test files without real
//! HTTP dependencies.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use swapquote_aggregator::async_trait::async_trait;
use swapquote_aggregator::{
	AdapterError, AdapterResult, ProviderAdapter, ProviderCategory, ProviderDescriptor, Quote,
	QuoteRequest,
};

/// Mock provider adapter with call tracking, configurable delays, and
/// failure simulation
#[derive(Debug)]
pub struct MockAdapter {
	descriptor: ProviderDescriptor,
	call_tracker: Arc<AtomicUsize>,
	pub output_amount: String,
	pub should_fail: bool,
	pub response_delay_ms: u64,
	pub estimated: bool,
}

impl MockAdapter {
	/// Create a mock adapter with custom configuration
	pub fn with_config(
		id: &str,
		category: ProviderCategory,
		chain_ids: &[u64],
		output_amount: &str,
	) -> Self {
		Self {
			descriptor: ProviderDescriptor::new(
				id.to_string(),
				format!("{} Adapter", id),
				category,
				chain_ids.iter().copied().collect::<HashSet<u64>>(),
			),
			call_tracker: Arc::new(AtomicUsize::new(0)),
			output_amount: output_amount.to_string(),
			should_fail: false,
			response_delay_ms: 0,
			estimated: false,
		}
	}

	/// Create a succeeding adapter with the given output amount
	pub fn quoting(id: &str, category: ProviderCategory, output_amount: &str) -> Self {
		Self::with_config(id, category, &[1, 56, 137], output_amount)
	}

	/// Create a failing adapter
	pub fn failing(id: &str, category: ProviderCategory) -> Self {
		let mut adapter = Self::with_config(id, category, &[1, 56, 137], "0");
		adapter.should_fail = true;
		adapter
	}

	pub fn with_delay(mut self, delay_ms: u64) -> Self {
		self.response_delay_ms = delay_ms;
		self
	}

	pub fn with_chains(mut self, chain_ids: &[u64]) -> Self {
		self.descriptor.supported_chain_ids = chain_ids.iter().copied().collect();
		self
	}

	pub fn estimated(mut self) -> Self {
		self.estimated = true;
		self
	}

	/// Get the number of times this adapter has been called
	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::Relaxed)
	}

	/// Handle to the shared call counter, usable after the adapter is boxed
	pub fn call_tracker(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.call_tracker)
	}
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
	fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		self.call_tracker.fetch_add(1, Ordering::Relaxed);

		if self.response_delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.response_delay_ms)).await;
		}

		if self.should_fail {
			return Err(AdapterError::InvalidResponse {
				reason: format!("Adapter {} configured to fail", self.descriptor.id),
			});
		}

		let mut quote = Quote::new(
			self.descriptor.id.clone(),
			request.input_amount.clone(),
			self.output_amount.clone(),
			self.output_amount.clone(),
			1.0,
		);
		if self.estimated {
			quote = quote.estimated();
		}
		Ok(quote)
	}
}
