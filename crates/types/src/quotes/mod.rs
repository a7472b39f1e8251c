//! Core Quote domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod errors;
pub mod request;

pub use errors::{QuoteValidationError, QuoteValidationResult};
pub use request::QuoteRequest;

/// Kind of a single route hop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
	Swap,
	Bridge,
	Cex,
}

/// One hop of a multi-leg execution path, reported for display only.
/// This engine never consumes route steps for execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
	pub kind: StepKind,
	pub protocol_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from_token: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to_token: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from_chain_id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to_chain_id: Option<u64>,
}

impl RouteStep {
	pub fn new(kind: StepKind, protocol_name: String) -> Self {
		Self {
			kind,
			protocol_name,
			from_token: None,
			to_token: None,
			from_chain_id: None,
			to_chain_id: None,
		}
	}

	pub fn with_tokens(mut self, from_token: String, to_token: String) -> Self {
		self.from_token = Some(from_token);
		self.to_token = Some(to_token);
		self
	}

	pub fn with_chains(mut self, from_chain_id: u64, to_chain_id: u64) -> Self {
		self.from_chain_id = Some(from_chain_id);
		self.to_chain_id = Some(to_chain_id);
		self
	}
}

/// Canonical, provider-agnostic quote
///
/// Adapters translate each provider's wire format into this shape so the
/// orchestrator can rank offers without knowing any provider schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	/// Unique identifier, regenerated on every fetch attempt
	pub quote_id: String,

	/// ID of the provider that produced this quote
	pub provider_id: String,

	/// Input amount as a decimal string (echoed from the request)
	pub input_amount: String,

	/// Output amount as a decimal string in the output token's units
	pub output_amount: String,

	/// Human-rounded output amount for display
	pub output_amount_display: String,

	/// output_amount / input_amount
	pub exchange_rate: f64,

	/// Price impact percentage (>= 0), when the provider reports one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price_impact_percent: Option<f64>,

	/// Estimated gas cost in USD, when the provider reports one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub estimated_gas_usd: Option<f64>,

	/// Estimated completion time in seconds, when the provider reports one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub estimated_time_seconds: Option<u64>,

	/// True for quotes derived purely from spot prices rather than a
	/// routable offer
	pub is_estimated: bool,

	/// Set exactly once per response by the orchestrator, on the top-ranked
	/// quote only
	pub is_best_rate: bool,

	/// Execution path for display (possibly empty)
	pub route: Vec<RouteStep>,

	/// When the quote was created
	pub created_at: DateTime<Utc>,
}

impl Quote {
	/// Create a new quote with a fresh ID
	pub fn new(
		provider_id: String,
		input_amount: String,
		output_amount: String,
		output_amount_display: String,
		exchange_rate: f64,
	) -> Self {
		Self {
			quote_id: Uuid::new_v4().to_string(),
			provider_id,
			input_amount,
			output_amount,
			output_amount_display,
			exchange_rate,
			price_impact_percent: None,
			estimated_gas_usd: None,
			estimated_time_seconds: None,
			is_estimated: false,
			is_best_rate: false,
			route: Vec::new(),
			created_at: Utc::now(),
		}
	}

	/// Numeric output amount, used as the sole ranking key
	pub fn output_amount_value(&self) -> f64 {
		self.output_amount.parse().unwrap_or(0.0)
	}

	pub fn with_price_impact(mut self, percent: f64) -> Self {
		self.price_impact_percent = Some(percent);
		self
	}

	pub fn with_estimated_gas_usd(mut self, usd: f64) -> Self {
		self.estimated_gas_usd = Some(usd);
		self
	}

	pub fn with_estimated_time(mut self, seconds: u64) -> Self {
		self.estimated_time_seconds = Some(seconds);
		self
	}

	pub fn with_route(mut self, route: Vec<RouteStep>) -> Self {
		self.route = route;
		self
	}

	pub fn estimated(mut self) -> Self {
		self.is_estimated = true;
		self
	}
}
