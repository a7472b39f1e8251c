//! Blockchain token models

use serde::{Deserialize, Serialize};

/// Zero address used by EVM chains as the native-asset marker
pub const NATIVE_ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Generic sentinel accepted anywhere a chain-native asset is meant
pub const NATIVE_SENTINEL: &str = "native";

/// A token on a specific chain
///
/// The address is opaque to the engine except for native-asset detection:
/// both the EVM zero address and the literal `"native"` sentinel mark the
/// chain's native asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Token {
	/// Chain ID where this token exists
	pub chain_id: u64,
	/// Contract address, or a native-asset sentinel
	pub address: String,
	/// Token symbol (e.g., "ETH", "USDC", "WBTC")
	pub symbol: String,
	/// Number of decimal places
	pub decimals: u8,
}

impl Token {
	pub fn new(chain_id: u64, address: String, symbol: String, decimals: u8) -> Self {
		Self {
			chain_id,
			address,
			symbol,
			decimals,
		}
	}

	/// Whether this token is the chain's native asset
	pub fn is_native(&self) -> bool {
		self.address.eq_ignore_ascii_case(NATIVE_ZERO_ADDRESS)
			|| self.address.eq_ignore_ascii_case(NATIVE_SENTINEL)
	}

	/// Address to send upstream, substituting `wrapped` for the native
	/// sentinel where a provider requires an explicit wrapped-asset address
	pub fn address_or_wrapped<'a>(&'a self, wrapped: &'a str) -> &'a str {
		if self.is_native() {
			wrapped
		} else {
			&self.address
		}
	}
}

/// Common token constants for tests and demos
impl Token {
	pub fn eth() -> Self {
		Self::new(1, NATIVE_ZERO_ADDRESS.to_string(), "ETH".to_string(), 18)
	}

	pub fn usdc_ethereum() -> Self {
		Self::new(
			1,
			"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
			"USDC".to_string(),
			6,
		)
	}

	pub fn usdt_ethereum() -> Self {
		Self::new(
			1,
			"0xdAC17F958D2ee523a2206206994597C13D831ec7".to_string(),
			"USDT".to_string(),
			6,
		)
	}

	pub fn bnb() -> Self {
		Self::new(56, NATIVE_ZERO_ADDRESS.to_string(), "BNB".to_string(), 18)
	}

	pub fn usdc_bsc() -> Self {
		Self::new(
			56,
			"0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d".to_string(),
			"USDC".to_string(),
			18,
		)
	}

	pub fn usdc_polygon() -> Self {
		Self::new(
			137,
			"0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174".to_string(),
			"USDC".to_string(),
			6,
		)
	}
}
