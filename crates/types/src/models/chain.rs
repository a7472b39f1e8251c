//! Blockchain network models

use serde::{Deserialize, Serialize};

/// Chain family, used only to map to provider-specific chain naming
/// (e.g. a bridge's internal chain slug). The engine itself treats
/// chains uniformly by ID.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
	Evm,
	Solana,
	Bitcoin,
	Tron,
}

/// A supported blockchain network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Chain {
	/// Chain ID (e.g., 1 for Ethereum mainnet, 56 for BNB Chain)
	pub id: u64,
	/// Human-readable name (e.g., "Ethereum", "BNB Chain")
	pub name: String,
	/// Chain family tag
	pub kind: ChainKind,
}

impl Chain {
	pub fn new(id: u64, name: String, kind: ChainKind) -> Self {
		Self { id, name, kind }
	}
}

/// Common network constants
impl Chain {
	pub fn ethereum() -> Self {
		Self::new(1, "Ethereum".to_string(), ChainKind::Evm)
	}

	pub fn bsc() -> Self {
		Self::new(56, "BNB Chain".to_string(), ChainKind::Evm)
	}

	pub fn polygon() -> Self {
		Self::new(137, "Polygon".to_string(), ChainKind::Evm)
	}

	pub fn base() -> Self {
		Self::new(8453, "Base".to_string(), ChainKind::Evm)
	}
}
