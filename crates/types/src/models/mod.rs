//! Shared domain models

pub mod amount;
pub mod chain;
pub mod token;

pub use chain::{Chain, ChainKind};
pub use token::Token;
