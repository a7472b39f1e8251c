//! Reusable domain entity fixtures

#![allow(dead_code)]

use swapquote_aggregator::{Chain, QuoteRequest, Token};

/// Cross-chain request: 100 USDC on Ethereum into BNB on BSC
pub fn usdc_to_bnb_request() -> QuoteRequest {
	QuoteRequest::new(
		Token::usdc_ethereum(),
		Token::bnb(),
		Chain::ethereum(),
		Chain::bsc(),
		"100".to_string(),
	)
}

/// Same-chain request: 100 USDC into USDT, both on Ethereum
pub fn usdc_to_usdt_request() -> QuoteRequest {
	QuoteRequest::new(
		Token::usdc_ethereum(),
		Token::usdt_ethereum(),
		Chain::ethereum(),
		Chain::ethereum(),
		"100".to_string(),
	)
}
