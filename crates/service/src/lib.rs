//! Service layer for swap quote aggregation
//!
//! Hosts the provider catalog, the HTTP price oracle with its TTL cache,
//! and the aggregation service that fans requests out to adapters.

pub mod aggregator;
pub mod catalog;
pub mod price_oracle;

pub use aggregator::{AggregationStats, AggregatorService};
pub use catalog::ProviderCatalog;
pub use price_oracle::{HttpPriceOracle, PriceCache};
