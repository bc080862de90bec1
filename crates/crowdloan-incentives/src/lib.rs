//! # crowdloan-incentives: reward estimation for crowdloan contributors.
//!
//! All amounts are `rust_decimal::Decimal` values in KSM base units and every
//! operation is a pure function of its inputs and the configuration.
//!
//! - **BSX multiplier**: full before the target auction closes, then linear
//!   over the closing window.
//! - **HDX bonus**: depends on how far the home crowdloan leads its rival.
//! - **Weighting**: each contribution weighted by the multiplier at its block.
//! - **Historical reconstruction**: replays the HDX bonus at past blocks from
//!   archived balances.

pub mod aggregator;
pub mod bsx;
pub mod engine;
pub mod hdx;
pub mod historical;
pub mod pricing;
pub mod scale;
pub mod weighting;

pub use engine::{Estimate, IncentiveEngine, RewardInputs};
pub use historical::HistoricalIncentiveCache;
pub use pricing::{PriceHistory, PricePoint};
