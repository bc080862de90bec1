//! Incentive configuration.
//!
//! [`IncentiveConfig`] carries every tunable of the reward policies. The
//! defaults describe the Basilisk campaign; [`IncentiveConfig::validate`]
//! rejects degenerate or nonsensical values once, before any calculation
//! runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{HISTORICAL_AUCTIONS, MAX_DECIMAL_PRECISION, TARGET_AUCTION_ID};
use crate::error::{ConfigError, ScaleError};
use crate::types::Auction;

/// A `{ min, max }` pair. For reward multipliers `min` is the value used at
/// the start of a scale and may be larger than `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl Bounds {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HdxConfig {
    /// Range of the home campaign's fractional lead over its rival.
    pub lead_percentage_diff: Bounds,
    /// Bonus at the start (`min`) and end (`max`) of the lead range.
    ///
    /// `min` is the largest bonus: a campaign that is behind gets the most.
    pub reward_multiplier: Bounds,
    /// Return the full bonus outside the auction closing period.
    #[serde(default)]
    pub gate_on_auction_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BsxConfig {
    /// Total BSX allocated to the crowdloan, in base units.
    pub allocated: Decimal,
    /// Multiplier before (`min`) and at the end (`max`) of the closing period.
    pub reward_multiplier: Bounds,
}

/// Exchange rates used to express rewards in other currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceConfig {
    pub ksm_to_usd: Decimal,
    pub hdx_to_usd: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IncentiveConfig {
    /// Fractional digits kept by intermediate rounding.
    pub precision: u32,
    /// The auction the home campaign bids for.
    pub target_auction_id: u32,
    /// Staking yield a contributor gives up by locking KSM.
    pub opportunity_cost: Decimal,
    pub hdx: HdxConfig,
    pub bsx: BsxConfig,
    pub prices: PriceConfig,
    /// Past auction schedule, ordered by id.
    pub historical_auctions: Vec<Auction>,
}

impl Default for IncentiveConfig {
    fn default() -> Self {
        Self {
            precision: 12,
            target_auction_id: TARGET_AUCTION_ID,
            opportunity_cost: Decimal::new(1375, 4),
            hdx: HdxConfig {
                lead_percentage_diff: Bounds::new(Decimal::ZERO, Decimal::new(1, 1)),
                reward_multiplier: Bounds::new(Decimal::from(30), Decimal::from(5)),
                gate_on_auction_closing: false,
            },
            bsx: BsxConfig {
                // 15bn with 12 decimals
                allocated: Decimal::from_i128_with_scale(15_000_000_000_000_000_000_000, 0),
                reward_multiplier: Bounds::new(Decimal::ONE, Decimal::ZERO),
            },
            prices: PriceConfig {
                ksm_to_usd: Decimal::new(20520, 2),
                hdx_to_usd: Decimal::new(859, 4),
            },
            historical_auctions: HISTORICAL_AUCTIONS.to_vec(),
        }
    }
}

impl IncentiveConfig {
    /// Check every invariant the policies rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_DECIMAL_PRECISION {
            return Err(ConfigError::Precision {
                got: self.precision,
                max: MAX_DECIMAL_PRECISION,
            });
        }

        let lead = self.hdx.lead_percentage_diff;
        if lead.min == lead.max {
            return Err(ConfigError::Scale {
                name: "hdx.lead_percentage_diff",
                source: ScaleError::DegenerateDomain(lead.min.to_string()),
            });
        }
        if lead.min.is_sign_negative() {
            return Err(ConfigError::Negative { name: "hdx.lead_percentage_diff" });
        }
        if lead.max < lead.min {
            return Err(ConfigError::InvertedRange {
                name: "hdx.lead_percentage_diff",
                min: lead.min.to_string(),
                max: lead.max.to_string(),
            });
        }
        let hdx = self.hdx.reward_multiplier;
        if hdx.min.is_sign_negative() || hdx.max.is_sign_negative() {
            return Err(ConfigError::Negative { name: "hdx.reward_multiplier" });
        }
        let bsx = self.bsx.reward_multiplier;
        if bsx.min.is_sign_negative() || bsx.max.is_sign_negative() {
            return Err(ConfigError::Negative { name: "bsx.reward_multiplier" });
        }
        if bsx.min.is_zero() {
            // The minimum reward divides by it.
            return Err(ConfigError::NotPositive { name: "bsx.reward_multiplier.min" });
        }
        if self.bsx.allocated.is_sign_negative() {
            return Err(ConfigError::Negative { name: "bsx.allocated" });
        }
        if self.opportunity_cost.is_sign_negative() {
            return Err(ConfigError::Negative { name: "opportunity_cost" });
        }
        if self.prices.ksm_to_usd <= Decimal::ZERO {
            return Err(ConfigError::NotPositive { name: "prices.ksm_to_usd" });
        }
        if self.prices.hdx_to_usd <= Decimal::ZERO {
            return Err(ConfigError::NotPositive { name: "prices.hdx_to_usd" });
        }

        validate_auctions(&self.historical_auctions)
    }
}

/// Auctions must be well-formed, ordered by id and must not overlap.
fn validate_auctions(auctions: &[Auction]) -> Result<(), ConfigError> {
    for auction in auctions {
        if auction.block_num > auction.closing_start {
            return Err(ConfigError::InvalidAuction {
                id: auction.id,
                reason: "closing starts before the auction opens".into(),
            });
        }
        if auction.closing_start > auction.closing_end {
            return Err(ConfigError::InvalidAuction {
                id: auction.id,
                reason: "closing ends before it starts".into(),
            });
        }
    }
    for pair in auctions.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.id >= b.id {
            return Err(ConfigError::InvalidAuction {
                id: b.id,
                reason: format!("not ordered after auction {}", a.id),
            });
        }
        if a.closing_end > b.block_num {
            return Err(ConfigError::OverlappingAuctions { first: a.id, second: b.id });
        }
    }
    Ok(())
}
