//! BSX reward multiplier.
//!
//! Contributions earn the full multiplier (`reward_multiplier.min`) until
//! the target auction enters its closing period. Across the closing window
//! the multiplier moves linearly towards `reward_multiplier.max`. Past
//! `closing_end` the line keeps going; nothing clamps it.

use rust_decimal::Decimal;

use crowdloan_core::config::{Bounds, BsxConfig};
use crowdloan_core::error::IncentiveError;
use crowdloan_core::types::AuctionContext;

use crate::scale::LinearScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsxPolicy {
    multiplier: Bounds,
    target_auction_id: u32,
}

impl BsxPolicy {
    pub fn new(config: &BsxConfig, target_auction_id: u32) -> Self {
        Self {
            multiplier: config.reward_multiplier,
            target_auction_id,
        }
    }

    /// The full multiplier, granted before the closing period.
    pub fn full(&self) -> Decimal {
        self.multiplier.min
    }

    /// Multiplier for a contribution made at `block_height`.
    pub fn multiplier(
        &self,
        block_height: u64,
        auction: &AuctionContext,
    ) -> Result<Decimal, IncentiveError> {
        // Not yet bidding for the target slot.
        match auction.cur_auction_id {
            Some(id) if id >= self.target_auction_id => {}
            _ => return Ok(self.full()),
        }

        // No auction registered, so no closing window either.
        let (Some(closing_start), Some(closing_end)) = (auction.closing_start, auction.closing_end)
        else {
            return Ok(self.full());
        };

        if block_height < closing_start {
            return Ok(self.full());
        }

        let scale = LinearScale::over_blocks(
            closing_start,
            closing_end,
            (self.multiplier.min, self.multiplier.max),
        )?;
        Ok(scale.apply(Decimal::from(block_height))?)
    }
}
