//! HDX bonus based on the home crowdloan's lead over its rival.
//!
//! Naming is inverted on purpose: `reward_multiplier.min` is the *largest*
//! bonus (paid while the campaign is behind or tied) and
//! `reward_multiplier.max` the smallest (paid once the lead reaches
//! `lead_percentage_diff.max`).

use rust_decimal::Decimal;

use crowdloan_core::config::{Bounds, HdxConfig};
use crowdloan_core::error::{IncentiveError, ScaleError};
use crowdloan_core::fixed_point::{div, mul, sub};

use crate::scale::LinearScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HdxPolicy {
    lead: Bounds,
    multiplier: Bounds,
    scale: LinearScale,
    gate_on_auction_closing: bool,
}

impl HdxPolicy {
    /// Build the policy, failing fast on a degenerate lead range.
    pub fn new(config: &HdxConfig) -> Result<Self, ScaleError> {
        let lead = config.lead_percentage_diff;
        let multiplier = config.reward_multiplier;
        let scale = LinearScale::new((lead.min, lead.max), (multiplier.min, multiplier.max))?;
        Ok(Self {
            lead,
            multiplier,
            scale,
            gate_on_auction_closing: config.gate_on_auction_closing,
        })
    }

    /// The largest bonus.
    pub fn full(&self) -> Decimal {
        self.multiplier.min
    }

    /// Fractional lead of `own` over `sibling`: `(sibling - own) / own * -1`.
    ///
    /// Only meaningful when `own > sibling`.
    pub fn lead_percentage_diff(sibling: Decimal, own: Decimal) -> Result<Decimal, IncentiveError> {
        Ok(mul(div(sub(sibling, own)?, own)?, Decimal::NEGATIVE_ONE)?)
    }

    /// HDX bonus for the given valuations.
    ///
    /// `is_auction_closing` only matters when the policy was configured
    /// with `gate_on_auction_closing`.
    pub fn bonus(
        &self,
        sibling: Decimal,
        own: Decimal,
        is_auction_closing: bool,
    ) -> Result<Decimal, IncentiveError> {
        if self.gate_on_auction_closing && !is_auction_closing {
            return Ok(self.full());
        }

        if own <= sibling {
            return Ok(self.full());
        }

        let lead = Self::lead_percentage_diff(sibling, own)?;
        if lead >= self.lead.max {
            return Ok(self.multiplier.max);
        }
        // Clamped rather than extrapolated below the range start, as the
        // earlier bonus policy did. Only reachable when `lead.min > 0`.
        if lead <= self.lead.min {
            return Ok(self.full());
        }

        Ok(self.scale.apply(lead)?)
    }
}
