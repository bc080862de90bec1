//! Contribution weighting.
//!
//! Each contribution is weighted by the BSX multiplier that applied at its
//! own block height, not at the current block. The running sum is rounded
//! to the configured precision after every step, which matches the
//! weights the indexer publishes.

use rust_decimal::Decimal;

use crowdloan_core::error::IncentiveError;
use crowdloan_core::fixed_point::{add, mul, round_to};
use crowdloan_core::types::{AuctionContext, Contribution};

use crate::bsx::BsxPolicy;

/// `Σ amount * bsx_multiplier(block_height)`, rounded at each step.
pub fn contribution_weight(
    contributions: &[Contribution],
    policy: &BsxPolicy,
    auction: &AuctionContext,
    precision: u32,
) -> Result<Decimal, IncentiveError> {
    contributions
        .iter()
        .try_fold(Decimal::ZERO, |weight, contribution| -> Result<Decimal, IncentiveError> {
            let multiplier = policy.multiplier(contribution.block_height, auction)?;
            let weighted = mul(contribution.amount, multiplier)?;
            Ok(round_to(add(weight, weighted)?, precision))
        })
}

/// Plain sum of contributed amounts, in base units.
pub fn total_contributed(contributions: &[Contribution]) -> Result<Decimal, IncentiveError> {
    contributions
        .iter()
        .try_fold(Decimal::ZERO, |total, c| -> Result<Decimal, IncentiveError> {
            Ok(add(total, c.amount)?)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdloan_core::config::IncentiveConfig;
    use crowdloan_core::constants::KSM;

    fn policy() -> BsxPolicy {
        BsxPolicy::new(&IncentiveConfig::default().bsx, 1)
    }

    fn ctx() -> AuctionContext {
        AuctionContext {
            cur_auction_id: Some(1),
            closing_start: Some(200),
            closing_end: Some(300),
        }
    }

    fn contribution(amount: u64, block_height: u64) -> Contribution {
        Contribution::new("D5CV", Decimal::from(amount), block_height)
    }

    #[test]
    fn empty_contributions_weigh_nothing() {
        assert_eq!(contribution_weight(&[], &policy(), &ctx(), 12).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn contribution_before_closing_has_full_weight() {
        let cs = [contribution(KSM, 100)];
        assert_eq!(
            contribution_weight(&cs, &policy(), &ctx(), 12).unwrap(),
            Decimal::from(KSM)
        );
    }

    #[test]
    fn each_contribution_uses_its_own_block() {
        let cs = [contribution(KSM, 100), contribution(KSM, 250), contribution(KSM, 300)];
        // 1 + 0.5 + 0
        assert_eq!(
            contribution_weight(&cs, &policy(), &ctx(), 12).unwrap(),
            Decimal::from(KSM + KSM / 2)
        );
    }

    #[test]
    fn partial_sums_are_rounded() {
        // Multiplier at 201 over [200, 300] is 0.99, so each contribution weighs 2.97.
        // At precision 1: 2.97 -> 3.0, then 3.0 + 2.97 -> 6.0 (rounding only at the end gives 5.9).
        let cs = [contribution(3, 201), contribution(3, 201)];
        assert_eq!(
            contribution_weight(&cs, &policy(), &ctx(), 1).unwrap(),
            Decimal::from(6)
        );
        assert_eq!(
            contribution_weight(&cs, &policy(), &ctx(), 2).unwrap(),
            Decimal::new(594, 2)
        );
    }

    #[test]
    fn total_contributed_sums_amounts() {
        let cs = [contribution(KSM, 100), contribution(2 * KSM, 250)];
        assert_eq!(total_contributed(&cs).unwrap(), Decimal::from(3 * KSM));
        assert_eq!(total_contributed(&[]).unwrap(), Decimal::ZERO);
    }
}
