//! Reward aggregation.
//!
//! Turns an account's contribution weight into BSX estimates and its
//! contributions plus historical HDX bonuses into an HDX estimate. All
//! results are in base units.

use rust_decimal::Decimal;

use crowdloan_core::constants::HDX_BONUS_DIVISOR;
use crowdloan_core::error::{IncentiveError, IncompleteInputError};
use crowdloan_core::fixed_point::{add, div, mul};
use crowdloan_core::types::{Contribution, HistoricalIncentives};

/// BSX received if the crowdloan fills to `cap` at the full multiplier.
///
/// `allocated / (cap * full_multiplier) * weight`
pub fn minimum_bsx_reward(
    allocated: Decimal,
    cap: Decimal,
    full_multiplier: Decimal,
    account_weight: Decimal,
) -> Result<Decimal, IncentiveError> {
    let per_weight = div(allocated, mul(cap, full_multiplier)?)?;
    Ok(mul(per_weight, account_weight)?)
}

/// BSX received at the present pro-rata share.
///
/// `allocated / total_weight * weight`, or zero while nobody has contributed.
pub fn current_bsx_reward(
    allocated: Decimal,
    total_contribution_weight: Decimal,
    account_weight: Decimal,
) -> Result<Decimal, IncentiveError> {
    if total_contribution_weight.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let per_weight = div(allocated, total_contribution_weight)?;
    Ok(mul(per_weight, account_weight)?)
}

/// HDX reward of a single contribution, denominated in KSM.
///
/// `amount * opportunity_cost * hdx_bonus / 100`
pub fn contribution_hdx_reward(
    amount: Decimal,
    opportunity_cost: Decimal,
    hdx_bonus: Decimal,
) -> Result<Decimal, IncentiveError> {
    let reward = mul(mul(amount, opportunity_cost)?, hdx_bonus)?;
    Ok(div(reward, Decimal::from(HDX_BONUS_DIVISOR))?)
}

/// Total HDX reward, denominated in KSM.
///
/// Every contribution needs its historical bonus. A missing one means the
/// reconstruction has not caught up yet, so the estimate is not ready.
pub fn hdx_reward(
    contributions: &[Contribution],
    historical: &HistoricalIncentives,
    opportunity_cost: Decimal,
) -> Result<Decimal, IncentiveError> {
    contributions
        .iter()
        .try_fold(Decimal::ZERO, |total, c| -> Result<Decimal, IncentiveError> {
            let bonus = historical
                .hdx_bonus(c.block_height)
                .ok_or(IncompleteInputError::HistoricalIncentive(c.block_height))?;
            Ok(add(total, contribution_hdx_reward(c.amount, opportunity_cost, bonus)?)?)
        })
}
