//! Human-readable figures.
//!
//! Engine outputs stay in base units. These views shift KSM, BSX and HDX
//! amounts into whole tokens for the report and the CLI.

use rust_decimal::Decimal;
use serde::Serialize;

use crowdloan_core::constants::BASE_UNIT_DECIMALS;
use crowdloan_core::error::ArithmeticError;
use crowdloan_core::fixed_point::from_base_units;
use crowdloan_core::types::{CampaignState, RewardEstimate};
use crowdloan_incentives::Estimate;

use crate::dashboard::EstimateView;

/// Whole tokens from base units. KSM, BSX and HDX all carry 12 decimals.
pub fn tokens(base: Decimal) -> Result<Decimal, ArithmeticError> {
    from_base_units(base, BASE_UNIT_DECIMALS)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    pub parachain_id: String,
    /// KSM.
    pub raised: Decimal,
    /// KSM.
    pub cap: Decimal,
    pub block_num: u64,
}

impl TryFrom<&CampaignState> for CampaignView {
    type Error = ArithmeticError;

    fn try_from(c: &CampaignState) -> Result<Self, Self::Error> {
        Ok(Self {
            parachain_id: c.parachain_id.clone(),
            raised: tokens(c.raised)?,
            cap: tokens(c.cap)?,
            block_num: c.block_num,
        })
    }
}

/// `estimate` with BSX and HDX figures in whole tokens.
pub fn reward_view(
    estimate: Estimate<RewardEstimate>,
) -> Result<EstimateView<RewardEstimate>, ArithmeticError> {
    Ok(match estimate {
        Estimate::Ready(r) => EstimateView::Ready {
            value: RewardEstimate {
                minimal_bsx_received: tokens(r.minimal_bsx_received)?,
                current_bsx_received: tokens(r.current_bsx_received)?,
                current_hdx_received: tokens(r.current_hdx_received)?,
            },
        },
        Estimate::Pending(missing) => Estimate::<RewardEstimate>::Pending(missing).into(),
    })
}

pub fn amount_view(estimate: Estimate<Decimal>) -> Result<EstimateView<Decimal>, ArithmeticError> {
    Ok(match estimate {
        Estimate::Ready(v) => EstimateView::Ready { value: tokens(v)? },
        Estimate::Pending(missing) => Estimate::<Decimal>::Pending(missing).into(),
    })
}
