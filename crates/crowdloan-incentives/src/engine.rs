//! Incentive engine.
//!
//! [`IncentiveEngine`] owns a validated [`IncentiveConfig`] and the policies
//! built from it. Every method is a pure function of its arguments and the
//! configuration, so the engine can be shared freely and called on every
//! state change.

use rust_decimal::Decimal;
use tracing::debug;

use crowdloan_core::config::IncentiveConfig;
use crowdloan_core::constants::{BASE_UNIT_DECIMALS, NO_ACTIVE_AUCTION};
use crowdloan_core::error::{ConfigError, IncentiveError, IncompleteInputError};
use crowdloan_core::fixed_point::{add, round_to, to_base_units};
use crowdloan_core::types::{
    AggregatedBalance, AuctionContext, CampaignState, Chronicle, Contribution,
    HistoricalIncentive, HistoricalIncentives, LiveIncentives, RewardEstimate, SiblingCandidate,
};

use crate::aggregator::{contribution_hdx_reward, current_bsx_reward, hdx_reward, minimum_bsx_reward};
use crate::bsx::BsxPolicy;
use crate::hdx::HdxPolicy;
use crate::historical::{HistoricalReconstructor, active_auction_id, select_sibling};
use crate::pricing::{PriceHistory, ksm_to_usd, usd_to_hdx};
use crate::weighting::contribution_weight;

/// Result of a derivation that may still be waiting for upstream data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Estimate<T> {
    Ready(T),
    /// Some input is not loaded yet; showing a number now would be wrong.
    Pending(IncompleteInputError),
}

impl<T> Estimate<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Pending(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Turn "input missing" errors into [`Estimate::Pending`].
fn defer<T>(result: Result<T, IncentiveError>) -> Result<Estimate<T>, IncentiveError> {
    match result {
        Ok(v) => Ok(Estimate::Ready(v)),
        Err(IncentiveError::Incomplete(missing)) => Ok(Estimate::Pending(missing)),
        Err(e) => Err(e),
    }
}

/// Everything needed to estimate one account's rewards.
#[derive(Debug, Clone, Copy)]
pub struct RewardInputs<'a> {
    pub chronicle: Option<&'a Chronicle>,
    pub own: Option<&'a CampaignState>,
    pub contributions: &'a [Contribution],
    pub historical: &'a HistoricalIncentives,
    pub total_contribution_weight: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct IncentiveEngine {
    config: IncentiveConfig,
    bsx: BsxPolicy,
    hdx: HdxPolicy,
}

impl IncentiveEngine {
    /// Validate `config` and build the policies.
    pub fn new(config: IncentiveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let hdx = HdxPolicy::new(&config.hdx).map_err(|source| ConfigError::Scale {
            name: "hdx.lead_percentage_diff",
            source,
        })?;
        let bsx = BsxPolicy::new(&config.bsx, config.target_auction_id);
        Ok(Self { config, bsx, hdx })
    }

    pub fn config(&self) -> &IncentiveConfig {
        &self.config
    }

    pub fn bsx_multiplier(
        &self,
        block_height: u64,
        auction: &AuctionContext,
    ) -> Result<Decimal, IncentiveError> {
        self.bsx.multiplier(block_height, auction)
    }

    pub fn hdx_bonus(
        &self,
        sibling: Decimal,
        own: Decimal,
        is_auction_closing: bool,
    ) -> Result<Decimal, IncentiveError> {
        self.hdx.bonus(sibling, own, is_auction_closing)
    }

    pub fn contribution_weight(
        &self,
        contributions: &[Contribution],
        auction: &AuctionContext,
    ) -> Result<Decimal, IncentiveError> {
        contribution_weight(contributions, &self.bsx, auction, self.config.precision)
    }

    pub fn minimum_bsx_reward(
        &self,
        cap: Decimal,
        account_weight: Decimal,
    ) -> Result<Decimal, IncentiveError> {
        minimum_bsx_reward(self.config.bsx.allocated, cap, self.bsx.full(), account_weight)
    }

    pub fn current_bsx_reward(
        &self,
        total_contribution_weight: Decimal,
        account_weight: Decimal,
    ) -> Result<Decimal, IncentiveError> {
        current_bsx_reward(self.config.bsx.allocated, total_contribution_weight, account_weight)
    }

    pub fn hdx_reward(
        &self,
        contributions: &[Contribution],
        historical: &HistoricalIncentives,
    ) -> Result<Decimal, IncentiveError> {
        hdx_reward(contributions, historical, self.config.opportunity_cost)
    }

    /// Id of the historical auction running at `block`, `0` for none.
    pub fn active_auction_id(&self, block: u64) -> Result<u32, IncentiveError> {
        Ok(active_auction_id(&self.config.historical_auctions, block)?)
    }

    /// The rival the home crowdloan currently competes with.
    ///
    /// Only crowdloans that have not won any auction are considered.
    pub fn select_live_sibling<'a>(
        &self,
        candidates: &'a [SiblingCandidate],
        own_parachain_id: &str,
        cur_auction_id: Option<u32>,
    ) -> Option<&'a SiblingCandidate> {
        let open: Vec<&SiblingCandidate> = candidates
            .iter()
            .filter(|c| c.parachain_id != own_parachain_id && c.won_auction_id.is_none())
            .collect();
        select_sibling(
            open,
            cur_auction_id.unwrap_or(NO_ACTIVE_AUCTION),
            self.config.target_auction_id,
        )
    }

    /// HDX bonus at each of `block_heights`, replayed from historical balances.
    pub fn reconstruct(
        &self,
        block_heights: &[u64],
        own_parachain_id: &str,
        balances: &[AggregatedBalance],
    ) -> Result<HistoricalIncentives, IncentiveError> {
        HistoricalReconstructor {
            policy: &self.hdx,
            auctions: &self.config.historical_auctions,
            target_auction_id: self.config.target_auction_id,
            own_parachain_id,
        }
        .reconstruct(block_heights, balances)
    }

    /// The incentives a contribution made at the current block would get.
    pub fn live_incentives(
        &self,
        chronicle: Option<&Chronicle>,
        own: Option<&CampaignState>,
        sibling: Option<&CampaignState>,
    ) -> Result<Estimate<LiveIncentives>, IncentiveError> {
        defer(self.try_live_incentives(chronicle, own, sibling))
    }

    fn try_live_incentives(
        &self,
        chronicle: Option<&Chronicle>,
        own: Option<&CampaignState>,
        sibling: Option<&CampaignState>,
    ) -> Result<LiveIncentives, IncentiveError> {
        let chronicle = chronicle.ok_or(IncompleteInputError::Chronicle)?;
        let own = own.ok_or(IncompleteInputError::OwnCrowdloan)?;
        let sibling = sibling.ok_or(IncompleteInputError::SiblingCrowdloan)?;

        let bsx_multiplier =
            self.bsx_multiplier(chronicle.cur_block_num, &chronicle.auction_context())?;
        let hdx_bonus = self.hdx_bonus(sibling.raised, own.raised, chronicle.is_auction_closing())?;
        Ok(LiveIncentives { hdx_bonus, bsx_multiplier })
    }

    /// Minimum, current and HDX reward estimates for one account.
    pub fn derive_reward_estimate(
        &self,
        inputs: &RewardInputs<'_>,
    ) -> Result<Estimate<RewardEstimate>, IncentiveError> {
        defer(self.try_reward_estimate(inputs))
    }

    fn try_reward_estimate(&self, inputs: &RewardInputs<'_>) -> Result<RewardEstimate, IncentiveError> {
        let chronicle = inputs.chronicle.ok_or(IncompleteInputError::Chronicle)?;
        let own = inputs.own.ok_or(IncompleteInputError::OwnCrowdloan)?;
        let total_weight = inputs
            .total_contribution_weight
            .ok_or(IncompleteInputError::TotalContributionWeight)?;

        let weight = self.contribution_weight(inputs.contributions, &chronicle.auction_context())?;
        let estimate = RewardEstimate {
            minimal_bsx_received: self.minimum_bsx_reward(own.cap, weight)?,
            current_bsx_received: self.current_bsx_reward(total_weight, weight)?,
            current_hdx_received: self.hdx_reward(inputs.contributions, inputs.historical)?,
        };
        debug!(
            contributions = inputs.contributions.len(),
            %weight,
            minimal_bsx = %estimate.minimal_bsx_received,
            current_bsx = %estimate.current_bsx_received,
            current_hdx = %estimate.current_hdx_received,
            "derived reward estimate"
        );
        Ok(estimate)
    }

    /// Rewards for a hypothetical contribution of `amount` KSM at the current block.
    ///
    /// `amount` is rounded to whole base units first.
    pub fn preview_contribution(
        &self,
        account: &str,
        amount: Decimal,
        chronicle: Option<&Chronicle>,
        own: Option<&CampaignState>,
        sibling: Option<&CampaignState>,
        total_contribution_weight: Option<Decimal>,
    ) -> Result<Estimate<RewardEstimate>, IncentiveError> {
        let live = match self.live_incentives(chronicle, own, sibling)? {
            Estimate::Ready(live) => live,
            Estimate::Pending(missing) => return Ok(Estimate::Pending(missing)),
        };
        // live_incentives only succeeds with all three present.
        let (Some(chronicle), Some(sibling)) = (chronicle, sibling) else {
            return Ok(Estimate::Pending(IncompleteInputError::Chronicle));
        };

        let block_height = chronicle.cur_block_num;
        let contributions = [Contribution::new(
            account,
            to_base_units(round_to(amount, BASE_UNIT_DECIMALS), BASE_UNIT_DECIMALS)?,
            block_height,
        )];
        let historical: HistoricalIncentives = [HistoricalIncentive {
            block_height,
            hdx_bonus: live.hdx_bonus,
            sibling_parachain_id: sibling.parachain_id.clone(),
        }]
        .into_iter()
        .collect();

        self.derive_reward_estimate(&RewardInputs {
            chronicle: Some(chronicle),
            own,
            contributions: &contributions,
            historical: &historical,
            total_contribution_weight,
        })
    }

    /// Convert an HDX reward denominated in KSM into HDX at configured prices.
    pub fn hdx_in_ksm_to_hdx(&self, hdx_in_ksm: Decimal) -> Result<Decimal, IncentiveError> {
        let usd = ksm_to_usd(hdx_in_ksm, self.config.prices.ksm_to_usd)?;
        Ok(usd_to_hdx(usd, self.config.prices.hdx_to_usd)?)
    }

    /// HDX reward in HDX, valuing each contribution at the KSM price
    /// closest before it was made.
    pub fn hdx_reward_in_hdx(
        &self,
        contributions: &[Contribution],
        historical: &HistoricalIncentives,
        prices: &PriceHistory,
    ) -> Result<Estimate<Decimal>, IncentiveError> {
        defer(contributions.iter().try_fold(
            Decimal::ZERO,
            |total, c| -> Result<Decimal, IncentiveError> {
                let bonus = historical
                    .hdx_bonus(c.block_height)
                    .ok_or(IncompleteInputError::HistoricalIncentive(c.block_height))?;
                let created_at = c
                    .created_at
                    .ok_or(IncompleteInputError::ContributionTimestamp(c.block_height))?;
                let ksm_price = prices
                    .closest_before(created_at)
                    .ok_or_else(|| IncompleteInputError::KsmPrice(created_at.to_rfc3339()))?;

                let in_ksm = contribution_hdx_reward(c.amount, self.config.opportunity_cost, bonus)?;
                let usd = ksm_to_usd(in_ksm, ksm_price)?;
                Ok(add(total, usd_to_hdx(usd, self.config.prices.hdx_to_usd)?)?)
            },
        ))
    }
}
