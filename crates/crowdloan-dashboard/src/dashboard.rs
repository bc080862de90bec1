//! Dashboard orchestration.
//!
//! [`Dashboard`] pulls snapshots from an [`IncentiveDataSource`], feeds them
//! through the store as [`Action`]s and derives estimates from the resulting
//! state on demand.

use std::mem;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crowdloan_core::error::{DataSourceError, IncentiveError};
use crowdloan_core::traits::IncentiveDataSource;
use crowdloan_core::types::{GlobalIncentives, HistoricalIncentives, LiveIncentives, RewardEstimate};
use crowdloan_incentives::weighting::total_contributed;
use crowdloan_incentives::{Estimate, HistoricalIncentiveCache, IncentiveEngine, PriceHistory, RewardInputs};

use crate::action::Action;
use crate::config::DashboardConfig;
use crate::display::{CampaignView, reward_view, tokens};
use crate::error::DashboardError;
use crate::reducer::reduce;
use crate::state::{AccountData, AppState, ContributionReceipt, HistoricalStatus};

/// Serializable form of an [`Estimate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EstimateView<T> {
    Ready { value: T },
    Pending { reason: String },
}

impl<T> From<Estimate<T>> for EstimateView<T> {
    fn from(estimate: Estimate<T>) -> Self {
        match estimate {
            Estimate::Ready(value) => Self::Ready { value },
            Estimate::Pending(missing) => Self::Pending { reason: missing.to_string() },
        }
    }
}

/// Everything the dashboard shows, in one document.
///
/// Amounts are in whole KSM, BSX and HDX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub cur_block_num: Option<u64>,
    pub own: Option<CampaignView>,
    pub sibling: Option<CampaignView>,
    pub account: Option<String>,
    pub total_contributed: Option<Decimal>,
    pub live_incentives: EstimateView<LiveIncentives>,
    pub rewards: EstimateView<RewardEstimate>,
    pub historical: HistoricalStatus,
}

#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    engine: IncentiveEngine,
    state: AppState,
    cache: HistoricalIncentiveCache,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let engine = IncentiveEngine::new(config.incentives.clone())?;
        Ok(Self {
            config,
            engine,
            state: AppState::default(),
            cache: HistoricalIncentiveCache::new(),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn engine(&self) -> &IncentiveEngine {
        &self.engine
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "dispatch");
        self.state = reduce(mem::take(&mut self.state), action);
    }

    /// Select a wallet account. Its data is fetched on the next refresh.
    pub fn connect_account(&mut self, address: impl Into<String>) {
        self.dispatch(Action::ConnectAccount(address.into()));
    }

    /// Drop all state, including reconstructed history.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
        self.cache.clear();
    }

    /// Pull a full snapshot from `source`.
    ///
    /// Inconsistent archive data only marks the historical incentives
    /// unavailable; every other failure aborts the refresh.
    pub fn refresh<S: IncentiveDataSource>(&mut self, source: &S) -> Result<(), DashboardError> {
        let own_id = self.config.own_parachain_id.clone();

        self.dispatch(Action::LoadChronicle);
        let chronicle = source.chronicle()?;
        self.dispatch(Action::SetChronicle(chronicle));

        self.dispatch(Action::LoadOwnData);
        let own = source
            .campaign(&own_id)?
            .ok_or_else(|| DataSourceError::CrowdloanNotFound(own_id.clone()))?;
        self.dispatch(Action::SetOwnData(own));

        self.dispatch(Action::LoadSiblingData);
        let candidates = source.sibling_candidates(&own_id)?;
        let sibling_id = self
            .engine
            .select_live_sibling(&candidates, &own_id, chronicle.cur_auction_id)
            .map(|c| c.parachain_id.clone());
        let sibling = match sibling_id {
            Some(id) => source.campaign(&id)?,
            None => None,
        };
        self.dispatch(Action::SetSiblingData(sibling));

        self.dispatch(Action::LoadIncentiveData);
        let total = source
            .total_contribution_weight(&own_id)?
            .map(|total_contribution_weight| GlobalIncentives { total_contribution_weight });
        self.dispatch(Action::SetIncentiveData(total));

        if let Some(address) = self.state.connected_account.clone() {
            self.load_account(source, &address, &own_id)?;
        }

        info!(
            block = chronicle.cur_block_num,
            auction = ?chronicle.cur_auction_id,
            sibling = ?self.state.sibling_campaign().map(|s| s.parachain_id.as_str()),
            "dashboard refreshed"
        );
        Ok(())
    }

    fn load_account<S: IncentiveDataSource>(
        &mut self,
        source: &S,
        address: &str,
        own_id: &str,
    ) -> Result<(), DashboardError> {
        let contributions = source.contributions(address, own_id)?;
        let balance = source.account_balance(address)?;
        self.dispatch(Action::SetAccountData(AccountData {
            address: address.to_string(),
            balance,
            contributions,
        }));
        self.update_historical(source, own_id)
    }

    /// Reconstruct bonuses for contribution heights not seen before.
    fn update_historical<S: IncentiveDataSource>(
        &mut self,
        source: &S,
        own_id: &str,
    ) -> Result<(), DashboardError> {
        let missing = self.cache.missing_heights(self.state.contributions());
        if !missing.is_empty() {
            let balances = source.historical_balances(&missing)?;
            match self.engine.reconstruct(&missing, own_id, &balances) {
                Ok(computed) => {
                    debug!(heights = missing.len(), "reconstructed historical incentives");
                    self.cache.extend(computed);
                }
                Err(IncentiveError::Historical(e)) => {
                    warn!(error = %e, "historical incentives unavailable");
                    self.dispatch(Action::HistoricalIncentivesUnavailable(e.to_string()));
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
        let known = self.cache.incentives().clone();
        self.dispatch(Action::SetHistoricalIncentives(known));
        Ok(())
    }

    pub fn live_incentives(&self) -> Result<Estimate<LiveIncentives>, DashboardError> {
        Ok(self.engine.live_incentives(
            self.state.chronicle.value(),
            self.state.own.value(),
            self.state.sibling_campaign(),
        )?)
    }

    /// Reward estimate for the connected account.
    pub fn reward_estimate(&self) -> Result<Estimate<RewardEstimate>, DashboardError> {
        let empty = HistoricalIncentives::new();
        Ok(self.engine.derive_reward_estimate(&RewardInputs {
            chronicle: self.state.chronicle.value(),
            own: self.state.own.value(),
            contributions: self.state.contributions(),
            historical: self.state.historical.incentives().unwrap_or(&empty),
            total_contribution_weight: self.state.total_contribution_weight(),
        })?)
    }

    /// Estimate for contributing `amount` KSM right now.
    pub fn preview(&self, amount: Decimal) -> Result<Estimate<RewardEstimate>, DashboardError> {
        let account = self.state.connected_account.as_deref().unwrap_or_default();
        Ok(self.engine.preview_contribution(
            account,
            amount,
            self.state.chronicle.value(),
            self.state.own.value(),
            self.state.sibling_campaign(),
            self.state.total_contribution_weight(),
        )?)
    }

    /// HDX reward of the connected account in HDX, at historical KSM prices.
    pub fn hdx_reward_in_hdx(&self, prices: &PriceHistory) -> Result<Estimate<Decimal>, DashboardError> {
        let empty = HistoricalIncentives::new();
        Ok(self.engine.hdx_reward_in_hdx(
            self.state.contributions(),
            self.state.historical.incentives().unwrap_or(&empty),
            prices,
        )?)
    }

    /// Record a contribution sent from the contribute form.
    pub fn record_contribution(&mut self, amount: Decimal) -> Result<ContributionReceipt, DashboardError> {
        let account = self.state.connected_account.clone().ok_or(DashboardError::NoAccount)?;
        let block_height = self
            .state
            .chronicle
            .value()
            .map(|c| c.cur_block_num)
            .ok_or(DashboardError::NoChronicle)?;
        let receipt = ContributionReceipt { account, amount, block_height };
        info!(account = %receipt.account, %amount, block_height, "contribution submitted");
        self.dispatch(Action::ContributionSubmitted(receipt.clone()));
        Ok(receipt)
    }

    pub fn report(&self) -> Result<Report, DashboardError> {
        let total_contributed = match self.state.account.value() {
            Some(a) => Some(tokens(total_contributed(&a.contributions)?)?),
            None => None,
        };
        Ok(Report {
            cur_block_num: self.state.chronicle.value().map(|c| c.cur_block_num),
            own: self.state.own.value().map(CampaignView::try_from).transpose()?,
            sibling: self.state.sibling_campaign().map(CampaignView::try_from).transpose()?,
            account: self.state.connected_account.clone(),
            total_contributed,
            live_incentives: self.live_incentives()?.into(),
            rewards: reward_view(self.reward_estimate()?)?,
            historical: self.state.historical.clone(),
        })
    }
}
