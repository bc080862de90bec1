//! Actions dispatched to the dashboard store.

use crowdloan_core::types::{CampaignState, Chronicle, GlobalIncentives, HistoricalIncentives};

use crate::state::{AccountData, ContributionReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadChronicle,
    SetChronicle(Chronicle),
    LoadOwnData,
    SetOwnData(CampaignState),
    LoadSiblingData,
    SetSiblingData(Option<CampaignState>),
    /// A wallet account was selected; its data starts loading.
    ConnectAccount(String),
    SetAccountData(AccountData),
    LoadIncentiveData,
    SetIncentiveData(Option<GlobalIncentives>),
    SetHistoricalIncentives(HistoricalIncentives),
    HistoricalIncentivesUnavailable(String),
    ContributionSubmitted(ContributionReceipt),
    Reset,
}

impl Action {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadChronicle => "load_chronicle",
            Self::SetChronicle(_) => "set_chronicle",
            Self::LoadOwnData => "load_own_data",
            Self::SetOwnData(_) => "set_own_data",
            Self::LoadSiblingData => "load_sibling_data",
            Self::SetSiblingData(_) => "set_sibling_data",
            Self::ConnectAccount(_) => "connect_account",
            Self::SetAccountData(_) => "set_account_data",
            Self::LoadIncentiveData => "load_incentive_data",
            Self::SetIncentiveData(_) => "set_incentive_data",
            Self::SetHistoricalIncentives(_) => "set_historical_incentives",
            Self::HistoricalIncentivesUnavailable(_) => "historical_incentives_unavailable",
            Self::ContributionSubmitted(_) => "contribution_submitted",
            Self::Reset => "reset",
        }
    }
}
