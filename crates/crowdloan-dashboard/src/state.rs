//! Dashboard state.
//!
//! Each slice of indexer data is a [`Loadable`] so the UI layer can tell
//! "not asked yet" apart from "in flight" and "arrived".

use std::mem;

use rust_decimal::Decimal;
use serde::Serialize;

use crowdloan_core::types::{
    CampaignState, Chronicle, Contribution, GlobalIncentives, HistoricalIncentives,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum Loadable<T> {
    NotLoaded,
    /// In flight; carries the last value that arrived, if any.
    Loading(Option<T>),
    Loaded(T),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::NotLoaded
    }
}

impl<T> Loadable<T> {
    /// The latest value, even while a reload is in flight.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(v) | Self::Loading(Some(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Mark as loading, keeping the previous value.
    pub(crate) fn start(&mut self) {
        let previous = match mem::take(self) {
            Self::NotLoaded => None,
            Self::Loading(v) => v,
            Self::Loaded(v) => Some(v),
        };
        *self = Self::Loading(previous);
    }
}

/// A connected account and what the indexer knows about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub address: String,
    /// Free KSM balance in base units.
    pub balance: Decimal,
    pub contributions: Vec<Contribution>,
}

/// Historical HDX bonuses for the connected account's contributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum HistoricalStatus {
    #[default]
    NotLoaded,
    Loaded(HistoricalIncentives),
    /// Reconstruction failed on inconsistent archive data.
    Unavailable(String),
}

impl HistoricalStatus {
    pub fn incentives(&self) -> Option<&HistoricalIncentives> {
        match self {
            Self::Loaded(h) => Some(h),
            _ => None,
        }
    }
}

/// A contribution sent through the contribute form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionReceipt {
    pub account: String,
    /// Human-readable KSM amount.
    pub amount: Decimal,
    pub block_height: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub chronicle: Loadable<Chronicle>,
    pub own: Loadable<CampaignState>,
    /// `Loaded(None)` when no rival crowdloan qualifies.
    pub sibling: Loadable<Option<CampaignState>>,
    /// Address chosen in the wallet, set before its data arrives.
    pub connected_account: Option<String>,
    pub account: Loadable<AccountData>,
    /// `Loaded(None)` until the indexer has computed the aggregates.
    pub incentives: Loadable<Option<GlobalIncentives>>,
    pub historical: HistoricalStatus,
    pub last_contribution: Option<ContributionReceipt>,
}

impl AppState {
    /// Whether any slice is currently being fetched.
    pub fn is_loading(&self) -> bool {
        self.chronicle.is_loading()
            || self.own.is_loading()
            || self.sibling.is_loading()
            || self.account.is_loading()
            || self.incentives.is_loading()
    }

    pub fn sibling_campaign(&self) -> Option<&CampaignState> {
        self.sibling.value().and_then(Option::as_ref)
    }

    pub fn contributions(&self) -> &[Contribution] {
        self.account.value().map_or(&[], |a| a.contributions.as_slice())
    }

    pub fn total_contribution_weight(&self) -> Option<Decimal> {
        self.incentives
            .value()
            .and_then(Option::as_ref)
            .map(|i| i.total_contribution_weight)
    }
}
