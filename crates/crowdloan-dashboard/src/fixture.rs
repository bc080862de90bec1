//! JSON fixture data source.
//!
//! A [`FixtureSource`] answers [`IncentiveDataSource`] queries from a static
//! snapshot of indexer data. Amounts are strings of KSM base units so no
//! precision is lost in JSON.
//!
//! ```json
//! {
//!   "chronicle": { "curBlockNum": 8300000, "curAuctionId": 4, "curAuction": { ... } },
//!   "crowdloans": [{ "parachainId": "2007-...", "raised": "1000", "cap": "2000", "blockNum": 1 }],
//!   "accounts": [{ "address": "D5CV...", "balance": "0", "contributions": [ ... ] }],
//!   "balanceSnapshots": [{ "parachainId": "2007-...", "blockNum": 10, "raised": "5" }],
//!   "totalContributionWeight": { "2007-...": "123" },
//!   "ksmPrices": [{ "timestamp": "2021-11-01T00:00:00Z", "price": "205.2" }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crowdloan_core::error::DataSourceError;
use crowdloan_core::traits::IncentiveDataSource;
use crowdloan_core::types::{
    AggregatedBalance, CampaignState, Chronicle, Contribution, SiblingCandidate,
};
use crowdloan_incentives::PriceHistory;

/// A crowdloan as the indexer currently sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCrowdloan {
    pub parachain_id: String,
    pub raised: Decimal,
    pub cap: Decimal,
    pub block_num: u64,
    #[serde(default)]
    pub won_auction_id: Option<u32>,
}

impl FixtureCrowdloan {
    fn campaign(&self) -> CampaignState {
        CampaignState {
            parachain_id: self.parachain_id.clone(),
            raised: self.raised,
            cap: self.cap,
            block_num: self.block_num,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureAccount {
    pub address: String,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

/// Raw fixture document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Fixture {
    pub chronicle: Option<Chronicle>,
    pub crowdloans: Vec<FixtureCrowdloan>,
    pub accounts: Vec<FixtureAccount>,
    /// Raised amount of a crowdloan as of `blockNum`.
    pub balance_snapshots: Vec<AggregatedBalance>,
    pub total_contribution_weight: BTreeMap<String, Decimal>,
    pub ksm_prices: PriceHistory,
}

#[derive(Debug, Clone)]
pub struct FixtureSource {
    fixture: Fixture,
    /// parachain id -> snapshot block -> snapshot
    snapshots: BTreeMap<String, BTreeMap<u64, AggregatedBalance>>,
}

impl FixtureSource {
    pub fn new(fixture: Fixture) -> Self {
        let mut snapshots: BTreeMap<String, BTreeMap<u64, AggregatedBalance>> = BTreeMap::new();
        for s in &fixture.balance_snapshots {
            snapshots
                .entry(s.parachain_id.clone())
                .or_default()
                .insert(s.block_num, s.clone());
        }
        Self { fixture, snapshots }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataSourceError> {
        let fixture: Fixture =
            serde_json::from_str(json).map_err(|e| DataSourceError::Malformed(e.to_string()))?;
        Ok(Self::new(fixture))
    }

    pub fn from_path(path: &Path) -> Result<Self, DataSourceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| DataSourceError::Unavailable(format!("{}: {e}", path.display())))?;
        let source = Self::from_json_str(&json)?;
        debug!(
            path = %path.display(),
            crowdloans = source.fixture.crowdloans.len(),
            accounts = source.fixture.accounts.len(),
            snapshots = source.fixture.balance_snapshots.len(),
            "loaded fixture"
        );
        Ok(source)
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub fn ksm_prices(&self) -> &PriceHistory {
        &self.fixture.ksm_prices
    }

    fn account(&self, address: &str) -> Option<&FixtureAccount> {
        self.fixture.accounts.iter().find(|a| a.address == address)
    }
}

impl IncentiveDataSource for FixtureSource {
    fn chronicle(&self) -> Result<Chronicle, DataSourceError> {
        self.fixture
            .chronicle
            .ok_or_else(|| DataSourceError::Unavailable("chronicle not indexed".into()))
    }

    fn campaign(&self, parachain_id: &str) -> Result<Option<CampaignState>, DataSourceError> {
        Ok(self
            .fixture
            .crowdloans
            .iter()
            .find(|c| c.parachain_id == parachain_id)
            .map(FixtureCrowdloan::campaign))
    }

    fn sibling_candidates(
        &self,
        own_parachain_id: &str,
    ) -> Result<Vec<SiblingCandidate>, DataSourceError> {
        Ok(self
            .fixture
            .crowdloans
            .iter()
            .filter(|c| c.parachain_id != own_parachain_id)
            .map(|c| SiblingCandidate {
                parachain_id: c.parachain_id.clone(),
                raised: c.raised,
                won_auction_id: c.won_auction_id,
            })
            .collect())
    }

    fn account_balance(&self, account: &str) -> Result<Decimal, DataSourceError> {
        Ok(self.account(account).map_or(Decimal::ZERO, |a| a.balance))
    }

    fn contributions(
        &self,
        account: &str,
        parachain_id: &str,
    ) -> Result<Vec<Contribution>, DataSourceError> {
        Ok(self
            .account(account)
            .map(|a| {
                a.contributions
                    .iter()
                    .filter(|c| c.parachain_id.as_deref().is_none_or(|p| p == parachain_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Each crowdloan's latest snapshot at or before each height. Crowdloans
    /// with no snapshot yet at a height are left out.
    fn historical_balances(
        &self,
        block_heights: &[u64],
    ) -> Result<Vec<AggregatedBalance>, DataSourceError> {
        let mut out = Vec::new();
        for &height in block_heights {
            for by_block in self.snapshots.values() {
                if let Some((_, snapshot)) = by_block.range(..=height).next_back() {
                    out.push(AggregatedBalance { block_num: height, ..snapshot.clone() });
                }
            }
        }
        Ok(out)
    }

    fn total_contribution_weight(
        &self,
        parachain_id: &str,
    ) -> Result<Option<Decimal>, DataSourceError> {
        Ok(self.fixture.total_contribution_weight.get(parachain_id).copied())
    }
}
