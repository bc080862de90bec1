//! Data model shared by the incentive engine and the dashboard.
//!
//! Records come from the external indexer and are read-only here. All
//! amounts are `Decimal` values in KSM base units.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single contribution of an account to a crowdloan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub account: String,
    /// Contributed amount in base units.
    pub amount: Decimal,
    pub block_height: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parachain_id: Option<String>,
    /// Block timestamp, used to look up the KSM price at contribution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Contribution {
    pub fn new(account: impl Into<String>, amount: Decimal, block_height: u64) -> Self {
        Self {
            account: account.into(),
            amount,
            block_height,
            parachain_id: None,
            created_at: None,
        }
    }
}

/// A fundraising round with a fixed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub id: u32,
    /// Block at which the auction opened.
    pub block_num: u64,
    pub closing_start: u64,
    pub closing_end: u64,
}

impl Auction {
    /// Whether `block` lies within `[block_num, closing_end)`.
    pub fn is_active_at(&self, block: u64) -> bool {
        self.block_num <= block && block < self.closing_end
    }

    /// Whether `block` lies in the closing period.
    pub fn is_closing_at(&self, block: u64) -> bool {
        block >= self.closing_start
    }
}

/// The closing window of the auction currently running on chain.
///
/// Both bounds are absent while no auction is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAuction {
    #[serde(default)]
    pub block_num: Option<u64>,
    #[serde(default)]
    pub closing_start: Option<u64>,
    #[serde(default)]
    pub closing_end: Option<u64>,
}

/// The indexer's view of the chain head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chronicle {
    pub cur_block_num: u64,
    #[serde(default)]
    pub cur_auction_id: Option<u32>,
    #[serde(default)]
    pub cur_auction: CurrentAuction,
}

impl Chronicle {
    /// Auction fields needed by the BSX multiplier.
    pub fn auction_context(&self) -> AuctionContext {
        AuctionContext {
            cur_auction_id: self.cur_auction_id,
            closing_start: self.cur_auction.closing_start,
            closing_end: self.cur_auction.closing_end,
        }
    }

    /// Whether the current auction has entered its closing period.
    pub fn is_auction_closing(&self) -> bool {
        self.cur_auction
            .closing_start
            .is_some_and(|start| self.cur_block_num >= start)
    }
}

/// The auction state a BSX multiplier is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuctionContext {
    pub cur_auction_id: Option<u32>,
    pub closing_start: Option<u64>,
    pub closing_end: Option<u64>,
}

/// Funding state of one crowdloan campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignState {
    pub parachain_id: String,
    /// KSM raised, in base units.
    pub raised: Decimal,
    /// KSM cap, in base units.
    pub cap: Decimal,
    /// Block at which the crowdloan was registered.
    pub block_num: u64,
}

/// A rival crowdloan competing for a slot, with its current valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingCandidate {
    pub parachain_id: String,
    pub raised: Decimal,
    /// The auction this crowdloan won, if any.
    #[serde(default)]
    pub won_auction_id: Option<u32>,
}

/// Snapshot of a crowdloan's raised amount as of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedBalance {
    pub parachain_id: String,
    pub block_num: u64,
    pub raised: Decimal,
    #[serde(default)]
    pub won_auction_id: Option<u32>,
}

impl From<&AggregatedBalance> for SiblingCandidate {
    fn from(balance: &AggregatedBalance) -> Self {
        Self {
            parachain_id: balance.parachain_id.clone(),
            raised: balance.raised,
            won_auction_id: balance.won_auction_id,
        }
    }
}

/// The HDX bonus that applied at a past contribution block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalIncentive {
    pub block_height: u64,
    pub hdx_bonus: Decimal,
    pub sibling_parachain_id: String,
}

/// Historical incentives keyed by block height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalIncentives(BTreeMap<u64, HistoricalIncentive>);

impl HistoricalIncentives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, incentive: HistoricalIncentive) {
        self.0.insert(incentive.block_height, incentive);
    }

    pub fn get(&self, block_height: u64) -> Option<&HistoricalIncentive> {
        self.0.get(&block_height)
    }

    pub fn contains(&self, block_height: u64) -> bool {
        self.0.contains_key(&block_height)
    }

    pub fn hdx_bonus(&self, block_height: u64) -> Option<Decimal> {
        self.get(block_height).map(|i| i.hdx_bonus)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoricalIncentive> {
        self.0.values()
    }
}

impl FromIterator<HistoricalIncentive> for HistoricalIncentives {
    fn from_iter<I: IntoIterator<Item = HistoricalIncentive>>(iter: I) -> Self {
        let mut out = Self::new();
        for incentive in iter {
            out.insert(incentive);
        }
        out
    }
}

/// Reward estimates for one account. Amounts are in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEstimate {
    /// BSX received if the crowdloan fills to cap at the full multiplier.
    pub minimal_bsx_received: Decimal,
    /// BSX received at the present pro-rata share.
    pub current_bsx_received: Decimal,
    /// HDX reward, denominated in KSM.
    pub current_hdx_received: Decimal,
}

/// The incentives a contribution made right now would receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveIncentives {
    pub hdx_bonus: Decimal,
    pub bsx_multiplier: Decimal,
}

/// Campaign-wide incentive aggregates published by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalIncentives {
    /// Sum of contribution weights over all accounts.
    pub total_contribution_weight: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auction() -> Auction {
        Auction { id: 1, block_num: 100, closing_start: 150, closing_end: 200 }
    }

    #[test]
    fn auction_active_interval_is_half_open() {
        let a = auction();
        assert!(!a.is_active_at(99));
        assert!(a.is_active_at(100));
        assert!(a.is_active_at(199));
        assert!(!a.is_active_at(200));
    }

    #[test]
    fn auction_closing() {
        let a = auction();
        assert!(!a.is_closing_at(149));
        assert!(a.is_closing_at(150));
    }

    #[test]
    fn chronicle_closing_requires_start() {
        let mut c = Chronicle { cur_block_num: 500, ..Chronicle::default() };
        assert!(!c.is_auction_closing());
        c.cur_auction.closing_start = Some(400);
        assert!(c.is_auction_closing());
        c.cur_auction.closing_start = Some(600);
        assert!(!c.is_auction_closing());
    }

    #[test]
    fn historical_incentives_keyed_by_block() {
        let incentives: HistoricalIncentives = [
            HistoricalIncentive {
                block_height: 10,
                hdx_bonus: Decimal::from(30),
                sibling_parachain_id: "2004".into(),
            },
            HistoricalIncentive {
                block_height: 10,
                hdx_bonus: Decimal::from(5),
                sibling_parachain_id: "2004".into(),
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(incentives.len(), 1);
        assert_eq!(incentives.hdx_bonus(10), Some(Decimal::from(5)));
        assert_eq!(incentives.hdx_bonus(11), None);
    }

    #[test]
    fn contribution_deserializes_string_amounts() {
        let json = r#"{"account":"D5CV","amount":"1000000000000","blockHeight":8204600}"#;
        let c: Contribution = serde_json::from_str(json).unwrap();
        assert_eq!(c.amount, Decimal::from(1_000_000_000_000u64));
        assert_eq!(c.block_height, 8_204_600);
        assert!(c.created_at.is_none());
    }

    #[test]
    fn chronicle_deserializes_without_auction() {
        let c: Chronicle = serde_json::from_str(r#"{"curBlockNum":42}"#).unwrap();
        assert_eq!(c.cur_auction_id, None);
        assert_eq!(c.auction_context(), AuctionContext::default());
    }
}
