//! Shared test helpers for scenario and end-to-end tests.

use std::str::FromStr;

use rust_decimal::Decimal;

use crowdloan_core::config::IncentiveConfig;
use crowdloan_core::constants::KSM;
use crowdloan_core::types::{AggregatedBalance, AuctionContext, Contribution};
use crowdloan_dashboard::DashboardConfig;
use crowdloan_incentives::IncentiveEngine;

pub const OWN: &str = "2090-own";

/// Whole KSM in base units.
pub fn ksm(n: u64) -> Decimal {
    Decimal::from(n) * Decimal::from(KSM)
}

/// Parse a decimal literal. Panics on malformed input.
pub fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn contribution(amount: Decimal, block_height: u64) -> Contribution {
    Contribution::new("D5CV", amount, block_height)
}

pub fn auction(cur: u32, closing_start: u64, closing_end: u64) -> AuctionContext {
    AuctionContext {
        cur_auction_id: Some(cur),
        closing_start: Some(closing_start),
        closing_end: Some(closing_end),
    }
}

pub fn balance(id: &str, block_num: u64, raised: Decimal, won: Option<u32>) -> AggregatedBalance {
    AggregatedBalance {
        parachain_id: id.to_string(),
        block_num,
        raised,
        won_auction_id: won,
    }
}

/// Engine with default settings bidding for `target_auction_id`.
pub fn engine_targeting(target_auction_id: u32) -> IncentiveEngine {
    IncentiveEngine::new(IncentiveConfig {
        target_auction_id,
        ..IncentiveConfig::default()
    })
    .unwrap()
}

pub fn dashboard_config() -> DashboardConfig {
    DashboardConfig {
        own_parachain_id: OWN.to_string(),
        ..DashboardConfig::default()
    }
}

/// Indexer snapshot halfway through the closing period of auction 4.
///
/// Alice contributed 10 KSM during auction 3 and 10 KSM mid-closing of
/// auction 4. Rival "2004-a" trails the home crowdloan by 5% throughout;
/// "2001-b" won auction 3 and drops out of the race after it.
pub fn fixture_json() -> String {
    format!(
        r#"{{
  "chronicle": {{
    "curBlockNum": 8287581,
    "curAuctionId": 4,
    "curAuction": {{ "blockNum": 8224581, "closingStart": 8251581, "closingEnd": 8323581 }}
  }},
  "crowdloans": [
    {{ "parachainId": "{OWN}", "raised": "{own}", "cap": "{cap}", "blockNum": 8200000 }},
    {{ "parachainId": "2004-a", "raised": "{a}", "cap": "{cap}", "blockNum": 8000000 }},
    {{ "parachainId": "2001-b", "raised": "{b}", "cap": "{cap}", "blockNum": 7900000, "wonAuctionId": 3 }}
  ],
  "accounts": [{{
    "address": "alice",
    "balance": "{bal}",
    "contributions": [
      {{ "account": "alice", "amount": "{ten}", "blockHeight": 8210000, "createdAt": "2021-11-01T00:30:00Z" }},
      {{ "account": "alice", "amount": "{ten}", "blockHeight": 8287581, "createdAt": "2021-11-05T12:00:00Z" }}
    ]
  }}],
  "balanceSnapshots": [
    {{ "parachainId": "{OWN}", "blockNum": 8205000, "raised": "{own}" }},
    {{ "parachainId": "2004-a", "blockNum": 8205000, "raised": "{a}" }},
    {{ "parachainId": "2001-b", "blockNum": 8205000, "raised": "{b}" }},
    {{ "parachainId": "2001-b", "blockNum": 8223516, "raised": "{b}", "wonAuctionId": 3 }}
  ],
  "totalContributionWeight": {{ "{OWN}": "{total}" }},
  "ksmPrices": [
    {{ "timestamp": "2021-11-05T00:00:00Z", "price": "400" }},
    {{ "timestamp": "2021-11-01T00:00:00Z", "price": "200" }}
  ]
}}"#,
        own = ksm(1_000),
        a = ksm(950),
        b = ksm(2_000),
        cap = ksm(100_000),
        bal = ksm(3),
        ten = ksm(10),
        total = ksm(150),
    )
}
