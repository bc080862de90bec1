//! Historical incentive reconstruction.
//!
//! For each past contribution block this replays which auction was running,
//! which rival crowdloan the home campaign was measured against, and the HDX
//! bonus that followed from their valuations at that block.
//!
//! Steps per block:
//! 1. Find the auction whose `[block_num, closing_end)` contains the block
//!    (none -> [`NO_ACTIVE_AUCTION`]). Overlaps are a data fault.
//! 2. Drop rivals that had already won an earlier auction.
//! 3. Pick the richest remaining rival, or the second richest while the
//!    target auction has not started (the richest is expected to take the
//!    current slot).
//! 4. Apply [`HdxPolicy`] to the two valuations.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::debug;

use crowdloan_core::constants::NO_ACTIVE_AUCTION;
use crowdloan_core::error::{HistoricalDataError, IncentiveError};
use crowdloan_core::types::{
    AggregatedBalance, Auction, Contribution, HistoricalIncentive, HistoricalIncentives,
    SiblingCandidate,
};

use crate::hdx::HdxPolicy;

/// The auction running at `block`, if any.
pub fn active_auction_at(
    auctions: &[Auction],
    block: u64,
) -> Result<Option<&Auction>, HistoricalDataError> {
    let mut matches = auctions.iter().filter(|a| a.is_active_at(block));
    let first = matches.next();
    if let (Some(first), Some(second)) = (first, matches.next()) {
        return Err(HistoricalDataError::OverlappingAuctions {
            block,
            first: first.id,
            second: second.id,
        });
    }
    Ok(first)
}

/// Id of the auction running at `block`, or [`NO_ACTIVE_AUCTION`].
pub fn active_auction_id(auctions: &[Auction], block: u64) -> Result<u32, HistoricalDataError> {
    Ok(active_auction_at(auctions, block)?.map_or(NO_ACTIVE_AUCTION, |a| a.id))
}

/// Whether `candidate` had already secured a slot before `block`.
///
/// A win in an auction ordered before the active one counts, as does a win
/// in any scheduled auction that ended at or before `block` (which covers
/// blocks between auctions).
fn had_already_won(
    candidate: &SiblingCandidate,
    auctions: &[Auction],
    active_auction_id: u32,
    block: u64,
) -> bool {
    let Some(won) = candidate.won_auction_id else {
        return false;
    };
    if won == active_auction_id {
        return false;
    }
    won < active_auction_id
        || auctions
            .iter()
            .any(|a| a.id == won && a.closing_end <= block)
}

/// Rivals still competing at `block`.
pub fn eligible_siblings<'a>(
    candidates: &'a [SiblingCandidate],
    auctions: &[Auction],
    active_auction_id: u32,
    block: u64,
) -> Vec<&'a SiblingCandidate> {
    candidates
        .iter()
        .filter(|c| !had_already_won(c, auctions, active_auction_id, block))
        .collect()
}

/// The rival to compare against among `eligible`.
///
/// Ordered by valuation, highest first, ties broken by parachain id so the
/// choice is deterministic.
pub fn select_sibling<'a>(
    mut eligible: Vec<&'a SiblingCandidate>,
    active_auction_id: u32,
    target_auction_id: u32,
) -> Option<&'a SiblingCandidate> {
    eligible.sort_by(|a, b| {
        b.raised
            .cmp(&a.raised)
            .then_with(|| a.parachain_id.cmp(&b.parachain_id))
    });
    let index = if active_auction_id < target_auction_id { 1 } else { 0 };
    eligible.get(index).copied()
}

/// Distinct contribution heights not yet present in `known`, ascending.
pub fn missing_heights(contributions: &[Contribution], known: &HistoricalIncentives) -> Vec<u64> {
    contributions
        .iter()
        .map(|c| c.block_height)
        .filter(|h| !known.contains(*h))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Rebuilds the HDX bonus that applied at past blocks.
#[derive(Debug, Clone)]
pub struct HistoricalReconstructor<'a> {
    pub policy: &'a HdxPolicy,
    pub auctions: &'a [Auction],
    pub target_auction_id: u32,
    pub own_parachain_id: &'a str,
}

impl HistoricalReconstructor<'_> {
    /// Incentive at one block from the own valuation and the rivals' valuations.
    pub fn incentive_at(
        &self,
        block: u64,
        own_raised: Decimal,
        candidates: &[SiblingCandidate],
    ) -> Result<HistoricalIncentive, IncentiveError> {
        let active = active_auction_at(self.auctions, block)?;
        let active_id = active.map_or(NO_ACTIVE_AUCTION, |a| a.id);

        let eligible = eligible_siblings(candidates, self.auctions, active_id, block);
        let sibling = select_sibling(eligible, active_id, self.target_auction_id)
            .ok_or(HistoricalDataError::NoSiblingCandidate(block))?;

        let is_auction_closing = active.is_some_and(|a| a.is_closing_at(block));
        let hdx_bonus = self.policy.bonus(sibling.raised, own_raised, is_auction_closing)?;

        debug!(
            block,
            active_auction = active_id,
            sibling = %sibling.parachain_id,
            %hdx_bonus,
            "reconstructed historical incentive"
        );

        Ok(HistoricalIncentive {
            block_height: block,
            hdx_bonus,
            sibling_parachain_id: sibling.parachain_id.clone(),
        })
    }

    /// Incentives for every height in `block_heights`.
    ///
    /// `balances` holds every crowdloan's raised amount as of each height;
    /// the own crowdloan's entry is required at each one.
    pub fn reconstruct(
        &self,
        block_heights: &[u64],
        balances: &[AggregatedBalance],
    ) -> Result<HistoricalIncentives, IncentiveError> {
        let mut by_block: BTreeMap<u64, Vec<&AggregatedBalance>> = BTreeMap::new();
        for balance in balances {
            by_block.entry(balance.block_num).or_default().push(balance);
        }

        let heights: BTreeSet<u64> = block_heights.iter().copied().collect();
        let mut out = HistoricalIncentives::new();
        for block in heights {
            let at_block = by_block.get(&block).map(Vec::as_slice).unwrap_or_default();

            let own_raised = at_block
                .iter()
                .find(|b| b.parachain_id == self.own_parachain_id)
                .map(|b| b.raised)
                .ok_or(HistoricalDataError::MissingOwnBalance(block))?;

            let candidates: Vec<SiblingCandidate> = at_block
                .iter()
                .filter(|b| b.parachain_id != self.own_parachain_id)
                .map(|b| SiblingCandidate::from(*b))
                .collect();

            out.insert(self.incentive_at(block, own_raised, &candidates)?);
        }
        Ok(out)
    }
}

/// Historical incentives computed so far, keyed by block height.
///
/// A past block's incentive never changes, so only heights that are new
/// to the contribution set need computing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalIncentiveCache {
    incentives: HistoricalIncentives,
}

impl HistoricalIncentiveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heights of `contributions` that still need reconstructing.
    pub fn missing_heights(&self, contributions: &[Contribution]) -> Vec<u64> {
        missing_heights(contributions, &self.incentives)
    }

    pub fn extend(&mut self, computed: HistoricalIncentives) {
        for incentive in computed.iter() {
            self.incentives.insert(incentive.clone());
        }
    }

    pub fn incentives(&self) -> &HistoricalIncentives {
        &self.incentives
    }

    pub fn clear(&mut self) {
        self.incentives = HistoricalIncentives::new();
    }
}
