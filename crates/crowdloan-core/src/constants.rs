//! Campaign constants. All KSM amounts are in base units (1 KSM = 10^12 base units).

use crate::types::Auction;

/// Fractional digits of a KSM base unit.
pub const BASE_UNIT_DECIMALS: u32 = 12;

/// One KSM in base units.
pub const KSM: u64 = 1_000_000_000_000;

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_DECIMAL_PRECISION: u32 = 28;

/// Sentinel auction id for "no auction active at this block".
pub const NO_ACTIVE_AUCTION: u32 = 0;

/// The auction the home campaign bids for.
pub const TARGET_AUCTION_ID: u32 = 4;

/// The HDX bonus is expressed as a whole percentage (`30` means `0.30`).
pub const HDX_BONUS_DIVISOR: u64 = 100;

/// Parachain id of the home crowdloan, as keyed by the indexer.
pub const OWN_PARACHAIN_ID: &str = "2007-Ekf4HssuTpYjmUEvzy9AAFuqpUcNm9AAkrMF1stTU6Mo1hR";

/// Block at which the home crowdloan was registered.
pub const OWN_CROWDLOAN_BLOCK_NUM: u64 = 8_204_581;

/// Expected block time in milliseconds.
pub const BLOCK_TIME_MS: u64 = 6_000;

/// Kusama parachain slot auctions 1 through 4.
///
/// Each auction opens at `block_num`, enters its closing period at
/// `closing_start` and ends at `closing_end`. The table is ordered by id
/// and the `[block_num, closing_end)` intervals do not overlap.
pub const HISTORICAL_AUCTIONS: [Auction; 4] = [
    Auction { id: 1, block_num: 7_924_237, closing_start: 7_951_237, closing_end: 8_023_773 },
    Auction { id: 2, block_num: 8_024_552, closing_start: 8_051_552, closing_end: 8_123_989 },
    Auction { id: 3, block_num: 8_124_516, closing_start: 8_151_516, closing_end: 8_223_516 },
    Auction { id: 4, block_num: 8_224_581, closing_start: 8_251_581, closing_end: 8_323_581 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ksm_matches_decimals() {
        assert_eq!(KSM, 10u64.pow(BASE_UNIT_DECIMALS));
    }

    #[test]
    fn historical_auctions_ordered_and_disjoint() {
        for pair in HISTORICAL_AUCTIONS.windows(2) {
            assert!(pair[0].id < pair[1].id);
            assert!(pair[0].closing_end <= pair[1].block_num);
        }
    }

    #[test]
    fn historical_auctions_well_formed() {
        for auction in &HISTORICAL_AUCTIONS {
            assert!(auction.block_num <= auction.closing_start);
            assert!(auction.closing_start <= auction.closing_end);
        }
    }

    #[test]
    fn target_auction_is_in_table() {
        assert!(HISTORICAL_AUCTIONS.iter().any(|a| a.id == TARGET_AUCTION_ID));
    }
}
