//! Property tests over the public engine API.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crowdloan_core::constants::KSM;
use crowdloan_tests::helpers::*;

// Inside auction 4, before its end.
const AUCTION_4: std::ops::Range<u64> = 8_224_581..8_323_581;

proptest! {
    #[test]
    fn reconstruction_is_idempotent(
        heights in prop::collection::vec(AUCTION_4, 1..20),
        own in 1u64..100_000,
        rival in 1u64..100_000,
    ) {
        let engine = engine_targeting(4);
        let balances: Vec<_> = heights
            .iter()
            .flat_map(|&h| {
                [
                    balance(OWN, h, ksm(own), None),
                    balance("2004-a", h, ksm(rival), None),
                ]
            })
            .collect();

        let first = engine.reconstruct(&heights, OWN, &balances).unwrap();
        let second = engine.reconstruct(&heights, OWN, &balances).unwrap();
        prop_assert_eq!(&first, &second);
        for h in &heights {
            prop_assert!(first.contains(*h));
        }
    }

    #[test]
    fn zero_total_weight_gives_zero_current_reward(weight in 0u64..1_000_000_000) {
        let engine = engine_targeting(4);
        let reward = engine.current_bsx_reward(Decimal::ZERO, Decimal::from(weight));
        prop_assert_eq!(reward, Ok(Decimal::ZERO));
    }

    #[test]
    fn bonus_stays_within_configured_range(own in 1u64..1_000_000, sibling in 0u64..1_000_000) {
        let engine = engine_targeting(4);
        let m = engine.config().hdx.reward_multiplier;
        let bonus = engine
            .hdx_bonus(Decimal::from(sibling), Decimal::from(own), false)
            .unwrap();
        prop_assert!(bonus <= m.min && bonus >= m.max, "bonus {} out of range", bonus);
    }

    #[test]
    fn weight_never_exceeds_amount_before_window_end(
        blocks in prop::collection::vec(0u64..8_323_581, 1..10),
    ) {
        let engine = engine_targeting(4);
        let ctx = auction(4, 8_251_581, 8_323_581);
        let contributions: Vec<_> = blocks.iter().map(|&b| contribution(Decimal::from(KSM), b)).collect();
        let weight = engine.contribution_weight(&contributions, &ctx).unwrap();
        prop_assert!(weight <= Decimal::from(KSM) * Decimal::from(blocks.len()));
        prop_assert!(weight > Decimal::ZERO);
    }
}
