//! The dashboard store's state transition function.

use crate::action::Action;
use crate::state::{AppState, HistoricalStatus, Loadable};

/// Apply `action` to `state`.
///
/// Pure: the same state and action always give the same result.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::LoadChronicle => state.chronicle.start(),
        Action::SetChronicle(c) => state.chronicle = Loadable::Loaded(c),
        Action::LoadOwnData => state.own.start(),
        Action::SetOwnData(own) => state.own = Loadable::Loaded(own),
        Action::LoadSiblingData => state.sibling.start(),
        Action::SetSiblingData(sibling) => state.sibling = Loadable::Loaded(sibling),
        Action::ConnectAccount(address) => {
            let switched = state.connected_account.as_deref() != Some(address.as_str());
            state.connected_account = Some(address);
            // Another account's data and bonuses are useless for this one.
            if switched {
                state.account = Loadable::Loading(None);
                state.historical = HistoricalStatus::NotLoaded;
            } else {
                state.account.start();
            }
        }
        Action::SetAccountData(account) => state.account = Loadable::Loaded(account),
        Action::LoadIncentiveData => state.incentives.start(),
        Action::SetIncentiveData(i) => state.incentives = Loadable::Loaded(i),
        Action::SetHistoricalIncentives(h) => state.historical = HistoricalStatus::Loaded(h),
        Action::HistoricalIncentivesUnavailable(reason) => {
            state.historical = HistoricalStatus::Unavailable(reason)
        }
        Action::ContributionSubmitted(receipt) => state.last_contribution = Some(receipt),
        Action::Reset => return AppState::default(),
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AccountData, ContributionReceipt};
    use crowdloan_core::types::{Chronicle, GlobalIncentives, HistoricalIncentive, HistoricalIncentives};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn chronicle(block: u64) -> Chronicle {
        Chronicle { cur_block_num: block, ..Chronicle::default() }
    }

    fn account(address: &str) -> AccountData {
        AccountData { address: address.into(), balance: Decimal::ZERO, contributions: vec![] }
    }

    fn historical() -> HistoricalIncentives {
        [HistoricalIncentive {
            block_height: 1,
            hdx_bonus: Decimal::from(30),
            sibling_parachain_id: "2004".into(),
        }]
        .into_iter()
        .collect()
    }

    #[test]
    fn load_then_set_chronicle() {
        let s = reduce(AppState::default(), Action::LoadChronicle);
        assert!(s.chronicle.is_loading());
        assert!(s.is_loading());
        let s = reduce(s, Action::SetChronicle(chronicle(42)));
        assert_eq!(s.chronicle.value().map(|c| c.cur_block_num), Some(42));
        assert!(!s.is_loading());
    }

    #[test]
    fn reducer_is_deterministic() {
        let a = reduce(AppState::default(), Action::SetChronicle(chronicle(7)));
        let b = reduce(AppState::default(), Action::SetChronicle(chronicle(7)));
        assert_eq!(a, b);
    }

    #[test]
    fn reload_keeps_last_value_while_loading() {
        let s = reduce(AppState::default(), Action::SetIncentiveData(Some(GlobalIncentives {
            total_contribution_weight: Decimal::ONE,
        })));
        assert_eq!(s.total_contribution_weight(), Some(Decimal::ONE));
        let s = reduce(s, Action::LoadIncentiveData);
        assert!(s.incentives.is_loading());
        assert_eq!(s.total_contribution_weight(), Some(Decimal::ONE));
        let s = reduce(s, Action::SetIncentiveData(None));
        assert_eq!(s.total_contribution_weight(), None);
    }

    #[test]
    fn switching_account_clears_history() {
        let s = reduce(AppState::default(), Action::ConnectAccount("alice".into()));
        let s = reduce(s, Action::SetAccountData(account("alice")));
        let s = reduce(s, Action::SetHistoricalIncentives(historical()));
        let s = reduce(s, Action::ConnectAccount("bob".into()));
        assert_eq!(s.connected_account.as_deref(), Some("bob"));
        assert!(s.account.is_loading());
        assert!(s.account.value().is_none());
        assert_eq!(s.historical, HistoricalStatus::NotLoaded);
    }

    #[test]
    fn reconnecting_same_account_keeps_history() {
        let s = reduce(AppState::default(), Action::ConnectAccount("alice".into()));
        let s = reduce(s, Action::SetAccountData(account("alice")));
        let s = reduce(s, Action::SetHistoricalIncentives(historical()));
        let s = reduce(s, Action::ConnectAccount("alice".into()));
        assert_eq!(s.historical.incentives().map(HistoricalIncentives::len), Some(1));
    }

    #[test]
    fn unavailable_history_records_reason() {
        let s = reduce(
            AppState::default(),
            Action::HistoricalIncentivesUnavailable("overlapping auctions".into()),
        );
        assert_eq!(s.historical, HistoricalStatus::Unavailable("overlapping auctions".into()));
        assert!(s.historical.incentives().is_none());
    }

    #[test]
    fn contribution_submitted_is_recorded() {
        let receipt = ContributionReceipt {
            account: "alice".into(),
            amount: Decimal::from(5),
            block_height: 100,
        };
        let s = reduce(AppState::default(), Action::ContributionSubmitted(receipt.clone()));
        assert_eq!(s.last_contribution, Some(receipt));
    }

    #[test]
    fn reset_returns_initial_state() {
        let s = reduce(AppState::default(), Action::SetChronicle(chronicle(1)));
        let s = reduce(s, Action::SetSiblingData(None));
        assert_eq!(reduce(s, Action::Reset), AppState::default());
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        let address = prop::sample::select(vec!["alice", "bob"]).prop_map(String::from);
        prop_oneof![
            Just(Action::LoadChronicle),
            (0u64..1_000).prop_map(|b| Action::SetChronicle(chronicle(b))),
            Just(Action::LoadSiblingData),
            Just(Action::SetSiblingData(None)),
            address.clone().prop_map(Action::ConnectAccount),
            address.prop_map(|a| Action::SetAccountData(account(&a))),
            Just(Action::LoadIncentiveData),
            (0u64..1_000).prop_map(|w| Action::SetIncentiveData(Some(GlobalIncentives {
                total_contribution_weight: Decimal::from(w),
            }))),
            Just(Action::SetHistoricalIncentives(historical())),
            Just(Action::HistoricalIncentivesUnavailable("gap".into())),
            Just(Action::Reset),
        ]
    }

    proptest! {
        #[test]
        fn replaying_actions_is_deterministic(actions in prop::collection::vec(arb_action(), 0..32)) {
            let run = || actions.iter().cloned().fold(AppState::default(), reduce);
            prop_assert_eq!(run(), run());
        }

        #[test]
        fn load_never_loses_chronicle(actions in prop::collection::vec(arb_action(), 0..32)) {
            let state = actions.into_iter().fold(AppState::default(), reduce);
            let before = state.chronicle.value().cloned();
            let after = reduce(state, Action::LoadChronicle);
            prop_assert!(after.chronicle.is_loading());
            prop_assert_eq!(after.chronicle.value().cloned(), before);
        }
    }
}
