//! End-to-end tests: fixture file -> dashboard refresh -> estimates.

use std::io::Write;

use crowdloan_core::error::{HistoricalDataError, IncompleteInputError};
use crowdloan_dashboard::{Dashboard, FixtureSource, HistoricalStatus};
use crowdloan_incentives::Estimate;
use crowdloan_tests::helpers::*;

/// Write `json` to a temp file and load it back as a fixture source.
fn load(json: &str) -> (FixtureSource, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    let source = FixtureSource::from_path(file.path()).unwrap();
    (source, file)
}

fn refreshed(json: &str, account: Option<&str>) -> Dashboard {
    let (source, _file) = load(json);
    let mut dashboard = Dashboard::new(dashboard_config()).unwrap();
    if let Some(a) = account {
        dashboard.connect_account(a);
    }
    dashboard.refresh(&source).unwrap();
    dashboard
}

#[test]
fn live_incentives_mid_closing() {
    let dashboard = refreshed(&fixture_json(), None);
    let live = dashboard.live_incentives().unwrap().ready().unwrap();
    assert_eq!(live.bsx_multiplier, d("0.5"));
    assert_eq!(live.hdx_bonus, d("17.5"));
    assert_eq!(
        dashboard.state().sibling_campaign().map(|s| s.parachain_id.as_str()),
        Some("2004-a")
    );
}

#[test]
fn full_reward_estimate() {
    let dashboard = refreshed(&fixture_json(), Some("alice"));

    let history = dashboard.state().historical.incentives().unwrap();
    assert_eq!(history.len(), 2);
    // auction 3 runner-up, then auction 4 leader among non-winners
    assert!(history.iter().all(|h| h.sibling_parachain_id == "2004-a"));

    let estimate = dashboard.reward_estimate().unwrap().ready().unwrap();
    assert_eq!(estimate.minimal_bsx_received, d("2250000000000000000"));
    assert_eq!(estimate.current_bsx_received, d("1500000000000000000000"));
    assert_eq!(estimate.current_hdx_received, d("481250000000"));
}

#[test]
fn hdx_reward_at_historical_prices() {
    let (source, _file) = load(&fixture_json());
    let mut dashboard = Dashboard::new(dashboard_config()).unwrap();
    dashboard.connect_account("alice");
    dashboard.refresh(&source).unwrap();

    let hdx = dashboard.hdx_reward_in_hdx(source.ksm_prices()).unwrap().ready().unwrap();
    // 0.240625 KSM at 200 USD plus 0.240625 KSM at 400 USD, at 0.0859 USD/HDX
    let expected = d("144375000000000") / d("0.0859");
    assert!((hdx - expected).abs() < d("0.000000000002"), "{hdx} vs {expected}");
}

#[test]
fn report_is_json_serializable() {
    let dashboard = refreshed(&fixture_json(), Some("alice"));
    let json = serde_json::to_value(dashboard.report().unwrap()).unwrap();
    assert_eq!(json["curBlockNum"], 8_287_581);
    assert_eq!(json["account"], "alice");
    assert_eq!(json["rewards"]["status"], "ready");
    assert_eq!(json["historical"]["status"], "loaded");
}

#[test]
fn no_qualifying_rival_downgrades_history() {
    let json = fixture_json().replace(
        r#"{ "parachainId": "2004-a", "blockNum": 8205000"#,
        r#"{ "parachainId": "2004-a", "blockNum": 8300000"#,
    );
    let dashboard = refreshed(&json, Some("alice"));

    // only "2001-b" raised by block 8210000, and auction 3 wants the runner-up
    let reason = HistoricalDataError::NoSiblingCandidate(8_210_000).to_string();
    assert_eq!(dashboard.state().historical, HistoricalStatus::Unavailable(reason));
    assert_eq!(
        dashboard.reward_estimate().unwrap(),
        Estimate::Pending(IncompleteInputError::HistoricalIncentive(8_210_000))
    );
    // live view is unaffected
    assert!(dashboard.live_incentives().unwrap().is_ready());
}

#[test]
fn unknown_account_has_nothing_to_estimate() {
    let dashboard = refreshed(&fixture_json(), Some("bob"));
    let estimate = dashboard.reward_estimate().unwrap().ready().unwrap();
    assert!(estimate.minimal_bsx_received.is_zero());
    assert!(estimate.current_hdx_received.is_zero());
}

#[test]
fn preview_matches_live_bonus() {
    let dashboard = refreshed(&fixture_json(), None);
    let preview = dashboard.preview(d("10")).unwrap().ready().unwrap();
    assert_eq!(preview.current_hdx_received, d("240625000000"));
}
