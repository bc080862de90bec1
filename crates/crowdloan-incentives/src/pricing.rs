//! KSM/USD/HDX conversion and KSM price history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crowdloan_core::constants::BASE_UNIT_DECIMALS;
use crowdloan_core::error::ArithmeticError;
use crowdloan_core::fixed_point::{div, mul, round_to};

/// Value of a KSM amount in USD.
pub fn ksm_to_usd(amount: Decimal, ksm_price: Decimal) -> Result<Decimal, ArithmeticError> {
    Ok(round_to(mul(amount, ksm_price)?, BASE_UNIT_DECIMALS))
}

/// HDX bought by a USD amount.
pub fn usd_to_hdx(amount: Decimal, hdx_price: Decimal) -> Result<Decimal, ArithmeticError> {
    Ok(round_to(div(amount, hdx_price)?, BASE_UNIT_DECIMALS))
}

/// A KSM price observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    /// USD per KSM.
    pub price: Decimal,
}

/// KSM/USD observations ordered by time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl From<Vec<PricePoint>> for PriceHistory {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

impl From<PriceHistory> for Vec<PricePoint> {
    fn from(history: PriceHistory) -> Self {
        history.points
    }
}

impl PriceHistory {
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price of the last observation at or before `at`.
    pub fn closest_before(&self, at: DateTime<Utc>) -> Option<Decimal> {
        let idx = self.points.partition_point(|p| p.timestamp <= at);
        idx.checked_sub(1).map(|i| self.points[i].price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 11, 1, hour, 0, 0).unwrap()
    }

    fn history() -> PriceHistory {
        PriceHistory::new(vec![
            PricePoint { timestamp: at(2), price: Decimal::from(210) },
            PricePoint { timestamp: at(0), price: Decimal::from(200) },
            PricePoint { timestamp: at(1), price: Decimal::from(205) },
        ])
    }

    #[test]
    fn ksm_to_usd_multiplies() {
        assert_eq!(
            ksm_to_usd(Decimal::from(2), Decimal::new(20520, 2)).unwrap(),
            Decimal::new(41040, 2)
        );
    }

    #[test]
    fn usd_to_hdx_divides() {
        assert_eq!(
            usd_to_hdx(Decimal::new(859, 4), Decimal::new(859, 4)).unwrap(),
            Decimal::ONE
        );
    }

    #[test]
    fn usd_to_hdx_zero_price() {
        assert_eq!(
            usd_to_hdx(Decimal::ONE, Decimal::ZERO),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn closest_before_picks_previous_point() {
        let h = history();
        assert_eq!(h.closest_before(at(1) + chrono::Duration::minutes(30)), Some(Decimal::from(205)));
    }

    #[test]
    fn closest_before_exact_match() {
        assert_eq!(history().closest_before(at(2)), Some(Decimal::from(210)));
    }

    #[test]
    fn closest_before_earliest_is_none() {
        let h = history();
        assert_eq!(h.closest_before(at(0) - chrono::Duration::seconds(1)), None);
        assert_eq!(PriceHistory::default().closest_before(at(0)), None);
    }

    #[test]
    fn deserialized_history_is_sorted() {
        let json = r#"[
            { "timestamp": "2021-11-01T02:00:00Z", "price": "210" },
            { "timestamp": "2021-11-01T00:00:00Z", "price": "200" }
        ]"#;
        let h: PriceHistory = serde_json::from_str(json).unwrap();
        assert_eq!(h.closest_before(at(1)), Some(Decimal::from(200)));
    }

    #[test]
    fn history_sorted_on_construction() {
        let h = history();
        assert_eq!(h.len(), 3);
        assert_eq!(h.closest_before(at(0)), Some(Decimal::from(200)));
    }
}
