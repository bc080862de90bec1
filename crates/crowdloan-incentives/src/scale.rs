//! Linear mapping of a scalar domain onto a range.
//!
//! The scale never clamps. Policies check their boundaries explicitly
//! before calling [`LinearScale::apply`], so an input outside the domain is
//! extrapolated along the same line.

use rust_decimal::Decimal;

use crowdloan_core::error::{ArithmeticError, ScaleError};
use crowdloan_core::fixed_point::{add, div, mul, sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearScale {
    domain: (Decimal, Decimal),
    range: (Decimal, Decimal),
}

impl LinearScale {
    /// Build a scale from `domain` onto `range`.
    ///
    /// Fails with [`ScaleError::DegenerateDomain`] when both domain ends are
    /// equal, since every input would divide by zero.
    pub fn new(domain: (Decimal, Decimal), range: (Decimal, Decimal)) -> Result<Self, ScaleError> {
        if domain.0 == domain.1 {
            return Err(ScaleError::DegenerateDomain(domain.0.to_string()));
        }
        Ok(Self { domain, range })
    }

    /// Build a scale over a block-height window.
    pub fn over_blocks(
        start: u64,
        end: u64,
        range: (Decimal, Decimal),
    ) -> Result<Self, ScaleError> {
        Self::new((Decimal::from(start), Decimal::from(end)), range)
    }

    pub fn domain(&self) -> (Decimal, Decimal) {
        self.domain
    }

    pub fn range(&self) -> (Decimal, Decimal) {
        self.range
    }

    /// `r0 + (x - d0) * (r1 - r0) / (d1 - d0)`
    pub fn apply(&self, x: Decimal) -> Result<Decimal, ArithmeticError> {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        // Multiply before dividing to keep the exact value at the domain ends.
        let numerator = mul(sub(x, d0)?, sub(r1, r0)?)?;
        add(r0, div(numerator, sub(d1, d0)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn degenerate_domain_rejected() {
        assert_eq!(
            LinearScale::new((d(5), d(5)), (d(0), d(1))),
            Err(ScaleError::DegenerateDomain("5".into()))
        );
    }

    #[test]
    fn maps_domain_ends_to_range_ends() {
        let s = LinearScale::new((d(200), d(300)), (d(1), d(0))).unwrap();
        assert_eq!(s.apply(d(200)).unwrap(), d(1));
        assert_eq!(s.apply(d(300)).unwrap(), d(0));
    }

    #[test]
    fn interpolates_midpoint() {
        let s = LinearScale::new((d(0), d(10)), (d(30), d(5))).unwrap();
        assert_eq!(s.apply(d(5)).unwrap(), Decimal::new(175, 1));
    }

    #[test]
    fn does_not_clamp() {
        let s = LinearScale::new((d(200), d(300)), (d(1), d(0))).unwrap();
        assert_eq!(s.apply(d(400)).unwrap(), d(-1));
        assert_eq!(s.apply(d(100)).unwrap(), d(2));
    }

    #[test]
    fn reversed_domain_works() {
        let s = LinearScale::new((d(10), d(0)), (d(0), d(100))).unwrap();
        assert_eq!(s.apply(d(10)).unwrap(), d(0));
        assert_eq!(s.apply(d(0)).unwrap(), d(100));
    }

    #[test]
    fn over_blocks_uses_heights() {
        let s = LinearScale::over_blocks(8_251_581, 8_323_581, (d(1), d(0))).unwrap();
        assert_eq!(s.domain(), (d(8_251_581), d(8_323_581)));
        assert_eq!(s.range(), (d(1), d(0)));
    }

    proptest! {
        #[test]
        fn monotone_in_direction_of_range(
            a in 0u64..1_000_000,
            b in 0u64..1_000_000,
        ) {
            let s = LinearScale::over_blocks(0, 1_000_000, (d(0), d(1))).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let f_lo = s.apply(Decimal::from(lo)).unwrap();
            let f_hi = s.apply(Decimal::from(hi)).unwrap();
            prop_assert!(f_lo <= f_hi);
        }

        #[test]
        fn output_within_range_inside_domain(x in 0u64..=1_000) {
            let s = LinearScale::over_blocks(0, 1_000, (d(30), d(5))).unwrap();
            let y = s.apply(Decimal::from(x)).unwrap();
            prop_assert!(y <= d(30) && y >= d(5));
        }
    }
}
