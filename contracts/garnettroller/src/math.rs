use crate::constants::{DOUBLE_SCALE, EXP_SCALE};
use crate::errors::Error;

/// 1e18-scaled fixed-point scalar. Collateral factors, exchange rates,
/// borrow indices and liquidity values all live in this scale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Exp {
    pub mantissa: u128,
}

/// 1e36-scaled fixed-point scalar, used only for cumulative reward
/// indices. The wider scale is narrowed back to token units in a single
/// truncating step (`mul_units`); everything before that is exact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Double {
    pub mantissa: u128,
}

impl Exp {
    pub fn new(mantissa: u128) -> Self {
        Exp { mantissa }
    }

    /// (a * b) / 1e18.
    pub fn mul(self, other: Exp) -> Result<Exp, Error> {
        let product = self
            .mantissa
            .checked_mul(other.mantissa)
            .ok_or(Error::MathOverflow)?;
        Ok(Exp::new(product / EXP_SCALE))
    }

    /// Weight a raw token quantity, keeping the 1e18 scale.
    pub fn mul_scalar(self, scalar: u128) -> Result<u128, Error> {
        self.mantissa.checked_mul(scalar).ok_or(Error::MathOverflow)
    }
}

impl Double {
    pub fn new(mantissa: u128) -> Self {
        Double { mantissa }
    }

    /// num * 1e36 / denom. An empty denominator yields zero: no units on a
    /// market side means nothing to spread the emission over.
    pub fn fraction(num: u128, denom: u128) -> Result<Double, Error> {
        if denom == 0 {
            return Ok(Double::new(0));
        }
        let scaled = num.checked_mul(DOUBLE_SCALE).ok_or(Error::MathOverflow)?;
        Ok(Double::new(scaled / denom))
    }

    pub fn add(self, other: Double) -> Result<Double, Error> {
        self.mantissa
            .checked_add(other.mantissa)
            .map(Double::new)
            .ok_or(Error::MathOverflow)
    }

    pub fn sub(self, other: Double) -> Result<Double, Error> {
        self.mantissa
            .checked_sub(other.mantissa)
            .map(Double::new)
            .ok_or(Error::MathOverflow)
    }

    /// units * self / 1e36, truncating back to token units.
    pub fn mul_units(self, units: u128) -> Result<u128, Error> {
        units
            .checked_mul(self.mantissa)
            .map(|product| product / DOUBLE_SCALE)
            .ok_or(Error::MathOverflow)
    }
}

/// Lift a raw unit count into the 1e18 value scale.
pub fn units_to_value(units: u128) -> Result<u128, Error> {
    units.checked_mul(EXP_SCALE).ok_or(Error::MathOverflow)
}

/// units * 1e18 / index. Normalizes an index-bearing balance back to real
/// units; borrow totals are stored against the market borrow index.
pub fn div_by_exp(units: u128, index: Exp) -> Result<u128, Error> {
    if index.mantissa == 0 {
        return Err(Error::MathOverflow);
    }
    units
        .checked_mul(EXP_SCALE)
        .map(|scaled| scaled / index.mantissa)
        .ok_or(Error::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_spreads_over_denominator() {
        let ratio = Double::fraction(100, 100).unwrap();
        assert_eq!(ratio.mantissa, DOUBLE_SCALE);
        let ratio = Double::fraction(50, 200).unwrap();
        assert_eq!(ratio.mantissa, DOUBLE_SCALE / 4);
    }

    #[test]
    fn fraction_of_empty_denominator_is_zero() {
        assert_eq!(Double::fraction(1_000, 0).unwrap().mantissa, 0);
    }

    #[test]
    fn fraction_detects_overflow() {
        assert_eq!(Double::fraction(u128::MAX, 3), Err(Error::MathOverflow));
    }

    #[test]
    fn double_sub_underflow_is_an_error() {
        let a = Double::new(1);
        let b = Double::new(2);
        assert_eq!(a.sub(b), Err(Error::MathOverflow));
    }

    #[test]
    fn mul_units_truncates_to_token_units() {
        // 500 units against a one-and-a-half index delta.
        let delta = Double::new(DOUBLE_SCALE + DOUBLE_SCALE / 2);
        assert_eq!(delta.mul_units(500).unwrap(), 750);
    }

    #[test]
    fn exp_mul_keeps_mantissa_scale() {
        let half = Exp::new(EXP_SCALE / 2);
        let rate = Exp::new(2 * EXP_SCALE);
        assert_eq!(half.mul(rate).unwrap().mantissa, EXP_SCALE);
    }

    #[test]
    fn exp_mul_scalar_overflow_is_an_error() {
        let factor = Exp::new(EXP_SCALE);
        assert_eq!(factor.mul_scalar(u128::MAX), Err(Error::MathOverflow));
    }

    #[test]
    fn div_by_exp_normalizes_indexed_balances() {
        // 200 stored against a 2.0 borrow index is 100 real units.
        assert_eq!(div_by_exp(200, Exp::new(2 * EXP_SCALE)).unwrap(), 100);
    }
}
