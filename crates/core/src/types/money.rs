//! Type-safe money representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in a specific currency.
///
/// Amounts are kept in the currency's standard unit (e.g., taka, not poisha)
/// and serialized as decimal strings to avoid floating-point drift on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Format for display with two decimal places (e.g. `"$4999.00"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes accepted by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BDT,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BDT => "\u{09f3}",
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BDT => "BDT",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        let money = Money::new(Decimal::from(4999), CurrencyCode::USD);
        assert_eq!(money.display(), "$4999.00");
    }

    #[test]
    fn test_zero() {
        let money = Money::zero(CurrencyCode::BDT);
        assert_eq!(money.amount, Decimal::ZERO);
        assert_eq!(money.currency, CurrencyCode::BDT);
    }

    #[test]
    fn test_codes() {
        assert_eq!(CurrencyCode::BDT.code(), "BDT");
        assert_eq!(CurrencyCode::GBP.code(), "GBP");
    }

    #[test]
    fn test_serde_amount_as_string() {
        let money = Money::new(Decimal::new(1050, 2), CurrencyCode::EUR);
        let json = serde_json::to_string(&money).unwrap();
        assert!(json.contains("\"10.50\""));

        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, money);
    }
}
