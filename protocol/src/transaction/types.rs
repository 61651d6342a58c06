//! Core value types for ledger transactions.
//!
//! Money is an integer count of the smallest unit of a currency. Two amounts
//! can only be added, subtracted or compared when their currencies match;
//! every such operation returns a `Result` so a malformed transaction shows
//! up as an error at the call site instead of a panic deep in a rule.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from amount arithmetic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The two operands are denominated in different currencies.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// The result does not fit in a `u64`.
    #[error("amount overflow: {left} + {right}")]
    Overflow { left: u64, right: u64 },

    /// The result would be negative.
    #[error("amount underflow: {left} - {right}")]
    Underflow { left: u64, right: u64 },
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Currency denominations.
///
/// The well-known tickers carry their display precision. Anything else goes
/// through [`Currency::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    /// United States Dollar (cent, 10^-2).
    USD,
    /// Euro (cent, 10^-2).
    EUR,
    /// Pound sterling (penny, 10^-2).
    GBP,
    /// Brazilian Real (centavo, 10^-2).
    BRL,
    /// Swiss franc (rappen, 10^-2).
    CHF,
    /// Japanese yen (no minor unit).
    JPY,
    /// Arbitrary ticker for anything else.
    Custom(String),
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::USD => write!(f, "USD"),
            Self::EUR => write!(f, "EUR"),
            Self::GBP => write!(f, "GBP"),
            Self::BRL => write!(f, "BRL"),
            Self::CHF => write!(f, "CHF"),
            Self::JPY => write!(f, "JPY"),
            Self::Custom(ticker) => write!(f, "{}", ticker),
        }
    }
}

impl Currency {
    /// Number of decimal places for display. Purely cosmetic; arithmetic is
    /// always on the integer quantity.
    pub fn decimals(&self) -> u8 {
        match self {
            Self::USD | Self::EUR | Self::GBP | Self::BRL | Self::CHF => 2,
            Self::JPY => 0,
            Self::Custom(_) => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A monetary amount in the smallest unit of its currency.
///
/// `Amount::new(100, Currency::USD)` is one dollar.
///
/// ```
/// use tally_protocol::transaction::types::{Amount, Currency};
///
/// let a = Amount::new(1_000, Currency::USD);
/// let b = Amount::new(250, Currency::USD);
/// assert_eq!(a.checked_sub(&b).unwrap().quantity, 750);
/// assert!(a.checked_add(&Amount::new(1, Currency::EUR)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Quantity in minor units.
    pub quantity: u64,
    /// Denomination.
    pub currency: Currency,
}

impl Amount {
    pub fn new(quantity: u64, currency: Currency) -> Self {
        Self { quantity, currency }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.quantity == 0
    }

    /// Fails with [`AmountError::CurrencyMismatch`] unless both sides share a
    /// currency.
    pub fn ensure_same_currency(&self, other: &Amount) -> Result<(), AmountError> {
        if self.currency != other.currency {
            return Err(AmountError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.ensure_same_currency(other)?;
        let quantity = self
            .quantity
            .checked_add(other.quantity)
            .ok_or(AmountError::Overflow {
                left: self.quantity,
                right: other.quantity,
            })?;
        Ok(Amount::new(quantity, self.currency.clone()))
    }

    pub fn checked_sub(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.ensure_same_currency(other)?;
        let quantity = self
            .quantity
            .checked_sub(other.quantity)
            .ok_or(AmountError::Underflow {
                left: self.quantity,
                right: other.quantity,
            })?;
        Ok(Amount::new(quantity, self.currency.clone()))
    }

    /// Ordering between two amounts of the same currency.
    pub fn try_cmp(&self, other: &Amount) -> Result<Ordering, AmountError> {
        self.ensure_same_currency(other)?;
        Ok(self.quantity.cmp(&other.quantity))
    }

    /// Human-readable decimal rendering, e.g. `"10.50 USD"`.
    pub fn display_decimal(&self) -> String {
        let decimals = self.currency.decimals() as u32;
        if decimals == 0 {
            return format!("{} {}", self.quantity, self.currency);
        }
        let divisor = 10u64.pow(decimals);
        format!(
            "{}.{:0>width$} {}",
            self.quantity / divisor,
            self.quantity % divisor,
            self.currency,
            width = decimals as usize
        )
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.currency)
    }
}

// ---------------------------------------------------------------------------
// LinearId
// ---------------------------------------------------------------------------

/// Stable identity threading every version of one logical entity.
///
/// Equality, ordering and hashing use `id` only. The optional external id is
/// a caller-side label (an invoice number, say) and carries no meaning for
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearId {
    pub external_id: Option<String>,
    pub id: Uuid,
}

impl LinearId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self {
            external_id: None,
            id: Uuid::new_v4(),
        }
    }

    /// A fresh random id with a caller-side label.
    pub fn with_external_id(external_id: impl Into<String>) -> Self {
        Self {
            external_id: Some(external_id.into()),
            id: Uuid::new_v4(),
        }
    }

    /// Wraps an existing uuid.
    pub fn from_uuid(id: Uuid) -> Self {
        Self {
            external_id: None,
            id,
        }
    }
}

impl Default for LinearId {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LinearId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LinearId {}

impl PartialOrd for LinearId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LinearId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for LinearId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for LinearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.external_id {
            Some(ext) => write!(f, "{}_{}", ext, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(q: u64) -> Amount {
        Amount::new(q, Currency::USD)
    }

    #[test]
    fn add_and_sub_same_currency() {
        assert_eq!(usd(70).checked_add(&usd(30)).unwrap(), usd(100));
        assert_eq!(usd(100).checked_sub(&usd(30)).unwrap(), usd(70));
    }

    #[test]
    fn currency_mismatch_is_an_error() {
        let eur = Amount::new(10, Currency::EUR);
        assert!(matches!(
            usd(10).checked_add(&eur),
            Err(AmountError::CurrencyMismatch { .. })
        ));
        assert!(usd(10).try_cmp(&eur).is_err());
    }

    #[test]
    fn underflow_and_overflow_are_errors() {
        assert_eq!(
            usd(5).checked_sub(&usd(6)),
            Err(AmountError::Underflow { left: 5, right: 6 })
        );
        assert!(matches!(
            usd(u64::MAX).checked_add(&usd(1)),
            Err(AmountError::Overflow { .. })
        ));
    }

    #[test]
    fn try_cmp_orders_quantities() {
        assert_eq!(usd(1).try_cmp(&usd(2)).unwrap(), Ordering::Less);
        assert_eq!(usd(2).try_cmp(&usd(2)).unwrap(), Ordering::Equal);
    }

    #[test]
    fn display_decimal() {
        assert_eq!(usd(1050).display_decimal(), "10.50 USD");
        assert_eq!(Amount::new(500, Currency::JPY).display_decimal(), "500 JPY");
        assert_eq!(
            Amount::new(7, Currency::Custom("XAU".into())).display_decimal(),
            "0.07 XAU"
        );
    }

    #[test]
    fn linear_id_equality_ignores_external_id() {
        let a = LinearId::with_external_id("invoice-7");
        let mut b = LinearId::from_uuid(a.id);
        assert_eq!(a, b);
        b.external_id = Some("other".into());
        assert_eq!(a, b);
        assert_ne!(a, LinearId::new());
    }

    #[test]
    fn amount_serde_roundtrip() {
        let amt = Amount::new(42_000, Currency::Custom("DOGE".into()));
        let json = serde_json::to_string(&amt).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amt, back);
    }
}
