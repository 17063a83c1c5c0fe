//! Money conversion between minor units and provider amounts
//!
//! The commerce platform stores amounts as integers in minor units with a
//! per-currency number of fraction digits. The payment provider expects and
//! returns decimal strings with exactly two decimals. All arithmetic is done
//! on `rust_decimal::Decimal`, so the only rounding is the one each direction
//! explicitly asks for:
//!
//! - towards the provider: midpoint away from zero, at two decimals
//! - back from the provider: ceiling, at the currency's fraction digits

use crate::types::{CentAmount, Money, MoneyError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of decimals in every provider amount string
pub const PROVIDER_DECIMALS: u32 = 2;

/// Largest fraction digit count the converter scales (10^18 fits an i64)
pub const MAX_FRACTION_DIGITS: u32 = 18;

/// Amount as the payment provider represents it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAmount {
    /// ISO 4217 currency code
    pub currency: String,
    /// Decimal string with exactly two decimals, e.g. `"10.00"`
    pub value: String,
}

fn check_scale(fraction_digits: u32) -> Result<(), MoneyError> {
    if fraction_digits > MAX_FRACTION_DIGITS {
        return Err(MoneyError::UnsupportedScale {
            fraction_digits,
            max: MAX_FRACTION_DIGITS,
        });
    }
    Ok(())
}

/// Convert a minor-unit amount to a provider amount string
///
/// Computes `cent_amount / 10^fraction_digits` exactly and renders it with
/// two decimals. Currencies with more than two fraction digits are rounded
/// (midpoint away from zero); currencies with fewer are zero-padded.
///
/// # Arguments
///
/// * `cent_amount` - Amount in minor units, may be negative
/// * `fraction_digits` - Scale of the minor unit
///
/// # Returns
///
/// * `Ok(String)` - e.g. `"10.00"` for `(1000, 2)`, `"10.10"` for `(100987, 4)`
/// * `Err(MoneyError::UnsupportedScale)` - if `fraction_digits` exceeds [`MAX_FRACTION_DIGITS`]
pub fn to_provider_amount(
    cent_amount: CentAmount,
    fraction_digits: u32,
) -> Result<String, MoneyError> {
    check_scale(fraction_digits)?;

    let exact = Decimal::new(cent_amount, fraction_digits);
    let mut rounded =
        exact.round_dp_with_strategy(PROVIDER_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PROVIDER_DECIMALS);

    // -0.004 rounds to a signed zero
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }

    Ok(rounded.to_string())
}

/// Convert a provider amount string back to minor units
///
/// The string is parsed exactly, scaled by `10^fraction_digits`, and rounded
/// up to the next whole minor unit when it does not land on one.
///
/// # Arguments
///
/// * `value` - Decimal string as returned by the provider
/// * `fraction_digits` - Scale of the target minor unit
///
/// # Returns
///
/// * `Ok(CentAmount)` - e.g. `1000` for `("10.00", 2)`, `11` for `("10.05", 0)`
/// * `Err(MoneyError)` - if the string is not a decimal, the scale is unsupported,
///   or the result does not fit an `i64`
pub fn from_provider_amount(value: &str, fraction_digits: u32) -> Result<CentAmount, MoneyError> {
    check_scale(fraction_digits)?;

    let parsed =
        Decimal::from_str(value.trim()).map_err(|_| MoneyError::invalid_amount(value))?;
    let factor = Decimal::from(10_i64.pow(fraction_digits));

    parsed
        .checked_mul(factor)
        .map(|scaled| scaled.ceil())
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| MoneyError::overflow(value, fraction_digits))
}

/// Convert platform money to the provider's representation
pub fn to_provider_money(money: &Money) -> Result<ProviderAmount, MoneyError> {
    Ok(ProviderAmount {
        currency: money.currency_code.clone(),
        value: to_provider_amount(money.cent_amount, money.fraction_digits)?,
    })
}

/// Convert a provider amount to platform money at the given scale
pub fn from_provider_money(
    amount: &ProviderAmount,
    fraction_digits: u32,
) -> Result<Money, MoneyError> {
    Ok(Money {
        cent_amount: from_provider_amount(&amount.value, fraction_digits)?,
        currency_code: amount.currency.clone(),
        fraction_digits,
    })
}
