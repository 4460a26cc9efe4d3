//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::packs::PackOption;

/// Errors specific to price breakdown calculations.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The pack discount and the variant price use different currencies.
    #[error("pack discount has currency {0}, but the variant price has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// An intermediate amount could not be safely represented.
    #[error("amount conversion overflowed or was not finite")]
    AmountConversion,

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Full price breakdown for one (variant, pack count, quantity)
/// selection, ready for display and for locking into a cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown<'a> {
    /// Single-pack price of the resolved variant.
    pub base_price: Money<'a, Currency>,

    /// Strike-through price the percent-off badge is computed against.
    pub original_price: Money<'a, Currency>,

    /// Total charged for the whole selection, net of the bundle discount.
    pub total_price: Money<'a, Currency>,

    /// Total bundle discount across the selection.
    pub savings: Money<'a, Currency>,

    /// Effective per-pack price inside the chosen bundle.
    pub price_per_pack: Money<'a, Currency>,

    /// Whole-number percent off the original price.
    pub discount_percentage: u32,
}

/// Compute the price breakdown for a variant price under a bundle tier.
///
/// Non-positive pack counts and quantities are treated as 1. A tier
/// discount larger than the undiscounted bundle price clamps to it, so
/// no output is ever negative.
///
/// The computation is pure: no side effects, identical outputs for
/// identical inputs.
///
/// # Errors
///
/// Returns a [`PricingError`] if the tier discount's currency differs
/// from the price's, or if an intermediate amount cannot be represented.
pub fn breakdown<'a>(
    base_price: Money<'a, Currency>,
    original_price: Money<'a, Currency>,
    pack: &PackOption<'a>,
    quantity: u32,
) -> Result<PriceBreakdown<'a>, PricingError> {
    let currency = base_price.currency();

    if pack.discount().currency() != currency {
        return Err(PricingError::CurrencyMismatch(
            pack.discount().currency().iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    let packs = i64::from(pack.count().max(1));
    let quantity = i64::from(quantity.max(1));

    let base_minor = base_price.to_minor_units();
    let bundle_minor = base_minor
        .checked_mul(packs)
        .ok_or(PricingError::AmountConversion)?;

    // A misconfigured tier never drives the bundle price below zero.
    let discount_minor = pack.discount().to_minor_units().min(bundle_minor);

    let net_bundle_minor = bundle_minor
        .checked_sub(discount_minor)
        .ok_or(PricingError::AmountConversion)?;

    let total_minor = net_bundle_minor
        .checked_mul(quantity)
        .ok_or(PricingError::AmountConversion)?;

    let savings_minor = discount_minor
        .checked_mul(quantity)
        .ok_or(PricingError::AmountConversion)?;

    let per_pack_minor = div_minor_rounded(net_bundle_minor, packs)?;

    Ok(PriceBreakdown {
        base_price,
        original_price,
        total_price: Money::from_minor(total_minor, currency),
        savings: Money::from_minor(savings_minor, currency),
        price_per_pack: Money::from_minor(per_pack_minor, currency),
        discount_percentage: percent_off(original_price, base_price)?,
    })
}

/// Whole-number percent saved buying at `price` instead of `original`.
///
/// Zero when `original` is zero or not above `price`; never negative.
///
/// # Errors
///
/// Returns a [`PricingError`] if the ratio cannot be represented.
pub fn percent_off(
    original: Money<'_, Currency>,
    price: Money<'_, Currency>,
) -> Result<u32, PricingError> {
    let original_minor = original.to_minor_units();
    let price_minor = price.to_minor_units();

    if original_minor <= 0 || price_minor >= original_minor {
        return Ok(0);
    }

    let Some(original) = Decimal::from_i64(original_minor) else {
        return Err(PricingError::AmountConversion);
    };
    let Some(price) = Decimal::from_i64(price_minor) else {
        return Err(PricingError::AmountConversion);
    };

    let ratio = (original - price)
        .checked_div(original)
        .ok_or(PricingError::AmountConversion)?;

    let percent = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    percent.to_u32().ok_or(PricingError::AmountConversion)
}

/// Discount amount, in minor units, for a percentage of a minor amount.
///
/// Rounds midpoints away from zero, matching the storefront's displayed
/// totals.
///
/// # Errors
///
/// Returns a [`PricingError`] if the product cannot be represented.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, PricingError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        return Err(PricingError::AmountConversion);
    };

    let applied = percent * minor;
    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_i64().ok_or(PricingError::AmountConversion)
}

/// Divide a minor amount, rounding midpoints away from zero.
fn div_minor_rounded(minor: i64, divisor: i64) -> Result<i64, PricingError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        return Err(PricingError::AmountConversion);
    };
    let Some(divisor) = Decimal::from_i64(divisor) else {
        return Err(PricingError::AmountConversion);
    };

    let quotient = minor
        .checked_div(divisor)
        .ok_or(PricingError::AmountConversion)?;

    quotient
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::AmountConversion)
}
