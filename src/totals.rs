//! Order totals

use decimal_percentage::Percentage;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::pricing::{PricingError, percent_of_minor};

/// Errors raised while deriving order totals.
#[derive(Debug, Error)]
pub enum TotalsError {
    /// Errors bubbled up from percent math.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Sales tax applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy)]
pub struct TaxConfig {
    rate: Percentage,
}

impl TaxConfig {
    /// Create a tax configuration with the given rate.
    #[must_use]
    pub fn new(rate: Percentage) -> Self {
        Self { rate }
    }

    /// The configured rate.
    #[must_use]
    pub fn rate(&self) -> Percentage {
        self.rate
    }

    /// Tax due on a subtotal, rounded to minor units.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if the percent math cannot be
    /// represented.
    pub fn tax_on<'a>(&self, subtotal: Money<'a, Currency>) -> Result<Money<'a, Currency>, TotalsError> {
        let minor = percent_of_minor(self.rate, subtotal.to_minor_units())?;

        Ok(Money::from_minor(minor, subtotal.currency()))
    }
}

impl Default for TaxConfig {
    /// The storefront's flat 8% rate.
    fn default() -> Self {
        Self::new(Percentage::from(0.08))
    }
}

/// Shipping speed chosen at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShippingSpeed {
    /// Standard shipping; free once the subtotal clears the threshold.
    #[default]
    Standard,

    /// Expedited shipping at a flat surcharge.
    Expedited,
}

/// Shipping rates and the free-shipping threshold.
#[derive(Debug, Clone, Copy)]
pub struct ShippingConfig<'a> {
    standard_rate: Money<'a, Currency>,
    expedited_rate: Money<'a, Currency>,
    free_shipping_threshold: Money<'a, Currency>,
}

impl<'a> ShippingConfig<'a> {
    /// Create a shipping configuration.
    #[must_use]
    pub fn new(
        standard_rate: Money<'a, Currency>,
        expedited_rate: Money<'a, Currency>,
        free_shipping_threshold: Money<'a, Currency>,
    ) -> Self {
        Self {
            standard_rate,
            expedited_rate,
            free_shipping_threshold,
        }
    }

    /// The storefront's shipped rates: free standard shipping on every
    /// order, expedited at $15.99.
    #[must_use]
    pub fn standard() -> ShippingConfig<'static> {
        use rusty_money::iso;

        ShippingConfig::new(
            Money::from_minor(0, iso::USD),
            Money::from_minor(1599, iso::USD),
            Money::from_minor(0, iso::USD),
        )
    }

    /// Shipping charge for a subtotal at the chosen speed.
    #[must_use]
    pub fn rate_for(&self, speed: ShippingSpeed, subtotal: Money<'a, Currency>) -> Money<'a, Currency> {
        match speed {
            ShippingSpeed::Standard => {
                if subtotal.to_minor_units() >= self.free_shipping_threshold.to_minor_units() {
                    Money::from_minor(0, self.standard_rate.currency())
                } else {
                    self.standard_rate
                }
            }
            ShippingSpeed::Expedited => self.expedited_rate,
        }
    }
}

/// Derived totals for an order about to be submitted for payment.
///
/// Never persisted; recomputed from the cart whenever it changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of line totals.
    pub subtotal: Money<'a, Currency>,

    /// Tax on the subtotal.
    pub tax: Money<'a, Currency>,

    /// Shipping charge.
    pub shipping: Money<'a, Currency>,

    /// The single amount handed to the payment processor.
    pub grand_total: Money<'a, Currency>,
}

/// Derive the order totals for a subtotal under the given tax and
/// shipping configuration.
///
/// # Errors
///
/// Returns a [`TotalsError`] if tax math or the final additions fail.
pub fn order_totals<'a>(
    subtotal: Money<'a, Currency>,
    tax: &TaxConfig,
    shipping: &ShippingConfig<'a>,
    speed: ShippingSpeed,
) -> Result<OrderTotals<'a>, TotalsError> {
    let tax = tax.tax_on(subtotal)?;
    let shipping = shipping.rate_for(speed, subtotal);
    let grand_total = subtotal.add(tax)?.add(shipping)?;

    Ok(OrderTotals {
        subtotal,
        tax,
        shipping,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn eight_percent_tax_on_even_subtotal() -> TestResult {
        let tax = TaxConfig::default();

        assert_eq!(
            tax.tax_on(Money::from_minor(10_500, USD))?,
            Money::from_minor(840, USD)
        );

        Ok(())
    }

    #[test]
    fn standard_shipping_is_free_at_the_shipped_threshold() {
        let shipping = ShippingConfig::standard();

        let rate = shipping.rate_for(ShippingSpeed::Standard, Money::from_minor(4500, USD));

        assert_eq!(rate, Money::from_minor(0, USD));
    }

    #[test]
    fn expedited_shipping_charges_the_flat_surcharge() {
        let shipping = ShippingConfig::standard();

        let rate = shipping.rate_for(ShippingSpeed::Expedited, Money::from_minor(4500, USD));

        assert_eq!(rate, Money::from_minor(1599, USD));
    }

    #[test]
    fn standard_rate_applies_below_a_nonzero_threshold() {
        let shipping = ShippingConfig::new(
            Money::from_minor(699, USD),
            Money::from_minor(1599, USD),
            Money::from_minor(7500, USD),
        );

        let below = shipping.rate_for(ShippingSpeed::Standard, Money::from_minor(5000, USD));
        let above = shipping.rate_for(ShippingSpeed::Standard, Money::from_minor(9000, USD));

        assert_eq!(below, Money::from_minor(699, USD));
        assert_eq!(above, Money::from_minor(0, USD));
    }

    #[test]
    fn grand_total_is_subtotal_plus_tax_plus_shipping() -> TestResult {
        let totals = order_totals(
            Money::from_minor(10_500, USD),
            &TaxConfig::default(),
            &ShippingConfig::standard(),
            ShippingSpeed::Expedited,
        )?;

        assert_eq!(totals.subtotal, Money::from_minor(10_500, USD));
        assert_eq!(totals.tax, Money::from_minor(840, USD));
        assert_eq!(totals.shipping, Money::from_minor(1599, USD));
        assert_eq!(totals.grand_total, Money::from_minor(12_939, USD));

        Ok(())
    }

    #[test]
    fn zero_subtotal_derives_zero_totals() -> TestResult {
        let totals = order_totals(
            Money::from_minor(0, USD),
            &TaxConfig::default(),
            &ShippingConfig::standard(),
            ShippingSpeed::Standard,
        )?;

        assert_eq!(totals.grand_total, Money::from_minor(0, USD));

        Ok(())
    }
}
