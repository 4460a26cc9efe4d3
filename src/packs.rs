//! Pack options

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// One bundle tier: buying `count` packs at once knocks `discount` off
/// the naive multiplied price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackOption<'a> {
    count: u32,
    discount: Money<'a, Currency>,
}

impl<'a> PackOption<'a> {
    /// Create a new tier.
    #[must_use]
    pub fn new(count: u32, discount: Money<'a, Currency>) -> Self {
        Self { count, discount }
    }

    /// Number of packs in the bundle.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Discount taken off the bundle, once per purchased bundle set.
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }
}

/// Errors raised while validating a tier set.
#[derive(Debug, Error)]
pub enum PackError {
    /// The tier set is empty.
    #[error("no pack tiers defined")]
    Empty,

    /// The first tier must be the undiscounted single pack.
    #[error("first tier must be a single pack with no discount")]
    BadBaseTier,

    /// Pack counts must strictly increase across tiers.
    #[error("tier counts must strictly increase (found {0} after {1})")]
    NonIncreasingCount(u32, u32),

    /// Discounts must not shrink as bundles grow.
    #[error("discount for {0}-pack tier is smaller than the tier before it")]
    DecreasingDiscount(u32),

    /// A tier's discount currency differs from the first tier's.
    #[error("tier {0} has currency {1}, but the tier set has currency {2}")]
    CurrencyMismatch(u32, &'static str, &'static str),
}

/// The validated set of bundle tiers a storefront offers.
///
/// Tiers are ordered by pack count, starting at the undiscounted single
/// pack, with discounts that never shrink as bundles grow.
#[derive(Debug, Clone)]
pub struct PackOptions<'a> {
    tiers: Vec<PackOption<'a>>,
    currency: &'a Currency,
}

impl<'a> PackOptions<'a> {
    /// Build a tier set, validating ordering and discount monotonicity.
    ///
    /// # Errors
    ///
    /// Returns a [`PackError`] if the set is empty, does not start at an
    /// undiscounted single pack, repeats or reorders counts, mixes
    /// currencies, or lets a larger bundle discount less than a smaller
    /// one.
    pub fn new(tiers: Vec<PackOption<'a>>) -> Result<Self, PackError> {
        let first = tiers.first().ok_or(PackError::Empty)?;

        if first.count != 1 || first.discount.to_minor_units() != 0 {
            return Err(PackError::BadBaseTier);
        }

        let currency = first.discount.currency();
        let mut previous = *first;

        for tier in tiers.iter().skip(1) {
            if tier.discount.currency() != currency {
                return Err(PackError::CurrencyMismatch(
                    tier.count,
                    tier.discount.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if tier.count <= previous.count {
                return Err(PackError::NonIncreasingCount(tier.count, previous.count));
            }

            if tier.discount.to_minor_units() < previous.discount.to_minor_units() {
                return Err(PackError::DecreasingDiscount(tier.count));
            }

            previous = *tier;
        }

        Ok(Self { tiers, currency })
    }

    /// The tier set the storefront ships with: 1–4 packs, discounts of
    /// $0, $5, $12 and $20.
    ///
    /// # Errors
    ///
    /// Returns a [`PackError`] if the shipped tiers violate a tier-set
    /// invariant.
    pub fn standard() -> Result<PackOptions<'static>, PackError> {
        use rusty_money::iso;

        PackOptions::new(vec![
            PackOption::new(1, Money::from_minor(0, iso::USD)),
            PackOption::new(2, Money::from_minor(500, iso::USD)),
            PackOption::new(3, Money::from_minor(1200, iso::USD)),
            PackOption::new(4, Money::from_minor(2000, iso::USD)),
        ])
    }

    /// The tier for a requested pack count. Unknown counts fall back to
    /// the single-pack, no-discount tier rather than erroring.
    #[must_use]
    pub fn tier(&self, count: u32) -> PackOption<'a> {
        self.tiers
            .iter()
            .find(|tier| tier.count == count)
            .or_else(|| self.tiers.first())
            .copied()
            .unwrap_or_else(|| PackOption::new(1, Money::from_minor(0, self.currency)))
    }

    /// All tiers, smallest bundle first.
    #[must_use]
    pub fn tiers(&self) -> &[PackOption<'a>] {
        &self.tiers
    }

    /// Currency shared by every tier discount.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
