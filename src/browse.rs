//! Collection browsing

use rusty_money::{Money, iso::Currency};

use crate::catalog::{Catalog, Color, Length, Variant};

/// Conjunctive filter over the collection page's variant list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filter<'a> {
    /// Restrict to a single color.
    pub color: Option<Color>,

    /// Restrict to a single length.
    pub length: Option<Length>,

    /// Keep variants priced at or above this amount.
    pub min_price: Option<Money<'a, Currency>>,

    /// Keep variants priced at or below this amount.
    pub max_price: Option<Money<'a, Currency>>,
}

impl Filter<'_> {
    /// Whether a variant passes every populated criterion.
    #[must_use]
    pub fn matches(&self, variant: &Variant<'_>) -> bool {
        if self.color.is_some_and(|color| variant.color != color) {
            return false;
        }

        if self.length.is_some_and(|length| variant.length != length) {
            return false;
        }

        let minor = variant.price.to_minor_units();

        if self
            .min_price
            .is_some_and(|min| minor < min.to_minor_units())
        {
            return false;
        }

        if self
            .max_price
            .is_some_and(|max| minor > max.to_minor_units())
        {
            return false;
        }

        true
    }
}

/// Sort orders offered by the collection page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Popular variants first; catalog order within each group.
    #[default]
    Popular,

    /// Cheapest first.
    PriceLowToHigh,

    /// Most expensive first.
    PriceHighToLow,

    /// Best-rated first.
    Rating,
}

/// Filter and sort the catalog for a collection listing.
///
/// The sort is stable, so equal-keyed variants keep catalog order.
#[must_use]
pub fn listing<'c, 'a>(
    catalog: &'c Catalog<'a>,
    filter: &Filter<'_>,
    sort: SortKey,
) -> Vec<&'c Variant<'a>> {
    let mut variants: Vec<&Variant<'_>> = catalog
        .variants()
        .iter()
        .filter(|variant| filter.matches(variant))
        .collect();

    match sort {
        SortKey::Popular => variants.sort_by_key(|variant| !variant.popular),
        SortKey::PriceLowToHigh => variants.sort_by_key(|variant| variant.price.to_minor_units()),
        SortKey::PriceHighToLow => {
            variants.sort_by_key(|variant| std::cmp::Reverse(variant.price.to_minor_units()));
        }
        SortKey::Rating => variants.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    variants
}

/// Variants of the same color as `variant` at other lengths, capped at
/// `limit`, for the "similar products" rail.
#[must_use]
pub fn similar<'c, 'a>(
    catalog: &'c Catalog<'a>,
    variant: &Variant<'_>,
    limit: usize,
) -> Vec<&'c Variant<'a>> {
    catalog
        .by_color(variant.color)
        .filter(|candidate| candidate.id != variant.id)
        .take(limit)
        .collect()
}
