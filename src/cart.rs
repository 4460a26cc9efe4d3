//! Cart

use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::catalog::{Variant, VariantId};

new_key_type! {
    /// Cart Line Key
    pub struct LineKey;
}

/// Errors related to cart mutation or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line's currency differs from the cart currency.
    #[error("line for {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(VariantId, &'static str, &'static str),

    /// No line exists for the given key.
    #[error("cart line not found")]
    LineNotFound,

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One row in the cart: a resolved variant at a chosen bundle tier.
///
/// The unit price is the bundle price locked in when the line was
/// added; later catalog or tier changes never reprice an existing line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    /// Resolved variant id.
    pub variant: VariantId,

    /// Display name at time of add.
    pub name: String,

    /// Color label for display.
    pub color: String,

    /// Length label for display.
    pub length: String,

    /// Default display image at time of add.
    pub image: String,

    /// Packs per purchase unit.
    pub packs: u32,

    /// Purchase units of this bundle; always at least 1 while the line
    /// exists.
    pub quantity: u32,

    /// Price per purchase unit, net of the bundle discount.
    pub unit_price: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Build a line from a resolved variant and its priced bundle.
    ///
    /// `unit_price` is the bundle price net of the tier discount; it is
    /// locked in here and never recomputed.
    #[must_use]
    pub fn from_selection(
        variant: &Variant<'a>,
        packs: u32,
        quantity: u32,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        LineItem {
            variant: variant.id.clone(),
            name: variant.name.clone(),
            color: variant.color.label().to_owned(),
            length: variant.length.label().to_owned(),
            image: variant.images.first().cloned().unwrap_or_default(),
            packs,
            quantity,
            unit_price,
        }
    }

    /// Total for the line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.unit_price.to_minor_units() * i64::from(self.quantity),
            self.unit_price.currency(),
        )
    }
}

/// Session cart: ordered lines in one currency.
#[derive(Debug)]
pub struct Cart<'a> {
    lines: SlotMap<LineKey, LineItem<'a>>,
    order: Vec<LineKey>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart for the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SlotMap::with_key(),
            order: Vec::new(),
            currency,
        }
    }

    /// Add a line to the cart.
    ///
    /// Adding the same variant at the same pack count again merges into
    /// the existing line by summing quantities; anything else appends a
    /// new line. Returns the key of the line that now holds the item.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if the line is priced
    /// in a different currency than the cart.
    pub fn add(&mut self, item: LineItem<'a>) -> Result<LineKey, CartError> {
        let item_currency = item.unit_price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.variant,
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let existing = self.order.iter().copied().find(|key| {
            self.lines
                .get(*key)
                .is_some_and(|line| line.variant == item.variant && line.packs == item.packs)
        });

        if let Some(key) = existing {
            if let Some(line) = self.lines.get_mut(key) {
                line.quantity = line.quantity.saturating_add(item.quantity.max(1));
            }

            return Ok(key);
        }

        let mut item = item;
        item.quantity = item.quantity.max(1);

        let key = self.lines.insert(item);
        self.order.push(key);

        Ok(key)
    }

    /// Set a line's quantity. Zero removes the line entirely; a cart
    /// never holds a zero-quantity row.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::LineNotFound`] if no line exists for the
    /// key.
    pub fn update_quantity(&mut self, key: LineKey, quantity: u32) -> Result<(), CartError> {
        if !self.lines.contains_key(key) {
            return Err(CartError::LineNotFound);
        }

        if quantity == 0 {
            self.remove(key)?;
            return Ok(());
        }

        if let Some(line) = self.lines.get_mut(key) {
            line.quantity = quantity;
        }

        Ok(())
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::LineNotFound`] if no line exists for the
    /// key.
    pub fn remove(&mut self, key: LineKey) -> Result<LineItem<'a>, CartError> {
        let line = self.lines.remove(key).ok_or(CartError::LineNotFound)?;
        self.order.retain(|existing| *existing != key);

        Ok(line)
    }

    /// Get a line by key.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::LineNotFound`] if no line exists for the
    /// key.
    pub fn get(&self, key: LineKey) -> Result<&LineItem<'a>, CartError> {
        self.lines.get(key).ok_or(CartError::LineNotFound)
    }

    /// Iterate over lines in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = (LineKey, &LineItem<'a>)> {
        self.order
            .iter()
            .filter_map(|key| self.lines.get(*key).map(|line| (*key, line)))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total purchase units across all lines (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.iter()
            .map(|(_, line)| line.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Running subtotal across all lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Money`] if money arithmetic fails.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        let mut total = Money::from_minor(0, self.currency);

        for (_, line) in self.iter() {
            total = total.add(line.line_total())?;
        }

        Ok(total)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.order.clear();
    }

    /// Currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
