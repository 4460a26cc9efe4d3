//! Order notifications

use chrono::{DateTime, Utc};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{cart::LineItem, payment::PaymentMethod};

/// Errors raised by a notification sender.
///
/// These are logged at the checkout boundary and never surfaced to the
/// buyer: once the processor has confirmed the charge, the order stands
/// whether or not the emails go out.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The sender could not dispatch the message.
    #[error("notification dispatch failed: {0}")]
    Dispatch(String),
}

/// Shipping address collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    /// Street address.
    pub street: String,

    /// City.
    pub city: String,

    /// State or region code.
    pub state: String,

    /// Postal code.
    pub zip_code: String,

    /// Country code.
    pub country: String,
}

/// One purchased line as it appears in notification emails.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSummary<'a> {
    /// Display name.
    pub name: String,

    /// Color label.
    pub color: String,

    /// Length label.
    pub length: String,

    /// Packs per purchase unit.
    pub packs: u32,

    /// Purchase units bought.
    pub quantity: u32,

    /// Line total (unit price times quantity).
    pub price: Money<'a, Currency>,
}

impl<'a> From<&LineItem<'a>> for LineSummary<'a> {
    fn from(line: &LineItem<'a>) -> Self {
        LineSummary {
            name: line.name.clone(),
            color: line.color.clone(),
            length: line.length.clone(),
            packs: line.packs,
            quantity: line.quantity,
            price: line.line_total(),
        }
    }
}

/// Everything the merchant notification and customer confirmation
/// carry about a completed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary<'a> {
    /// Processor transaction id, doubling as the order id.
    pub order_id: String,

    /// Customer's full name.
    pub customer_name: String,

    /// Customer's email address.
    pub customer_email: String,

    /// Purchased lines.
    pub lines: SmallVec<[LineSummary<'a>; 4]>,

    /// Grand total actually captured.
    pub total: Money<'a, Currency>,

    /// Where the order ships.
    pub shipping_address: ShippingAddress,

    /// Label of the method the buyer paid with.
    pub payment_method: PaymentMethod,

    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// Seam to the external mail utility.
///
/// Both messages are best-effort; implementations should fail fast
/// rather than retry, leaving the decision to log-and-continue to the
/// caller.
pub trait NotificationSender {
    /// Tell the merchant a new order landed.
    ///
    /// # Errors
    ///
    /// Returns a [`NotificationError`] if dispatch fails.
    fn send_merchant_notification(&self, order: &OrderSummary<'_>) -> Result<(), NotificationError>;

    /// Send the customer their confirmation.
    ///
    /// # Errors
    ///
    /// Returns a [`NotificationError`] if dispatch fails.
    fn send_customer_confirmation(&self, order: &OrderSummary<'_>) -> Result<(), NotificationError>;
}

impl<N: NotificationSender + ?Sized> NotificationSender for &N {
    fn send_merchant_notification(&self, order: &OrderSummary<'_>) -> Result<(), NotificationError> {
        (**self).send_merchant_notification(order)
    }

    fn send_customer_confirmation(&self, order: &OrderSummary<'_>) -> Result<(), NotificationError> {
        (**self).send_customer_confirmation(order)
    }
}

/// Sender that logs instead of dispatching, for demos and tests.
#[derive(Debug, Default)]
pub struct LoggingSender;

impl NotificationSender for LoggingSender {
    fn send_merchant_notification(&self, order: &OrderSummary<'_>) -> Result<(), NotificationError> {
        tracing::info!(order_id = %order.order_id, "merchant notification");

        Ok(())
    }

    fn send_customer_confirmation(&self, order: &OrderSummary<'_>) -> Result<(), NotificationError> {
        tracing::info!(
            order_id = %order.order_id,
            customer = %order.customer_email,
            "customer confirmation"
        );

        Ok(())
    }
}
