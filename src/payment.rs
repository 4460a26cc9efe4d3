//! Payment processing

use std::cell::Cell;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::LineItem;

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Card form handled by the card gateway.
    #[default]
    Card,

    /// Hosted button flow handled by PayPal.
    PayPal,
}

impl PaymentMethod {
    /// Label used on confirmations and notifications.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
        }
    }
}

/// Errors surfaced by a payment processor.
///
/// All of them leave the cart untouched; the buyer can correct and
/// retry.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The processor declined the charge.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The processor could not be reached or answered with an error.
    #[error("payment gateway error: {0}")]
    Gateway(String),

    /// A hosted order id was not recognized at capture time.
    #[error("unknown hosted order: {0}")]
    UnknownOrder(String),
}

/// Everything a processor is given: the single finalized amount plus
/// the itemized line list. Processors never see card data directly;
/// that stays inside their own SDK surfaces.
#[derive(Debug, Clone)]
pub struct ChargeRequest<'a> {
    /// Grand total to capture.
    pub amount: Money<'a, Currency>,

    /// Selected method.
    pub method: PaymentMethod,

    /// Itemized lines backing the amount.
    pub items: Vec<LineItem<'a>>,
}

/// Proof of a captured payment, the sole source of truth for order
/// completion.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt<'a> {
    /// Processor-issued transaction id.
    pub transaction_id: String,

    /// Amount actually captured.
    pub amount: Money<'a, Currency>,
}

/// A hosted-flow order created but not yet captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedOrder {
    /// Processor-issued order id, echoed back at capture.
    pub order_id: String,
}

/// Seam to the external payment gateway.
///
/// The direct path is [`charge`](PaymentProcessor::charge). The hosted
/// (redirect/button) path creates an order first and captures it when
/// the gateway calls back.
pub trait PaymentProcessor {
    /// Capture a charge in one step.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] if the gateway declines or fails.
    fn charge<'a>(&self, request: &ChargeRequest<'a>) -> Result<PaymentReceipt<'a>, PaymentError>;

    /// Create a hosted order for the buyer to approve on the gateway's
    /// own surface.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] if the gateway rejects the order.
    fn create_order(&self, request: &ChargeRequest<'_>) -> Result<HostedOrder, PaymentError>;

    /// Capture a previously created hosted order.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] if the order is unknown or capture
    /// fails.
    fn capture_order<'a>(
        &self,
        order: &HostedOrder,
        request: &ChargeRequest<'a>,
    ) -> Result<PaymentReceipt<'a>, PaymentError>;
}

impl<P: PaymentProcessor + ?Sized> PaymentProcessor for &P {
    fn charge<'a>(&self, request: &ChargeRequest<'a>) -> Result<PaymentReceipt<'a>, PaymentError> {
        (**self).charge(request)
    }

    fn create_order(&self, request: &ChargeRequest<'_>) -> Result<HostedOrder, PaymentError> {
        (**self).create_order(request)
    }

    fn capture_order<'a>(
        &self,
        order: &HostedOrder,
        request: &ChargeRequest<'a>,
    ) -> Result<PaymentReceipt<'a>, PaymentError> {
        (**self).capture_order(order, request)
    }
}

/// Development processor that approves every request, standing in for
/// the gateway sandboxes the storefront points at before going live.
#[derive(Debug, Default)]
pub struct SandboxProcessor {
    sequence: Cell<u64>,
}

impl SandboxProcessor {
    /// Create a sandbox processor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self, prefix: &str) -> String {
        let next = self.sequence.get().wrapping_add(1);
        self.sequence.set(next);

        format!("{prefix}_{next:08}")
    }
}

impl PaymentProcessor for SandboxProcessor {
    fn charge<'a>(&self, request: &ChargeRequest<'a>) -> Result<PaymentReceipt<'a>, PaymentError> {
        Ok(PaymentReceipt {
            transaction_id: self.next_id("txn"),
            amount: request.amount,
        })
    }

    fn create_order(&self, _request: &ChargeRequest<'_>) -> Result<HostedOrder, PaymentError> {
        Ok(HostedOrder {
            order_id: self.next_id("order"),
        })
    }

    fn capture_order<'a>(
        &self,
        order: &HostedOrder,
        request: &ChargeRequest<'a>,
    ) -> Result<PaymentReceipt<'a>, PaymentError> {
        if order.order_id.is_empty() {
            return Err(PaymentError::UnknownOrder(order.order_id.clone()));
        }

        Ok(PaymentReceipt {
            transaction_id: order.order_id.clone(),
            amount: request.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn request() -> ChargeRequest<'static> {
        ChargeRequest {
            amount: Money::from_minor(11_340, USD),
            method: PaymentMethod::Card,
            items: Vec::new(),
        }
    }

    #[test]
    fn sandbox_charge_issues_distinct_transaction_ids() -> TestResult {
        let processor = SandboxProcessor::new();

        let first = processor.charge(&request())?;
        let second = processor.charge(&request())?;

        assert_ne!(first.transaction_id, second.transaction_id);
        assert_eq!(first.amount, Money::from_minor(11_340, USD));

        Ok(())
    }

    #[test]
    fn sandbox_hosted_flow_round_trips_the_order_id() -> TestResult {
        let processor = SandboxProcessor::new();

        let order = processor.create_order(&request())?;
        let receipt = processor.capture_order(&order, &request())?;

        assert_eq!(receipt.transaction_id, order.order_id);

        Ok(())
    }

    #[test]
    fn method_labels_match_the_storefront_copy() {
        assert_eq!(PaymentMethod::Card.label(), "Credit Card");
        assert_eq!(PaymentMethod::PayPal.label(), "PayPal");
    }
}
