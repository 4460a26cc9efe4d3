//! Checkout

use chrono::Utc;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    confirmation::OrderConfirmation,
    notify::{LineSummary, NotificationSender, OrderSummary, ShippingAddress},
    payment::{ChargeRequest, PaymentError, PaymentMethod, PaymentProcessor, PaymentReceipt},
    totals::{OrderTotals, ShippingConfig, ShippingSpeed, TaxConfig, TotalsError, order_totals},
};

/// Fields the checkout form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Contact email.
    Email,
    /// First name.
    FirstName,
    /// Last name.
    LastName,
    /// Street address.
    Address,
    /// City.
    City,
    /// State code.
    State,
    /// ZIP code.
    ZipCode,
    /// Card number (card method only).
    CardNumber,
    /// Card expiry (card method only).
    ExpiryDate,
    /// Card CVV (card method only).
    Cvv,
    /// Name on the card (card method only).
    NameOnCard,
}

impl FormField {
    /// Inline message shown next to the field when it is missing.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            FormField::Email => "Email is required",
            FormField::FirstName => "First name is required",
            FormField::LastName => "Last name is required",
            FormField::Address => "Address is required",
            FormField::City => "City is required",
            FormField::State => "State is required",
            FormField::ZipCode => "ZIP code is required",
            FormField::CardNumber => "Card number is required",
            FormField::ExpiryDate => "Expiry date is required",
            FormField::Cvv => "CVV is required",
            FormField::NameOnCard => "Name on card is required",
        }
    }
}

/// Per-field validation failures, collected in form order so each can
/// be surfaced inline next to its field. Non-fatal and user-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("checkout form is missing {} required field(s)", .missing.len())]
pub struct ValidationErrors {
    missing: Vec<FormField>,
}

impl ValidationErrors {
    /// Fields that failed validation, in form order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.missing
    }

    /// Whether a specific field failed.
    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.missing.contains(&field)
    }

    /// Inline messages, in form order.
    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.missing.iter().map(|field| field.message())
    }
}

/// Shipping, billing and card details collected at checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    /// Contact email.
    pub email: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State code.
    pub state: String,

    /// ZIP code.
    pub zip_code: String,

    /// Card number. Passed only to the gateway SDK, never stored.
    pub card_number: String,

    /// Card expiry.
    pub expiry_date: String,

    /// Card CVV.
    pub cvv: String,

    /// Name on the card.
    pub name_on_card: String,
}

impl CheckoutForm {
    /// Validate required fields for the chosen payment method.
    ///
    /// Card fields are only required for the card method; the hosted
    /// flow collects payer details on the gateway's own surface.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every missing field.
    pub fn validate(&self, method: PaymentMethod) -> Result<(), ValidationErrors> {
        let mut missing = Vec::new();

        let mut require = |field: FormField, value: &str| {
            if value.trim().is_empty() {
                missing.push(field);
            }
        };

        require(FormField::Email, &self.email);
        require(FormField::FirstName, &self.first_name);
        require(FormField::LastName, &self.last_name);
        require(FormField::Address, &self.address);
        require(FormField::City, &self.city);
        require(FormField::State, &self.state);
        require(FormField::ZipCode, &self.zip_code);

        if method == PaymentMethod::Card {
            require(FormField::CardNumber, &self.card_number);
            require(FormField::ExpiryDate, &self.expiry_date);
            require(FormField::Cvv, &self.cvv);
            require(FormField::NameOnCard, &self.name_on_card);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { missing })
        }
    }

    /// Customer's full name for notifications.
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_owned()
    }

    /// Shipping address as entered.
    #[must_use]
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            street: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: "US".to_owned(),
        }
    }

    /// Shipping address for the hosted flow, where empty fields fall
    /// back to gateway-held payer details.
    #[must_use]
    pub fn shipping_address_or_hosted(&self) -> ShippingAddress {
        let or_hosted = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_owned()
            } else {
                value.to_owned()
            }
        };

        ShippingAddress {
            street: or_hosted(&self.address, "PayPal Address"),
            city: or_hosted(&self.city, "PayPal City"),
            state: or_hosted(&self.state, "PayPal State"),
            zip_code: or_hosted(&self.zip_code, "PayPal ZIP"),
            country: "US".to_owned(),
        }
    }
}

/// Errors surfaced by checkout submission.
///
/// None of them are fatal: the worst case leaves the cart intact for a
/// retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A payment round trip is already outstanding; re-submission is
    /// disabled until it settles.
    #[error("a payment is already in flight")]
    SubmissionInFlight,

    /// Nothing to charge.
    #[error("cart is empty")]
    EmptyCart,

    /// The form is missing required fields.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Errors bubbled up from cart totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Errors bubbled up from order total derivation.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// The processor declined or failed; the cart is untouched.
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Checkout orchestrator: validates the form, derives totals, runs the
/// payment round trip and fans out notifications.
///
/// Construction injects the two external ports so tests can swap in
/// fixtures for both.
#[derive(Debug)]
pub struct Checkout<'a, P, N> {
    processor: P,
    notifier: N,
    tax: TaxConfig,
    shipping: ShippingConfig<'a>,
    in_flight: bool,
}

impl<'a, P, N> Checkout<'a, P, N>
where
    P: PaymentProcessor,
    N: NotificationSender,
{
    /// Create a checkout with the storefront's standard tax and
    /// shipping policies.
    #[must_use]
    pub fn new(processor: P, notifier: N) -> Checkout<'static, P, N> {
        Checkout::with_policies(
            processor,
            notifier,
            TaxConfig::default(),
            ShippingConfig::standard(),
        )
    }

    /// Create a checkout with explicit tax and shipping policies.
    #[must_use]
    pub fn with_policies(
        processor: P,
        notifier: N,
        tax: TaxConfig,
        shipping: ShippingConfig<'a>,
    ) -> Self {
        Self {
            processor,
            notifier,
            tax,
            shipping,
            in_flight: false,
        }
    }

    /// Whether a payment round trip is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Derive the totals the buyer is shown before submitting.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart subtotal or total
    /// derivation fails.
    pub fn totals(
        &self,
        cart: &Cart<'a>,
        speed: ShippingSpeed,
    ) -> Result<OrderTotals<'a>, CheckoutError> {
        Ok(order_totals(cart.subtotal()?, &self.tax, &self.shipping, speed)?)
    }

    /// Submit the card flow: validate, charge, notify, clear the cart.
    ///
    /// On processor failure the cart is left intact and the error is
    /// surfaced once; nothing is partially committed.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for an in-flight submission, a
    /// missing form field, an empty cart, or a declined payment.
    pub fn submit(
        &mut self,
        cart: &mut Cart<'a>,
        form: &CheckoutForm,
        speed: ShippingSpeed,
    ) -> Result<OrderConfirmation<'a>, CheckoutError> {
        let method = PaymentMethod::Card;

        form.validate(method)?;

        let (totals, request) = self.prepare(cart, method, speed)?;

        self.in_flight = true;
        let charged = self.processor.charge(&request);
        self.in_flight = false;

        self.complete(cart, form, form.shipping_address(), totals, request, charged?)
    }

    /// Submit the hosted (button/redirect) flow: create an order with
    /// the gateway, then capture it when the gateway calls back.
    ///
    /// Field validation is skipped; the gateway collects payer details
    /// on its own surface and empty address fields fall back to the
    /// payer record.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for an in-flight submission, an
    /// empty cart, or a failed create/capture round trip.
    pub fn submit_hosted(
        &mut self,
        cart: &mut Cart<'a>,
        form: &CheckoutForm,
        speed: ShippingSpeed,
    ) -> Result<OrderConfirmation<'a>, CheckoutError> {
        let method = PaymentMethod::PayPal;

        let (totals, request) = self.prepare(cart, method, speed)?;

        self.in_flight = true;
        let captured = self
            .processor
            .create_order(&request)
            .and_then(|order| self.processor.capture_order(&order, &request));
        self.in_flight = false;

        self.complete(
            cart,
            form,
            form.shipping_address_or_hosted(),
            totals,
            request,
            captured?,
        )
    }

    /// Shared pre-payment steps: guard re-entry, reject empty carts,
    /// derive totals and assemble the charge request.
    fn prepare(
        &self,
        cart: &Cart<'a>,
        method: PaymentMethod,
        speed: ShippingSpeed,
    ) -> Result<(OrderTotals<'a>, ChargeRequest<'a>), CheckoutError> {
        if self.in_flight {
            return Err(CheckoutError::SubmissionInFlight);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = order_totals(cart.subtotal()?, &self.tax, &self.shipping, speed)?;

        let request = ChargeRequest {
            amount: totals.grand_total,
            method,
            items: cart.iter().map(|(_, line)| line.clone()).collect(),
        };

        Ok((totals, request))
    }

    /// Shared post-capture steps: build the order summary, fan out
    /// best-effort notifications and clear the cart.
    fn complete(
        &self,
        cart: &mut Cart<'a>,
        form: &CheckoutForm,
        shipping_address: ShippingAddress,
        totals: OrderTotals<'a>,
        request: ChargeRequest<'a>,
        receipt: PaymentReceipt<'a>,
    ) -> Result<OrderConfirmation<'a>, CheckoutError> {
        let lines: SmallVec<[LineSummary<'a>; 4]> =
            request.items.iter().map(LineSummary::from).collect();

        let summary = OrderSummary {
            order_id: receipt.transaction_id.clone(),
            customer_name: form.customer_name(),
            customer_email: form.email.clone(),
            lines,
            total: receipt.amount,
            shipping_address,
            payment_method: request.method,
            placed_at: Utc::now(),
        };

        // The charge is already captured; email failures must neither
        // surface to the buyer nor roll the order back.
        if let Err(error) = self.notifier.send_merchant_notification(&summary) {
            tracing::warn!(order_id = %summary.order_id, %error, "merchant notification failed");
        }

        if let Err(error) = self.notifier.send_customer_confirmation(&summary) {
            tracing::warn!(order_id = %summary.order_id, %error, "customer confirmation failed");
        }

        cart.clear();

        Ok(OrderConfirmation {
            receipt,
            totals,
            summary,
        })
    }
}
