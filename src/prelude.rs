//! Strand prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    browse::{Filter, SortKey, listing, similar},
    cart::{Cart, CartError, LineItem, LineKey},
    catalog::{Catalog, CatalogError, Color, Length, Variant, VariantId},
    checkout::{Checkout, CheckoutError, CheckoutForm, FormField, ValidationErrors},
    config::{GatewayEnvironment, PaymentConfig, PaymentIntent},
    confirmation::OrderConfirmation,
    fixtures::{Fixture, FixtureError},
    notify::{
        LineSummary, LoggingSender, NotificationError, NotificationSender, OrderSummary,
        ShippingAddress,
    },
    packs::{PackError, PackOption, PackOptions},
    payment::{
        ChargeRequest, HostedOrder, PaymentError, PaymentMethod, PaymentProcessor, PaymentReceipt,
        SandboxProcessor,
    },
    pricing::{PriceBreakdown, PricingError, breakdown},
    resolve::Resolution,
    totals::{OrderTotals, ShippingConfig, ShippingSpeed, TaxConfig, order_totals},
};
